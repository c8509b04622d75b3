//! Per-frame inputs consumed by the rigs.

use glam::{Vec2, Vec3};

/// Clock values handed to every rig once per rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the scene started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }
}

/// Visible page area, in page units (terminal cells for the TUI).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80.0, 24.0)
    }
}

/// Pointer position in normalized device coordinates (`-1..=1`, y up).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTarget {
    pub ndc: Vec2,
}

impl PointerTarget {
    /// Remap a client-space position (origin top-left, y down).
    pub fn from_client(x: f32, y: f32, viewport: Viewport) -> Self {
        if viewport.is_empty() {
            return Self::default();
        }
        Self {
            ndc: Vec2::new(
                (x / viewport.width) * 2.0 - 1.0,
                -(y / viewport.height) * 2.0 + 1.0,
            ),
        }
    }

    /// Distance from the centre of the screen in NDC units.
    pub fn distance(&self) -> f32 {
        self.ndc.length()
    }

    /// World-space point the avatar should look at.
    pub fn look_at(&self) -> Vec3 {
        Vec3::new(self.ndc.x * 1.5, self.ndc.y + 1.0, 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_corners() {
        let vp = Viewport::new(100.0, 50.0);
        assert_eq!(PointerTarget::from_client(0.0, 0.0, vp).ndc, Vec2::new(-1.0, 1.0));
        assert_eq!(
            PointerTarget::from_client(100.0, 50.0, vp).ndc,
            Vec2::new(1.0, -1.0)
        );
        assert_eq!(PointerTarget::from_client(50.0, 25.0, vp).distance(), 0.0);
    }

    #[test]
    fn test_empty_viewport_centres_pointer() {
        let target = PointerTarget::from_client(10.0, 10.0, Viewport::new(0.0, 0.0));
        assert_eq!(target.ndc, Vec2::ZERO);
    }
}
