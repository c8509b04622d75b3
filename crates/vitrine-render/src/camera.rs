//! Perspective projection onto terminal cells.

use vitrine_core::{Mat4, Vec3};

/// Width of a terminal cell relative to its height.
pub const CELL_ASPECT: f32 = 0.5;

/// A perspective camera looking at a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl Camera {
    /// Camera at `(0, 0, 5)` looking at the origin.
    pub fn new(fov: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn projector(&self, width: u16, height: u16) -> Projector {
        let w = f32::from(width.max(1));
        let h = f32::from(height.max(1));
        let aspect = w * CELL_ASPECT / h;
        Projector {
            view: Mat4::look_at_rh(self.eye, self.target, Vec3::Y),
            proj: Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far),
            half_fov_tan: (self.fov.to_radians() * 0.5).tan(),
            eye: self.eye,
            near: self.near,
            far: self.far,
            width: w,
            height: h,
        }
    }
}

/// A point projected onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Column, fractional.
    pub x: f32,
    /// Row, fractional.
    pub y: f32,
    /// Distance along the view axis.
    pub depth: f32,
}

/// Camera matrices fixed for one canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    view: Mat4,
    proj: Mat4,
    half_fov_tan: f32,
    eye: Vec3,
    near: f32,
    far: f32,
    width: f32,
    height: f32,
}

impl Projector {
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Project a world point. Points behind the near plane or past the far
    /// plane yield `None`.
    pub fn project(&self, world: Vec3) -> Option<Projected> {
        let view = self.view.transform_point3(world);
        let depth = -view.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let ndc = self.proj.project_point3(view);
        Some(Projected {
            x: (ndc.x + 1.0) * 0.5 * self.width,
            y: (1.0 - ndc.y) * 0.5 * self.height,
            depth,
        })
    }

    /// Rows covered by one world unit at `depth`.
    pub fn rows_per_unit(&self, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        self.height / (2.0 * depth * self.half_fov_tan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_projects_to_centre() {
        let p = Camera::default().projector(80, 24);
        let c = p.project(Vec3::ZERO).unwrap();
        assert!((c.x - 40.0).abs() < 1e-3);
        assert!((c.y - 12.0).abs() < 1e-3);
        assert!((c.depth - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_up_is_up_and_right_is_right() {
        let p = Camera::default().projector(80, 24);
        let up = p.project(Vec3::Y).unwrap();
        let right = p.project(Vec3::X).unwrap();
        assert!(up.y < 12.0);
        assert!(right.x > 40.0);
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        let p = Camera::default().projector(80, 24);
        assert_eq!(p.project(Vec3::new(0.0, 0.0, 6.0)), None);
    }

    #[test]
    fn test_rows_per_unit_matches_projection() {
        let p = Camera::default().projector(80, 24);
        let a = p.project(Vec3::ZERO).unwrap();
        let b = p.project(Vec3::Y).unwrap();
        assert!(((a.y - b.y) - p.rows_per_unit(5.0)).abs() < 1e-3);
    }
}
