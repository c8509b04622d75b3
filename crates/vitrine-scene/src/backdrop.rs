//! Clear colour and distance fog behind the scene.

use vitrine_core::{FrameTime, Rgb, Theme};

use crate::Rig;
use crate::lighting::ThemedColor;

/// Exponential fog density.
pub const FOG_DENSITY: f32 = 0.05;

/// Background and fog colour shared by the whole scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    color: ThemedColor,
}

impl Backdrop {
    pub fn new(theme: Theme) -> Self {
        Self {
            color: ThemedColor::new(Rgb::hex(0xf5f7fa), Rgb::hex(0x1a1138), theme),
        }
    }

    pub fn color(&self) -> Rgb {
        self.color.value()
    }

    /// Blend `surface` into the fog at view distance `depth`.
    pub fn fog(&self, surface: Rgb, depth: f32) -> Rgb {
        let d = FOG_DENSITY * depth.max(0.0);
        let visibility = (-(d * d)).exp();
        self.color().lerp(surface, visibility)
    }
}

impl Rig for Backdrop {
    fn update(&mut self, frame: FrameTime, _theme: Theme) {
        self.color.advance(frame.delta);
    }

    fn theme_changed(&mut self, theme: Theme) {
        self.color.retarget(theme);
    }
}
