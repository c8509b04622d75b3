//! Core value types shared by the vitrine crates.
//!
//! Everything here is plain data: themes, colours, transforms, easing
//! helpers and the viewport/pointer inputs the rigs consume each frame.

mod color;
mod easing;
mod input;
mod layout;
mod theme;
mod transform;

pub use color::Rgb;
pub use easing::{Ease, Tween, damp, lerp};
pub use input::{FrameTime, PointerTarget, Viewport};
pub use layout::LayoutProfile;
pub use theme::Theme;
pub use transform::Transform;

pub use glam::{Mat4, Quat, Vec2, Vec3};
