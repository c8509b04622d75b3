//! Decorative scene for the vitrine portfolio.
//!
//! Each visual element is driven by a rig that owns its transforms and is
//! stepped once per rendered frame with the elapsed/delta clock and the
//! current theme. The [`Scene`] owns every rig, routes input events to them
//! and forwards theme changes from the [`ThemeSignal`].

mod avatar;
mod backdrop;
mod hierarchy;
mod lighting;
mod particles;
mod rng;
mod scene;
mod scroll;
mod section;
mod signal;
mod timer;

pub use avatar::{AvatarParts, AvatarRig, BLINK_DURATION, INTERACTION_DURATION, WAVE_DURATION};
pub use backdrop::Backdrop;
pub use hierarchy::{Hierarchy, Material, Node, NodeId, Shape};
pub use lighting::{LightKind, LightingRig, SceneLight, THEME_TRANSITION, ThemedColor, ThemedScalar};
pub use particles::{CODE_SNIPPETS, Particle, ParticleDescriptor, ParticleField};
pub use scene::{Scene, SceneOptions};
pub use scroll::{
    MODEL_REVEAL_THRESHOLD, NAVBAR_SCROLL_THRESHOLD, ScrollTracker, SectionId, SectionSpan,
    TEXT_REVEAL_THRESHOLD,
};
pub use section::{ModelKind, SectionModelRig};
pub use signal::{ListenerId, ThemeSignal};
pub use timer::{Hold, RandomInterval};

use vitrine_core::{FrameTime, Theme};

/// A set of per-frame update rules driving one visual element.
pub trait Rig {
    /// Advance by one frame. `theme` is the value current for this frame.
    fn update(&mut self, frame: FrameTime, theme: Theme);

    /// Called synchronously when the theme flips.
    fn theme_changed(&mut self, _theme: Theme) {}
}
