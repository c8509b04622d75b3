//! Terminal rendering for the vitrine scene.
//!
//! The scene is rasterized into a character canvas: meshes are sampled into
//! surface points, lit by the scene lights, depth tested per cell and mapped
//! onto a brightness ramp of glyphs. Particle labels are drawn as text at
//! their projected positions.

mod camera;
mod canvas;
mod chars;
mod geometry;
mod shading;
mod state;

pub use camera::{CELL_ASPECT, Camera, Projected, Projector};
pub use canvas::{Canvas, Cell};
pub use geometry::{SurfacePoint, bounding_radius, surface_points};
pub use shading::{glyph_for, shade};
pub use state::SceneRenderer;
