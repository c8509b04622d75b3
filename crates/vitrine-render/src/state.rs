//! Renderer state kept across frames.

use ratatui::{Frame, layout::Rect, widgets::Paragraph};
use vitrine_core::{Rgb, Vec3};
use vitrine_scene::{Backdrop, Hierarchy, Scene, SceneLight, SectionModelRig};

use crate::camera::{Camera, Projector};
use crate::canvas::Canvas;
use crate::geometry::{bounding_radius, surface_points};
use crate::shading::{glyph_for, shade};

/// Field of view of the main scene camera, in degrees.
const SCENE_FOV: f32 = 50.0;
const MIN_RESOLUTION: usize = 6;
const MAX_RESOLUTION: usize = 64;

/// Reusable canvases for the scene and the section model panels.
#[derive(Debug)]
pub struct SceneRenderer {
    scene: Canvas,
    panel: Canvas,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            scene: Canvas::new(0, 0, Rgb::BLACK),
            panel: Canvas::new(0, 0, Rgb::BLACK),
        }
    }

    /// Draw the scene behind everything else in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, scene: &Scene) {
        self.rasterize(area.width, area.height, scene);
        frame.render_widget(Paragraph::new(self.scene.to_lines()), area);
    }

    /// Rasterize the scene into the internal canvas and return it.
    pub fn rasterize(&mut self, width: u16, height: u16, scene: &Scene) -> &Canvas {
        if self.scene.resize(width, height) {
            tracing::debug!(width, height, "scene canvas resized");
        }
        let backdrop = scene.backdrop();
        self.scene.clear(backdrop.color());

        let projector = Camera::new(SCENE_FOV).projector(width, height);
        draw_particles(&mut self.scene, &projector, scene);

        let mut lights: Vec<&SceneLight> = scene.lighting().lights().iter().collect();
        lights.push(scene.avatar().glow());
        draw_hierarchy(
            &mut self.scene,
            &projector,
            scene.avatar().hierarchy(),
            &lights,
            backdrop,
        );
        &self.scene
    }

    /// Rasterize one section model into the panel canvas and return it.
    /// Callers clip the result themselves when the panel is partly scrolled
    /// off screen.
    pub fn rasterize_model(
        &mut self,
        width: u16,
        height: u16,
        model: &SectionModelRig,
        backdrop: &Backdrop,
    ) -> &Canvas {
        self.panel.resize(width, height);
        self.panel.clear(backdrop.color());
        let projector = Camera::new(model.fov()).projector(width, height);
        let lights: Vec<&SceneLight> = model.lights().lights().iter().collect();
        draw_hierarchy(
            &mut self.panel,
            &projector,
            model.hierarchy(),
            &lights,
            backdrop,
        );
        &self.panel
    }
}

fn draw_particles(canvas: &mut Canvas, projector: &Projector, scene: &Scene) {
    let field = scene.particles();
    let backdrop = scene.backdrop();
    let base = backdrop.color();
    for particle in field.particles() {
        let transform = particle.transform();
        let Some(p) = projector.project(transform.translation) else {
            continue;
        };
        let label = particle.label();
        let tint = base.lerp(field.color(), field.opacity() * transform.scale.x.clamp(0.0, 1.0));
        let color = backdrop.fog(tint, p.depth);
        let half = label.chars().count() as f32 * 0.5;
        canvas.text(
            (p.x - half).round() as i32,
            p.y.round() as i32,
            p.depth,
            label,
            color,
        );
    }
}

fn draw_hierarchy(
    canvas: &mut Canvas,
    projector: &Projector,
    hierarchy: &Hierarchy,
    lights: &[&SceneLight],
    backdrop: &Backdrop,
) {
    let eye = projector.eye();
    let matrices = hierarchy.world_matrices();
    for ((_, node), world) in hierarchy.iter().zip(matrices) {
        let Some(material) = node.material else {
            continue;
        };
        let centre = world.transform_point3(Vec3::ZERO);
        let Some(c) = projector.project(centre) else {
            continue;
        };
        let (scale, _, _) = world.to_scale_rotation_translation();
        let radius = bounding_radius(&node.shape) * scale.max_element();
        let extent = radius * projector.rows_per_unit(c.depth);
        let resolution = ((extent * 8.0) as usize).clamp(MIN_RESOLUTION, MAX_RESOLUTION);

        for point in surface_points(&node.shape, resolution) {
            let position = world.transform_point3(point.position);
            let normal = world.transform_vector3(point.normal).normalize_or_zero();
            if !material.wireframe && normal.dot(eye - position) < 0.0 {
                continue;
            }
            let Some(p) = projector.project(position) else {
                continue;
            };
            let lit = shade(&material, position, normal, eye, lights);
            let ch = glyph_for(lit, &material);
            let color = canvas
                .background()
                .lerp(backdrop.fog(lit, p.depth), material.opacity.clamp(0.0, 1.0));
            canvas.plot(p.x.floor() as i32, p.y.floor() as i32, p.depth, ch, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{LayoutProfile, Theme, Viewport};
    use vitrine_scene::{ModelKind, SceneOptions};

    fn scene() -> Scene {
        Scene::new(
            SceneOptions {
                seed: 3,
                ..SceneOptions::default()
            },
            Viewport::new(100.0, 30.0),
        )
    }

    #[test]
    fn test_scene_draws_avatar_and_labels() {
        let scene = scene();
        let mut renderer = SceneRenderer::new();
        let canvas = renderer.rasterize(100, 30, &scene);
        assert_eq!(canvas.width(), 100);
        assert!(canvas.filled() > 50);
        // The head sits right in front of the camera.
        let centre = canvas.cell(50, 12).map(|c| c.ch);
        assert!(centre.is_some_and(|ch| ch != ' '), "{centre:?}");
    }

    #[test]
    fn test_background_follows_backdrop() {
        let mut scene = scene();
        let mut renderer = SceneRenderer::new();
        scene.toggle_theme();
        scene.update(1.0, 1.0);
        let canvas = renderer.rasterize(40, 12, &scene);
        assert_eq!(canvas.background(), Rgb::hex(0xf5f7fa));
    }

    #[test]
    fn test_every_model_is_visible() {
        let backdrop = Backdrop::new(Theme::Dark);
        let mut renderer = SceneRenderer::new();
        for kind in ModelKind::ALL {
            let model = SectionModelRig::new(kind, LayoutProfile::Desktop, Theme::Dark, 1);
            let canvas = renderer.rasterize_model(40, 20, &model, &backdrop);
            assert!(canvas.filled() > 20, "{kind:?} drew {}", canvas.filled());
        }
    }

    #[test]
    fn test_canvas_follows_area_size() {
        let scene = scene();
        let mut renderer = SceneRenderer::new();
        for (width, height) in [(40, 12), (60, 20), (60, 20), (40, 12)] {
            let canvas = renderer.rasterize(width, height, &scene);
            assert_eq!((canvas.width(), canvas.height()), (width, height));
        }
    }

    #[test]
    fn test_empty_area_is_harmless() {
        let scene = scene();
        let mut renderer = SceneRenderer::new();
        assert_eq!(renderer.rasterize(0, 0, &scene).filled(), 0);
    }
}
