//! Decorative models beside the page sections.

use std::f32::consts::{FRAC_PI_4, TAU};

use rand::Rng;
use vitrine_core::{FrameTime, LayoutProfile, Rgb, Theme, Transform, Vec3};

use crate::Rig;
use crate::hierarchy::{Hierarchy, Material, NodeId, Shape};
use crate::lighting::{LightKind, LightingRig, SceneLight, ThemedColor, ThemedScalar};
use crate::rng::{MODEL_STREAM, create_rng};

/// Which model a section shows. Fixed for the life of a rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Laptop,
    Skills,
    Resume,
    Contact,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Laptop,
        ModelKind::Skills,
        ModelKind::Resume,
        ModelKind::Contact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Laptop => "laptop",
            ModelKind::Skills => "skills",
            ModelKind::Resume => "resume",
            ModelKind::Contact => "contact",
        }
    }

    fn build(self, hierarchy: &mut Hierarchy, root: NodeId, seed: u64) {
        match self {
            ModelKind::Laptop => build_laptop(hierarchy, root, seed),
            ModelKind::Skills => build_skills(hierarchy, root),
            ModelKind::Resume => build_resume(hierarchy, root, seed),
            ModelKind::Contact => build_contact(hierarchy, root),
        }
    }
}

/// One section model with its own camera field of view and lights.
#[derive(Debug, Clone)]
pub struct SectionModelRig {
    kind: ModelKind,
    hierarchy: Hierarchy,
    root: NodeId,
    base: Transform,
    base_scale: f32,
    fov: f32,
    lights: LightingRig,
    emissive: ThemedColor,
    metalness: ThemedScalar,
    roughness: ThemedScalar,
}

impl SectionModelRig {
    pub fn new(kind: ModelKind, layout: LayoutProfile, theme: Theme, seed: u64) -> Self {
        let base_scale = layout.section_model_scale();
        let base = Transform::IDENTITY.with_scale(base_scale);
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.group(None, kind.name(), base);
        kind.build(&mut hierarchy, root, seed);

        let mut rig = Self {
            kind,
            hierarchy,
            root,
            base,
            base_scale,
            fov: layout.section_fov(),
            lights: LightingRig::new(vec![
                SceneLight::new(
                    "ambient",
                    LightKind::Ambient,
                    Vec3::ZERO,
                    (0.5, 0.5),
                    (Rgb::WHITE, Rgb::WHITE),
                    theme,
                ),
                SceneLight::new(
                    "spot",
                    LightKind::Spot {
                        angle: 0.15,
                        penumbra: 1.0,
                    },
                    Vec3::new(5.0, 5.0, 5.0),
                    (0.8, 0.8),
                    (Rgb::WHITE, Rgb::WHITE),
                    theme,
                ),
            ]),
            emissive: ThemedColor::new(
                Rgb::new(0.05, 0.05, 0.1),
                Rgb::new(0.2, 0.05, 0.5),
                theme,
            ),
            metalness: ThemedScalar::new(0.3, 0.5, theme),
            roughness: ThemedScalar::new(0.6, 0.4, theme),
        };
        rig.apply_materials();
        rig
    }

    /// Take over the light and material tweens of `previous`.
    pub fn carry_theme_from(&mut self, previous: &SectionModelRig) {
        self.lights = previous.lights.clone();
        self.emissive = previous.emissive.clone();
        self.metalness = previous.metalness.clone();
        self.roughness = previous.roughness.clone();
        self.apply_materials();
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn lights(&self) -> &LightingRig {
        &self.lights
    }

    /// Vertical field of view of the model's camera, in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Transform of the model's root group.
    pub fn transform(&self) -> &Transform {
        self.hierarchy.transform(self.root)
    }

    fn apply_materials(&mut self) {
        let emissive = self.emissive.value();
        let metalness = self.metalness.value();
        let roughness = self.roughness.value();
        for material in self.hierarchy.materials_mut() {
            material.emissive = emissive;
            material.metalness = metalness;
            material.roughness = roughness;
        }
    }
}

impl Rig for SectionModelRig {
    fn update(&mut self, frame: FrameTime, theme: Theme) {
        let t = frame.elapsed;
        let delta = frame.delta;
        let base = self.base;
        let base_scale = self.base_scale;
        let transform = self.hierarchy.transform_mut(self.root);

        match self.kind {
            ModelKind::Laptop => {
                transform.rotation.y = (transform.rotation.y + delta * 0.2).rem_euclid(TAU);
                transform.translation.y = base.translation.y + t.sin() * 0.05;
            }
            ModelKind::Skills => {
                let spin = Vec3::new(delta * 0.1, delta * 0.5, delta * 0.05);
                let r = transform.rotation + spin;
                transform.rotation =
                    Vec3::new(r.x.rem_euclid(TAU), r.y.rem_euclid(TAU), r.z.rem_euclid(TAU));
            }
            ModelKind::Resume => {
                transform.rotation.y = (t * 0.5).sin() * 0.2;
                transform.translation.y = base.translation.y + t.sin() * 0.1;
            }
            ModelKind::Contact => {
                transform.scale = Vec3::splat(base_scale * (1.0 + (2.0 * t).sin() * 0.05));
                transform.rotation.y = (transform.rotation.y + delta * 0.3).rem_euclid(TAU);
            }
        }

        self.lights.update(frame, theme);
        let settled =
            self.emissive.is_settled() && self.metalness.is_settled() && self.roughness.is_settled();
        if !settled {
            self.emissive.advance(delta);
            self.metalness.advance(delta);
            self.roughness.advance(delta);
            self.apply_materials();
        }
    }

    fn theme_changed(&mut self, theme: Theme) {
        self.lights.theme_changed(theme);
        self.emissive.retarget(theme);
        self.metalness.retarget(theme);
        self.roughness.retarget(theme);
    }
}

fn build_laptop(h: &mut Hierarchy, root: NodeId, seed: u64) {
    let mut rng = create_rng(seed, MODEL_STREAM);
    h.add(
        Some(root),
        "Base",
        Shape::Cuboid {
            size: Vec3::new(2.0, 0.1, 1.5),
        },
        Transform::IDENTITY,
        Some(Material::standard(Rgb::hex(0x444444)).surface(0.5, 0.4)),
    );
    let screen = h.group(
        Some(root),
        "Screen",
        Transform::from_translation(Vec3::new(0.0, 0.7, -0.7))
            .with_rotation(Vec3::new(FRAC_PI_4, 0.0, 0.0)),
    );
    h.add(
        Some(screen),
        "Lid",
        Shape::Cuboid {
            size: Vec3::new(2.0, 1.2, 0.08),
        },
        Transform::IDENTITY,
        Some(Material::standard(Rgb::hex(0x222222)).surface(0.8, 0.2)),
    );
    let violet = Rgb::hex(0x5b21b6);
    h.add(
        Some(screen),
        "Display",
        Shape::Plane {
            width: 1.9,
            height: 1.1,
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, 0.05)),
        Some(Material::standard(violet).surface(0.1, 0.3).glow(violet, 0.5)),
    );
    let mint = Rgb::hex(0x80ffdb);
    for i in 0..5 {
        let x = -0.7 + rng.r#gen::<f32>() * 0.2;
        let width = 0.8 + rng.r#gen::<f32>() * 0.5;
        h.add(
            Some(screen),
            format!("CodeLine{i}"),
            Shape::Plane {
                width,
                height: 0.05,
            },
            Transform::from_translation(Vec3::new(x, 0.4 - i as f32 * 0.2, 0.06)),
            Some(Material::standard(mint).glow(mint, 0.8)),
        );
    }
    h.add(
        Some(root),
        "Keyboard",
        Shape::Cuboid {
            size: Vec3::new(1.8, 0.05, 0.6),
        },
        Transform::from_translation(Vec3::new(0.0, 0.05, 0.4)),
        Some(Material::standard(Rgb::hex(0x333333)).surface(0.5, 0.5)),
    );
}

fn build_skills(h: &mut Hierarchy, root: NodeId) {
    const FACES: [([f32; 3], u32); 6] = [
        ([0.0, 0.0, 0.76], 0x5b21b6),
        ([0.76, 0.0, 0.0], 0x3b82f6),
        ([-0.76, 0.0, 0.0], 0x10b981),
        ([0.0, 0.0, -0.76], 0xf59e0b),
        ([0.0, 0.76, 0.0], 0xec4899),
        ([0.0, -0.76, 0.0], 0x8b5cf6),
    ];
    h.add(
        Some(root),
        "Cube",
        Shape::Cuboid {
            size: Vec3::splat(1.5),
        },
        Transform::IDENTITY,
        Some(
            Material::standard(Rgb::hex(0x222222))
                .surface(0.7, 0.2)
                .opacity(0.8),
        ),
    );
    for (i, (position, hex)) in FACES.into_iter().enumerate() {
        let color = Rgb::hex(hex);
        h.add(
            Some(root),
            format!("Face{i}"),
            Shape::Plane {
                width: 1.2,
                height: 1.2,
            },
            Transform::from_translation(Vec3::from_array(position)),
            Some(Material::standard(color).surface(0.3, 0.7).glow(color, 0.5)),
        );
    }
}

fn build_resume(h: &mut Hierarchy, root: NodeId, seed: u64) {
    let mut rng = create_rng(seed, MODEL_STREAM);
    let document = h.group(Some(root), "Document", Transform::IDENTITY);
    for i in 0..5 {
        let tilt = (i as f32 * 0.5).sin() * 0.05;
        h.add(
            Some(document),
            format!("Page{i}"),
            Shape::Cuboid {
                size: Vec3::new(1.2, 1.6, 0.01),
            },
            Transform::from_translation(Vec3::new(0.0, -(i as f32) * 0.01, 0.0))
                .with_rotation(Vec3::new(0.0, 0.0, tilt)),
            Some(Material::standard(Rgb::hex(0xf8f9fa)).surface(0.1, 0.9)),
        );
    }
    for i in 0..12 {
        let x = -0.4 + rng.r#gen::<f32>() * 0.1;
        let width = 0.7 + rng.r#gen::<f32>() * 0.3;
        h.add(
            Some(document),
            format!("TextLine{i}"),
            Shape::Plane {
                width,
                height: 0.03,
            },
            Transform::from_translation(Vec3::new(x, 0.6 - i as f32 * 0.12, 0.02)),
            Some(Material::standard(Rgb::hex(0x5b21b6)).opacity(0.8)),
        );
    }
}

fn build_contact(h: &mut Hierarchy, root: NodeId) {
    let blue = Rgb::hex(0x3b82f6);
    let green = Rgb::hex(0x10b981);
    let amber = Rgb::hex(0xf59e0b);
    h.add(
        Some(root),
        "Shell",
        Shape::Sphere { radius: 1.0 },
        Transform::IDENTITY,
        Some(
            Material::standard(blue)
                .surface(0.9, 0.2)
                .glow(blue, 0.3)
                .opacity(0.6)
                .wireframe(),
        ),
    );
    h.add(
        Some(root),
        "Core",
        Shape::Sphere { radius: 0.8 },
        Transform::IDENTITY,
        Some(
            Material::standard(green)
                .surface(0.7, 0.3)
                .glow(green, 0.3)
                .opacity(0.4),
        ),
    );
    for i in 0..5 {
        let angle = i as f32 / 5.0 * TAU;
        let position = Vec3::new(angle.cos() * 1.2, angle.sin() * 0.5, angle.sin() * 1.2);
        h.add(
            Some(root),
            format!("Bead{i}"),
            Shape::Sphere { radius: 0.1 },
            Transform::from_translation(position),
            Some(Material::standard(amber).glow(amber, 0.5)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rig(kind: ModelKind) -> SectionModelRig {
        SectionModelRig::new(kind, LayoutProfile::Desktop, Theme::Dark, 7)
    }

    #[test]
    fn test_each_kind_builds_geometry() {
        let counts: Vec<usize> = ModelKind::ALL.iter().map(|&k| rig(k).hierarchy().len()).collect();
        assert_eq!(counts, vec![11, 8, 19, 8]);
    }

    #[test]
    fn test_compact_layout_uses_smaller_scale_and_wider_fov() {
        let compact = SectionModelRig::new(ModelKind::Skills, LayoutProfile::Compact, Theme::Dark, 7);
        assert_eq!(compact.transform().scale, Vec3::splat(0.8));
        assert_eq!(compact.fov(), 60.0);
        assert_eq!(rig(ModelKind::Skills).fov(), 50.0);
    }

    #[test]
    fn test_laptop_floats_and_turns() {
        let mut rig = rig(ModelKind::Laptop);
        rig.update(FrameTime::new(1.0, 0.5), Theme::Dark);
        let t = rig.transform();
        assert!((t.rotation.y - 0.1).abs() < 1e-6);
        assert!((t.translation.y - 1.0f32.sin() * 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_skills_spins_on_every_axis() {
        let mut rig = rig(ModelKind::Skills);
        rig.update(FrameTime::new(1.0, 1.0), Theme::Dark);
        let r = rig.transform().rotation;
        assert!((r - Vec3::new(0.1, 0.5, 0.05)).length() < 1e-6);
    }

    #[test]
    fn test_resume_pose_depends_only_on_time() {
        let mut a = rig(ModelKind::Resume);
        let mut b = rig(ModelKind::Resume);
        a.update(FrameTime::new(3.0, 0.01), Theme::Dark);
        for i in 1..=30 {
            b.update(FrameTime::new(i as f32 * 0.1, 0.1), Theme::Dark);
        }
        assert_eq!(a.transform().rotation.y, b.transform().rotation.y);
        assert_eq!(a.transform().translation.y, b.transform().translation.y);
    }

    #[test]
    fn test_theme_eases_materials() {
        let mut rig = rig(ModelKind::Contact);
        rig.theme_changed(Theme::Light);
        for _ in 0..60 {
            rig.update(FrameTime::new(0.0, 1.0 / 60.0), Theme::Light);
        }
        for (_, node) in rig.hierarchy().iter() {
            if let Some(material) = &node.material {
                assert_eq!(material.emissive, Rgb::new(0.05, 0.05, 0.1));
                assert_eq!(material.metalness, 0.3);
                assert_eq!(material.roughness, 0.6);
            }
        }
    }

    #[test]
    fn test_same_seed_same_code_lines() {
        let a = rig(ModelKind::Laptop);
        let b = rig(ModelKind::Laptop);
        let id = a.hierarchy().find("CodeLine3").unwrap();
        assert_eq!(a.hierarchy().node(id), b.hierarchy().node(id));
    }

    proptest! {
        #[test]
        fn test_contact_scale_is_exact(t in -1.0e4f32..1.0e4, delta in 0.0f32..0.1) {
            let mut rig = rig(ModelKind::Contact);
            rig.update(FrameTime::new(t, delta), Theme::Dark);
            let expected = 1.2 * (1.0 + (2.0 * t).sin() * 0.05);
            prop_assert_eq!(rig.transform().scale, Vec3::splat(expected));
        }
    }
}
