//! The animated avatar standing on its glowing platform.
//!
//! Four sub-animations share one hierarchy: head tracking toward the pointer,
//! a randomly re-armed blink, a wave triggered near the top of the page, and
//! a continuous float. A pointer near the centre of the screen opens a short
//! interaction window. Each sub-animation needs specific named parts; if a
//! part is missing from the hierarchy that sub-animation is skipped.

use std::f32::consts::FRAC_PI_4;

use vitrine_core::{
    FrameTime, LayoutProfile, PointerTarget, Rgb, Theme, Transform, Vec2, Vec3, damp,
};

use crate::Rig;
use crate::hierarchy::{Hierarchy, Material, NodeId, Shape};
use crate::lighting::{LightKind, SceneLight, ThemedColor};
use crate::rng::{BLINK_STREAM, create_rng};
use crate::timer::{Hold, RandomInterval};

/// How long the eyes stay shut.
pub const BLINK_DURATION: f32 = 0.2;
/// How long one wave lasts.
pub const WAVE_DURATION: f32 = 2.5;
/// How long an interaction pulse lasts.
pub const INTERACTION_DURATION: f32 = 2.0;

const BLINK_INTERVAL_MIN: f32 = 3.0;
const BLINK_INTERVAL_MAX: f32 = 7.0;
const EYE_CLOSED: f32 = 0.1;
const YAW_LIMIT: f32 = 0.5;
const PITCH_LIMIT: f32 = 0.2;
/// Waves only start while scrolled less than this fraction of the viewport.
const WAVE_SCROLL_FRACTION: f32 = 0.3;
/// NDC radius around the screen centre that starts an interaction.
const INTERACTION_RADIUS: f32 = 0.5;
/// Look-at point before the pointer has moved.
const DEFAULT_LOOK_AT: Vec3 = Vec3::new(0.0, 0.0, 5.0);
/// Platform light position in avatar space.
const GLOW_OFFSET: Vec3 = Vec3::new(0.0, -1.9, 0.0);

/// Handles to the parts the sub-animations drive, resolved once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvatarParts {
    pub root: Option<NodeId>,
    pub head: Option<NodeId>,
    pub left_eye: Option<NodeId>,
    pub right_eye: Option<NodeId>,
    pub right_arm: Option<NodeId>,
}

impl AvatarParts {
    pub fn resolve(hierarchy: &Hierarchy) -> Self {
        Self {
            root: hierarchy.find("Avatar"),
            head: hierarchy.find("Head"),
            left_eye: hierarchy.find("LeftEye"),
            right_eye: hierarchy.find("RightEye"),
            right_arm: hierarchy.find("RightArm"),
        }
    }
}

/// The avatar rig.
#[derive(Debug, Clone)]
pub struct AvatarRig {
    hierarchy: Hierarchy,
    parts: AvatarParts,
    base_translation: Vec3,
    pointer: Option<PointerTarget>,
    blink_interval: RandomInterval,
    blink: Hold,
    wave: Hold,
    wave_phase: f32,
    wave_cycles: u32,
    interaction: Hold,
    interaction_pulses: u32,
    float_phase: f32,
    glow: SceneLight,
    emissive: ThemedColor,
}

impl AvatarRig {
    /// Build the default avatar for `layout`.
    pub fn new(layout: LayoutProfile, theme: Theme, seed: u64) -> Self {
        let base = Vec3::new(0.0, layout.avatar_base_y(), 0.0);
        Self::from_hierarchy(build_hierarchy(base, layout.avatar_scale()), theme, seed)
    }

    /// Wrap an existing hierarchy. Parts are looked up by name here and never
    /// again.
    pub fn from_hierarchy(hierarchy: Hierarchy, theme: Theme, seed: u64) -> Self {
        let parts = AvatarParts::resolve(&hierarchy);
        if parts.head.is_none() || parts.right_arm.is_none() {
            tracing::warn!(?parts, "avatar hierarchy is missing parts; their animations are skipped");
        }
        let base_translation = parts
            .root
            .map(|id| hierarchy.transform(id).translation)
            .unwrap_or(Vec3::ZERO);

        let mut rig = Self {
            hierarchy,
            parts,
            base_translation,
            pointer: None,
            blink_interval: RandomInterval::new(
                BLINK_INTERVAL_MIN,
                BLINK_INTERVAL_MAX,
                create_rng(seed, BLINK_STREAM),
            ),
            blink: Hold::new(BLINK_DURATION),
            wave: Hold::new(WAVE_DURATION),
            wave_phase: 0.0,
            wave_cycles: 0,
            interaction: Hold::new(INTERACTION_DURATION),
            interaction_pulses: 0,
            float_phase: 0.0,
            glow: SceneLight::new(
                "platform-glow",
                LightKind::Point { distance: 5.0 },
                GLOW_OFFSET,
                (0.8, 1.5),
                (Rgb::new(0.9, 0.8, 0.7), Rgb::new(0.4, 0.2, 0.9)),
                theme,
            ),
            emissive: ThemedColor::new(
                Rgb::new(0.05, 0.05, 0.05),
                Rgb::new(0.2, 0.05, 0.3),
                theme,
            ),
        };
        rig.apply_emissive();
        rig.place_glow();
        rig
    }

    /// Take over the theme tweens of `previous`, so a rebuild mid-transition
    /// keeps easing from where the old rig was.
    pub fn carry_theme_from(&mut self, previous: &AvatarRig) {
        self.glow = previous.glow.clone();
        self.emissive = previous.emissive.clone();
        self.apply_emissive();
        self.place_glow();
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn parts(&self) -> AvatarParts {
        self.parts
    }

    /// Pointer moved. Starts an interaction pulse when it lands near the
    /// centre and none is running.
    pub fn on_pointer(&mut self, target: PointerTarget) {
        self.pointer = Some(target);
        if target.distance() < INTERACTION_RADIUS && self.interaction.trigger() {
            self.interaction_pulses += 1;
            tracing::debug!(pulses = self.interaction_pulses, "avatar interaction");
        }
    }

    /// Page scrolled. Starts a wave near the top of the page unless one is
    /// already running.
    pub fn on_scroll(&mut self, offset: f32, viewport_height: f32) {
        if offset < viewport_height * WAVE_SCROLL_FRACTION && self.wave.trigger() {
            self.wave_phase = 0.0;
            self.wave_cycles += 1;
            tracing::debug!(cycles = self.wave_cycles, "avatar wave");
        }
    }

    /// Stop every pending timer. Running windows close immediately and the
    /// blink schedule stays off.
    pub fn cancel_timers(&mut self) {
        self.blink_interval.cancel();
        self.blink.cancel();
        self.wave.cancel();
        self.interaction.cancel();
    }

    /// Current head (yaw, pitch), if the avatar has a head.
    pub fn head_angles(&self) -> Option<Vec2> {
        self.parts.head.map(|id| {
            let r = self.hierarchy.transform(id).rotation;
            Vec2::new(r.y, r.x)
        })
    }

    /// Vertical scale of the first eye present.
    pub fn eye_scale(&self) -> Option<f32> {
        self.parts
            .left_eye
            .or(self.parts.right_eye)
            .map(|id| self.hierarchy.transform(id).scale.y)
    }

    pub fn right_arm_rotation(&self) -> Option<Vec3> {
        self.parts
            .right_arm
            .map(|id| self.hierarchy.transform(id).rotation)
    }

    /// Height of the avatar root above its base.
    pub fn float_offset(&self) -> Option<f32> {
        self.parts
            .root
            .map(|id| self.hierarchy.transform(id).translation.y - self.base_translation.y)
    }

    pub fn is_blinking(&self) -> bool {
        self.blink.is_active()
    }

    pub fn is_waving(&self) -> bool {
        self.wave.is_active()
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction.is_active()
    }

    /// Seconds until the next blink.
    pub fn next_blink_in(&self) -> f32 {
        self.blink_interval.remaining()
    }

    /// Number of waves started so far.
    pub fn wave_cycles(&self) -> u32 {
        self.wave_cycles
    }

    /// Number of interaction pulses started so far.
    pub fn interaction_pulses(&self) -> u32 {
        self.interaction_pulses
    }

    pub fn glow(&self) -> &SceneLight {
        &self.glow
    }

    fn update_float(&mut self, delta: f32) {
        let Some(root) = self.parts.root else {
            return;
        };
        let offset = (self.float_phase * 1.5).sin() * 0.1;
        self.hierarchy.transform_mut(root).translation.y = self.base_translation.y + offset;
        self.float_phase += delta * 0.5;
    }

    fn update_head(&mut self, delta: f32) {
        let Some(head) = self.parts.head else {
            return;
        };
        let look = self
            .pointer
            .map(|p| p.look_at())
            .unwrap_or(DEFAULT_LOOK_AT);
        let head_pos = self.hierarchy.world_position(head);
        let dx = look.x - head_pos.x;
        let dy = look.y - head_pos.y;

        let target_yaw = (dx * 0.3).clamp(-YAW_LIMIT, YAW_LIMIT);
        let target_pitch = (-dy * 0.2).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let rate = delta * 3.0;

        let rotation = &mut self.hierarchy.transform_mut(head).rotation;
        rotation.y = damp(rotation.y, target_yaw, rate).clamp(-YAW_LIMIT, YAW_LIMIT);
        rotation.x = damp(rotation.x, target_pitch, rate).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn update_blink(&mut self, delta: f32) {
        self.blink.tick(delta);
        if self.blink_interval.tick(delta) {
            self.blink.trigger();
        }
        let closed = self.blink.is_active();
        for eye in [self.parts.left_eye, self.parts.right_eye].into_iter().flatten() {
            let scale = &mut self.hierarchy.transform_mut(eye).scale;
            scale.y = if closed {
                EYE_CLOSED
            } else {
                damp(scale.y, 1.0, delta * 8.0)
            };
        }
    }

    fn update_wave(&mut self, delta: f32) {
        self.wave.tick(delta);
        let Some(arm) = self.parts.right_arm else {
            return;
        };
        let rotation = &mut self.hierarchy.transform_mut(arm).rotation;
        if self.wave.is_active() {
            rotation.z = (self.wave_phase * 12.0).sin() * 0.3 + 0.7;
            rotation.y = (self.wave_phase * 6.0).sin() * 0.1;
            self.wave_phase += delta;
        } else {
            rotation.z = damp(rotation.z, 0.0, delta * 3.0);
            rotation.y = damp(rotation.y, 0.0, delta * 3.0);
        }
    }

    fn apply_emissive(&mut self) {
        let emissive = self.emissive.value();
        for material in self.hierarchy.materials_mut() {
            material.emissive = emissive;
        }
    }

    fn place_glow(&mut self) {
        self.glow.position = match self.parts.root {
            Some(root) => self.hierarchy.world_matrix(root).transform_point3(GLOW_OFFSET),
            None => GLOW_OFFSET,
        };
    }
}

impl Rig for AvatarRig {
    fn update(&mut self, frame: FrameTime, _theme: Theme) {
        let delta = frame.delta.max(0.0);
        self.interaction.tick(delta);
        self.update_float(delta);
        self.update_head(delta);
        self.update_blink(delta);
        self.update_wave(delta);

        self.glow.advance(delta);
        if !self.emissive.is_settled() {
            self.emissive.advance(delta);
            self.apply_emissive();
        }
        self.place_glow();
    }

    fn theme_changed(&mut self, theme: Theme) {
        self.glow.retarget(theme);
        self.emissive.retarget(theme);
    }
}

/// The default avatar: capsule body, spherical head with eyes and mouth, two
/// arms, two legs, and a glowing platform.
pub fn build_hierarchy(base: Vec3, scale: f32) -> Hierarchy {
    let suit = Material::standard(Rgb::hex(0x6930c3)).surface(0.3, 0.7);
    let skin = Material::standard(Rgb::hex(0xffd166)).surface(0.1, 0.6);
    let ink = Material::standard(Rgb::BLACK);
    let denim = Material::standard(Rgb::hex(0x4ea8de)).surface(0.2, 0.8);
    let at = Transform::from_translation;

    let mut h = Hierarchy::new();
    let root = h.group(None, "Avatar", at(base).with_scale(scale));
    let character = h.group(Some(root), "Character", Transform::IDENTITY);

    h.add(
        Some(character),
        "Body",
        Shape::Capsule {
            radius: 0.5,
            length: 1.0,
        },
        Transform::IDENTITY,
        Some(suit),
    );

    let head = h.group(Some(character), "Head", at(Vec3::new(0.0, 1.0, 0.0)));
    h.add(Some(head), "Face", Shape::Sphere { radius: 0.4 }, Transform::IDENTITY, Some(skin));
    h.add(
        Some(head),
        "RightEye",
        Shape::Sphere { radius: 0.08 },
        at(Vec3::new(0.15, 0.1, 0.35)),
        Some(ink),
    );
    h.add(
        Some(head),
        "LeftEye",
        Shape::Sphere { radius: 0.08 },
        at(Vec3::new(-0.15, 0.1, 0.35)),
        Some(ink),
    );
    h.add(
        Some(head),
        "Mouth",
        Shape::Cuboid {
            size: Vec3::new(0.2, 0.05, 0.05),
        },
        at(Vec3::new(0.0, -0.1, 0.35)),
        Some(ink),
    );

    let arm_shape = Shape::Capsule {
        radius: 0.2,
        length: 0.8,
    };
    let left_arm = h.group(
        Some(character),
        "LeftArm",
        at(Vec3::new(-0.7, 0.0, 0.0)).with_rotation(Vec3::new(0.0, 0.0, -FRAC_PI_4)),
    );
    h.add(Some(left_arm), "LeftSleeve", arm_shape, Transform::IDENTITY, Some(suit));
    let right_arm = h.group(
        Some(character),
        "RightArm",
        at(Vec3::new(0.7, 0.0, 0.0)).with_rotation(Vec3::new(0.0, 0.0, FRAC_PI_4)),
    );
    h.add(Some(right_arm), "RightSleeve", arm_shape, Transform::IDENTITY, Some(suit));

    let leg_shape = Shape::Capsule {
        radius: 0.25,
        length: 0.8,
    };
    h.add(Some(character), "LeftLeg", leg_shape, at(Vec3::new(-0.3, -1.0, 0.0)), Some(denim));
    h.add(Some(character), "RightLeg", leg_shape, at(Vec3::new(0.3, -1.0, 0.0)), Some(denim));

    h.add(
        Some(root),
        "Platform",
        Shape::Cylinder {
            radius: 2.0,
            height: 0.1,
        },
        at(Vec3::new(0.0, -2.0, 0.0)),
        Some(
            Material::standard(Rgb::hex(0x80ffdb))
                .surface(0.5, 0.3)
                .glow(Rgb::hex(0x80ffdb), 0.5),
        ),
    );
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 0.01;

    fn rig() -> AvatarRig {
        AvatarRig::new(LayoutProfile::Desktop, Theme::Dark, 42)
    }

    fn step(rig: &mut AvatarRig, frames: usize, dt: f32) {
        for _ in 0..frames {
            rig.update(FrameTime::new(0.0, dt), Theme::Dark);
        }
    }

    #[test]
    fn test_parts_resolve_on_default_hierarchy() {
        let parts = rig().parts();
        assert!(parts.root.is_some());
        assert!(parts.head.is_some());
        assert!(parts.left_eye.is_some());
        assert!(parts.right_eye.is_some());
        assert!(parts.right_arm.is_some());
    }

    #[test]
    fn test_head_turns_toward_pointer_within_limits() {
        let mut rig = rig();
        rig.on_pointer(PointerTarget {
            ndc: Vec2::new(5.0, 0.0),
        });
        step(&mut rig, 500, DT);
        let angles = rig.head_angles().unwrap();
        assert!((angles.x - YAW_LIMIT).abs() < 1e-3, "yaw {}", angles.x);
        assert!(angles.y.abs() <= PITCH_LIMIT);
    }

    #[test]
    fn test_blink_closes_for_window_then_reopens() {
        let mut rig = rig();
        let first = rig.next_blink_in();
        assert!((BLINK_INTERVAL_MIN..BLINK_INTERVAL_MAX).contains(&first));

        let mut frames = 0;
        while !rig.is_blinking() {
            step(&mut rig, 1, DT);
            frames += 1;
            assert!(frames < 800, "blink never fired");
        }
        let fired_at = frames as f32 * DT;
        assert!((fired_at - first).abs() <= DT + 1e-3);

        let mut closed_frames = 0;
        while rig.is_blinking() {
            assert_eq!(rig.eye_scale(), Some(EYE_CLOSED));
            step(&mut rig, 1, DT);
            closed_frames += 1;
        }
        assert!((19..=21).contains(&closed_frames), "closed for {closed_frames} frames");

        let mut previous = rig.eye_scale().unwrap();
        for _ in 0..100 {
            step(&mut rig, 1, DT);
            let now = rig.eye_scale().unwrap();
            assert!(now >= previous);
            previous = now;
        }
        assert!(1.0 - previous < 1e-3, "eye scale {previous}");
    }

    #[test]
    fn test_same_seed_same_blinks() {
        assert_eq!(rig().next_blink_in(), rig().next_blink_in());
    }

    #[test]
    fn test_wave_debounce() {
        let mut rig = rig();
        let vh = 24.0;
        rig.on_scroll(0.0, vh);
        assert!(rig.is_waving());
        step(&mut rig, 100, DT);
        rig.on_scroll(1.0, vh);
        assert_eq!(rig.wave_cycles(), 1);

        let z = rig.right_arm_rotation().unwrap().z;
        assert!((0.4..=1.0).contains(&z));

        step(&mut rig, 160, DT);
        assert!(!rig.is_waving());
        rig.on_scroll(0.0, vh);
        assert_eq!(rig.wave_cycles(), 2);
    }

    #[test]
    fn test_wave_requires_top_of_page() {
        let mut rig = rig();
        rig.on_scroll(24.0 * 0.3, 24.0);
        assert_eq!(rig.wave_cycles(), 0);
        assert!(!rig.is_waving());
    }

    #[test]
    fn test_arm_eases_to_zero_after_wave() {
        let mut rig = rig();
        rig.on_scroll(0.0, 24.0);
        step(&mut rig, 160, DT);
        assert!(rig.right_arm_rotation().unwrap().z > 0.3);
        step(&mut rig, 100, DT);
        assert!(!rig.is_waving());
        step(&mut rig, 400, DT);
        let rot = rig.right_arm_rotation().unwrap();
        assert!(rot.z.abs() < 1e-3, "z {}", rot.z);
        assert!(rot.y.abs() < 1e-3, "y {}", rot.y);
    }

    #[test]
    fn test_interaction_debounce() {
        let mut rig = rig();
        let near = PointerTarget {
            ndc: Vec2::new(0.1, 0.1),
        };
        rig.on_pointer(near);
        rig.on_pointer(near);
        assert_eq!(rig.interaction_pulses(), 1);
        step(&mut rig, 150, DT);
        rig.on_pointer(near);
        assert_eq!(rig.interaction_pulses(), 1);
        step(&mut rig, 60, DT);
        assert!(!rig.is_interacting());
        rig.on_pointer(near);
        assert_eq!(rig.interaction_pulses(), 2);

        let far = PointerTarget {
            ndc: Vec2::new(0.9, 0.0),
        };
        step(&mut rig, 250, DT);
        rig.on_pointer(far);
        assert_eq!(rig.interaction_pulses(), 2);
    }

    #[test]
    fn test_float_is_independent_of_wave() {
        let mut waving = rig();
        let mut still = rig();
        waving.on_scroll(0.0, 24.0);
        for _ in 0..120 {
            step(&mut waving, 1, DT);
            step(&mut still, 1, DT);
            assert_eq!(waving.float_offset(), still.float_offset());
        }
        let expected = ((119.0 * DT * 0.5) * 1.5f32).sin() * 0.1;
        assert!((still.float_offset().unwrap() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_missing_parts_are_skipped() {
        let mut h = Hierarchy::new();
        let root = h.group(None, "Avatar", Transform::IDENTITY);
        h.add(
            Some(root),
            "LeftEye",
            Shape::Sphere { radius: 0.1 },
            Transform::IDENTITY,
            Some(Material::standard(Rgb::BLACK)),
        );
        let mut rig = AvatarRig::from_hierarchy(h, Theme::Light, 1);
        rig.on_scroll(0.0, 24.0);
        rig.on_pointer(PointerTarget::default());
        step(&mut rig, 1000, DT);

        assert_eq!(rig.head_angles(), None);
        assert_eq!(rig.right_arm_rotation(), None);
        assert!(rig.eye_scale().is_some());
        assert!(rig.float_offset().is_some());
    }

    #[test]
    fn test_theme_change_eases_glow() {
        let mut rig = rig();
        assert_eq!(rig.glow().intensity(), 1.5);
        rig.theme_changed(Theme::Light);
        step(&mut rig, 10, DT);
        let mid = rig.glow().intensity();
        assert!(mid < 1.5 && mid > 0.8);
        step(&mut rig, 50, DT);
        assert_eq!(rig.glow().intensity(), 0.8);
        assert_eq!(rig.glow().color(), Rgb::new(0.9, 0.8, 0.7));
    }

    #[test]
    fn test_cancel_timers_stops_blinking() {
        let mut rig = rig();
        rig.on_scroll(0.0, 24.0);
        rig.cancel_timers();
        assert!(!rig.is_waving());
        step(&mut rig, 1000, DT);
        assert!(!rig.is_blinking());
    }

    proptest! {
        #[test]
        fn test_head_stays_clamped(
            x in -1.0e6f32..1.0e6,
            y in -1.0e6f32..1.0e6,
            deltas in prop::collection::vec(0.0f32..10.0, 1..50),
        ) {
            let mut rig = rig();
            rig.on_pointer(PointerTarget { ndc: Vec2::new(x, y) });
            for delta in deltas {
                rig.update(FrameTime::new(0.0, delta), Theme::Dark);
                let angles = rig.head_angles().unwrap();
                prop_assert!(angles.x.abs() <= YAW_LIMIT);
                prop_assert!(angles.y.abs() <= PITCH_LIMIT);
            }
        }
    }
}
