//! Theme-driven lights and material values.
//!
//! Every themed quantity keeps a light-theme and a dark-theme constant and
//! eases between them over [`THEME_TRANSITION`] seconds when the theme flips.

use vitrine_core::{Ease, FrameTime, Rgb, Theme, Tween, Vec3};

use crate::Rig;

/// Length of every theme transition, in seconds.
pub const THEME_TRANSITION: f32 = 0.5;

/// A scalar with one target per theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemedScalar {
    light: f32,
    dark: f32,
    tween: Tween,
}

impl ThemedScalar {
    /// Start settled on the value for `theme`.
    pub fn new(light: f32, dark: f32, theme: Theme) -> Self {
        Self {
            light,
            dark,
            tween: Tween::new(theme.pick(light, dark), THEME_TRANSITION, Ease::QuadOut),
        }
    }

    pub fn retarget(&mut self, theme: Theme) {
        self.tween.retarget(theme.pick(self.light, self.dark));
    }

    pub fn advance(&mut self, delta: f32) -> f32 {
        self.tween.advance(delta)
    }

    pub fn value(&self) -> f32 {
        self.tween.value()
    }

    pub fn is_settled(&self) -> bool {
        self.tween.is_settled()
    }
}

/// A colour with one target per theme, eased channel by channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemedColor {
    light: Rgb,
    dark: Rgb,
    channels: [Tween; 3],
}

impl ThemedColor {
    pub fn new(light: Rgb, dark: Rgb, theme: Theme) -> Self {
        let start = theme.pick(light, dark);
        let tween = |v| Tween::new(v, THEME_TRANSITION, Ease::QuadOut);
        Self {
            light,
            dark,
            channels: [tween(start.r), tween(start.g), tween(start.b)],
        }
    }

    pub fn retarget(&mut self, theme: Theme) {
        let target = theme.pick(self.light, self.dark);
        self.channels[0].retarget(target.r);
        self.channels[1].retarget(target.g);
        self.channels[2].retarget(target.b);
    }

    pub fn advance(&mut self, delta: f32) -> Rgb {
        for channel in &mut self.channels {
            channel.advance(delta);
        }
        self.value()
    }

    pub fn value(&self) -> Rgb {
        Rgb::new(
            self.channels[0].value(),
            self.channels[1].value(),
            self.channels[2].value(),
        )
    }

    pub fn is_settled(&self) -> bool {
        self.channels.iter().all(Tween::is_settled)
    }
}

/// What sort of light a [`SceneLight`] is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Spot { angle: f32, penumbra: f32 },
    Point { distance: f32 },
}

/// One light with themed intensity and colour.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLight {
    pub name: &'static str,
    pub kind: LightKind,
    pub position: Vec3,
    intensity: ThemedScalar,
    color: ThemedColor,
}

impl SceneLight {
    pub fn new(
        name: &'static str,
        kind: LightKind,
        position: Vec3,
        intensity: (f32, f32),
        color: (Rgb, Rgb),
        theme: Theme,
    ) -> Self {
        Self {
            name,
            kind,
            position,
            intensity: ThemedScalar::new(intensity.0, intensity.1, theme),
            color: ThemedColor::new(color.0, color.1, theme),
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity.value()
    }

    pub fn color(&self) -> Rgb {
        self.color.value()
    }

    pub fn retarget(&mut self, theme: Theme) {
        self.intensity.retarget(theme);
        self.color.retarget(theme);
    }

    pub fn advance(&mut self, delta: f32) {
        self.intensity.advance(delta);
        self.color.advance(delta);
    }

    pub fn is_settled(&self) -> bool {
        self.intensity.is_settled() && self.color.is_settled()
    }
}

/// The scene's global lights.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingRig {
    lights: Vec<SceneLight>,
}

impl LightingRig {
    pub fn new(lights: Vec<SceneLight>) -> Self {
        Self { lights }
    }

    /// Ambient, key spot and two coloured fill lights.
    pub fn scene_default(theme: Theme) -> Self {
        Self::new(vec![
            SceneLight::new(
                "ambient",
                LightKind::Ambient,
                Vec3::ZERO,
                (0.7, 0.5),
                (Rgb::hex(0xffffff), Rgb::hex(0x6930c3)),
                theme,
            ),
            SceneLight::new(
                "spot",
                LightKind::Spot {
                    angle: 0.12,
                    penumbra: 1.0,
                },
                Vec3::new(10.0, 20.0, 10.0),
                (0.8, 1.0),
                (Rgb::hex(0xf8f9fa), Rgb::hex(0xffffff)),
                theme,
            ),
            SceneLight::new(
                "fill-blue",
                LightKind::Point { distance: 0.0 },
                Vec3::new(-10.0, 5.0, -10.0),
                (0.6, 1.5),
                (Rgb::hex(0x3b82f6), Rgb::hex(0x4ea8de)),
                theme,
            ),
            SceneLight::new(
                "fill-mint",
                LightKind::Point { distance: 0.0 },
                Vec3::new(10.0, -5.0, -5.0),
                (0.6, 1.5),
                (Rgb::hex(0x10b981), Rgb::hex(0x80ffdb)),
                theme,
            ),
        ])
    }

    pub fn lights(&self) -> &[SceneLight] {
        &self.lights
    }

    pub fn light(&self, name: &str) -> Option<&SceneLight> {
        self.lights.iter().find(|l| l.name == name)
    }

    /// Sum of ambient contributions, used as the flat base term when shading.
    pub fn ambient(&self) -> Rgb {
        self.lights
            .iter()
            .filter(|l| l.kind == LightKind::Ambient)
            .fold(Rgb::BLACK, |acc, l| acc.add(l.color().scale(l.intensity())))
    }

    pub fn is_settled(&self) -> bool {
        self.lights.iter().all(SceneLight::is_settled)
    }
}

impl Rig for LightingRig {
    fn update(&mut self, frame: FrameTime, _theme: Theme) {
        for light in &mut self.lights {
            light.advance(frame.delta);
        }
    }

    fn theme_changed(&mut self, theme: Theme) {
        for light in &mut self.lights {
            light.retarget(theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn step(rig: &mut LightingRig, frames: usize) {
        for _ in 0..frames {
            rig.update(FrameTime::new(0.0, DT), Theme::Dark);
        }
    }

    #[test]
    fn test_light_to_dark_is_monotonic_and_completes() {
        let mut rig = LightingRig::scene_default(Theme::Light);
        assert_eq!(rig.light("fill-blue").unwrap().intensity(), 0.6);

        rig.theme_changed(Theme::Dark);
        let mut previous: Vec<f32> = rig.lights().iter().map(SceneLight::intensity).collect();
        // 0.5s at 60 fps, plus one frame of slack for rounding.
        for _ in 0..31 {
            step(&mut rig, 1);
            for (light, prev) in rig.lights().iter().zip(previous.iter_mut()) {
                let now = light.intensity();
                let (lo, hi) = if light.name == "ambient" { (0.5, 0.7) } else { (0.6, 1.5) };
                assert!(now >= lo - 1e-6 && now <= hi + 1e-6, "{} out of range", light.name);
                if light.name == "ambient" {
                    assert!(now <= *prev + 1e-6, "ambient should fall");
                } else {
                    assert!(now >= *prev - 1e-6, "{} should rise", light.name);
                }
                *prev = now;
            }
        }
        assert!(rig.is_settled());
        assert_eq!(rig.light("fill-mint").unwrap().intensity(), 1.5);
        assert_eq!(rig.light("ambient").unwrap().color(), Rgb::hex(0x6930c3));
    }

    #[test]
    fn test_toggle_back_mid_transition_does_not_jump() {
        let mut rig = LightingRig::scene_default(Theme::Light);
        rig.theme_changed(Theme::Dark);
        step(&mut rig, 10);
        let mid = rig.light("spot").unwrap().intensity();
        assert!(mid > 0.8 && mid < 1.0);

        rig.theme_changed(Theme::Light);
        step(&mut rig, 1);
        let after = rig.light("spot").unwrap().intensity();
        assert!((after - mid).abs() < 0.02, "jumped from {mid} to {after}");
        assert!(after <= mid);

        step(&mut rig, 40);
        assert_eq!(rig.light("spot").unwrap().intensity(), 0.8);
    }

    #[test]
    fn test_themed_color_settles_on_target() {
        let mut color = ThemedColor::new(Rgb::hex(0x10b981), Rgb::hex(0x88ff88), Theme::Dark);
        color.retarget(Theme::Light);
        assert!(!color.is_settled());
        for _ in 0..40 {
            color.advance(DT);
        }
        assert_eq!(color.value(), Rgb::hex(0x10b981));
    }
}
