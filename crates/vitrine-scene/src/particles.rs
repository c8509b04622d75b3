//! Floating code-label particles.
//!
//! Each particle follows a closed-form orbit of its accumulated phase `t`:
//! `x = cos(t)·xf`, `y = sin(t)·yf`, `z = cos(t)·zf`, with a scale pulse of
//! `cos(t·factor)·0.2 + 0.8`. Randomness is drawn once at construction.

use rand::Rng;
use vitrine_core::{FrameTime, Rgb, Theme, Transform, Vec3};

use crate::Rig;
use crate::rng::{PARTICLE_STREAM, create_rng};

/// Labels drawn on the particles.
pub const CODE_SNIPPETS: &[&str] = &[
    "const", "let", "fn", "return", "if", "else", "for", "while", "impl", "pub", "struct",
    "trait", "type", "enum", "match", "mut", "async", "await", "mod", "use", "Self",
    "<div>", "</div>", "<span>", "<p>", "<h1>", "props", "{}", "[]", "()", "=>", "==", "!=",
    "&&", "||", "?", "+", "-", "*", "/",
];

/// Particle speeds are expressed per frame at this rate.
const REFERENCE_FPS: f64 = 60.0;

/// Fixed per-particle parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDescriptor {
    /// Initial phase.
    pub time: f64,
    /// Frequency multiplier of the scale pulse.
    pub factor: f32,
    /// Phase advance per reference frame.
    pub speed: f32,
    pub x_factor: f32,
    pub y_factor: f32,
    pub z_factor: f32,
    /// Index into [`CODE_SNIPPETS`].
    pub label: usize,
}

impl ParticleDescriptor {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            time: rng.gen_range(0.0..100.0),
            factor: rng.gen_range(20.0..120.0),
            speed: rng.gen_range(0.005..0.01),
            x_factor: rng.gen_range(-40.0..40.0),
            y_factor: rng.gen_range(-25.0..25.0),
            z_factor: rng.gen_range(-40.0..40.0),
            label: rng.gen_range(0..CODE_SNIPPETS.len()),
        }
    }

    /// Transform at phase `t`.
    pub fn pose(&self, t: f64) -> Transform {
        let (sin, cos) = t.sin_cos();
        let scale = ((t * self.factor as f64).cos() * 0.2 + 0.8) as f32;
        Transform {
            translation: Vec3::new(
                (cos * self.x_factor as f64) as f32,
                (sin * self.y_factor as f64) as f32,
                (cos * self.z_factor as f64) as f32,
            ),
            rotation: Vec3::new((t * 0.1) as f32, (t * 0.2) as f32, (t * 0.05) as f32),
            scale: Vec3::splat(scale),
        }
    }
}

/// One animated label.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    descriptor: ParticleDescriptor,
    phase: f64,
    transform: Transform,
}

impl Particle {
    pub fn new(descriptor: ParticleDescriptor) -> Self {
        Self {
            phase: descriptor.time,
            transform: descriptor.pose(descriptor.time),
            descriptor,
        }
    }

    pub fn descriptor(&self) -> &ParticleDescriptor {
        &self.descriptor
    }

    /// Accumulated phase; only ever grows.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn label(&self) -> &'static str {
        CODE_SNIPPETS[self.descriptor.label % CODE_SNIPPETS.len()]
    }

    fn advance(&mut self, delta: f32) {
        self.phase += self.descriptor.speed as f64 * delta.max(0.0) as f64 * REFERENCE_FPS;
        self.transform = self.descriptor.pose(self.phase);
    }
}

/// Fixed-size collection of floating labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    opacity: f32,
    color: Rgb,
}

impl ParticleField {
    pub fn new(count: usize, seed: u64, theme: Theme) -> Self {
        let mut rng = create_rng(seed, PARTICLE_STREAM);
        let particles = (0..count)
            .map(|_| Particle::new(ParticleDescriptor::random(&mut rng)))
            .collect();
        tracing::info!(count, seed, "particle field created");
        Self {
            particles,
            opacity: Self::opacity_for(theme),
            color: Self::label_color(theme),
        }
    }

    /// Label opacity for a theme.
    pub fn opacity_for(theme: Theme) -> f32 {
        theme.pick(0.6, 0.8)
    }

    pub fn label_color(theme: Theme) -> Rgb {
        theme.pick(Rgb::hex(0x10b981), Rgb::hex(0x88ff88))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

impl Rig for ParticleField {
    fn update(&mut self, frame: FrameTime, theme: Theme) {
        for particle in &mut self.particles {
            particle.advance(frame.delta);
        }
        self.opacity = Self::opacity_for(theme);
        self.color = Self::label_color(theme);
    }
}
