//! Interpolation helpers and a small fixed-duration tween.

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Exponential smoothing of `current` toward `target`.
///
/// `rate` is usually `delta * k`; it is clamped to `0.0..=1.0` so a long frame
/// lands on the target instead of overshooting it.
pub fn damp(current: f32, target: f32, rate: f32) -> f32 {
    lerp(current, target, rate.clamp(0.0, 1.0))
}

/// Easing curves for [`Tween`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, the default for theme transitions.
    #[default]
    QuadOut,
}

impl Ease {
    /// Map linear progress `t` in `0.0..=1.0` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// A scalar that eases from its current value to a target over a fixed
/// duration.
///
/// Retargeting mid-flight restarts the clock from the current value, so the
/// output never jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    value: f32,
    elapsed: f32,
    duration: f32,
    ease: Ease,
}

impl Tween {
    /// A settled tween resting at `value`.
    pub fn new(value: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from: value,
            to: value,
            value,
            elapsed: duration,
            duration,
            ease,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Start easing toward `to` from wherever the value is now.
    pub fn retarget(&mut self, to: f32) {
        if to == self.to {
            return;
        }
        self.from = self.value;
        self.to = to;
        self.elapsed = 0.0;
    }

    /// Advance by `delta` seconds and return the new value.
    pub fn advance(&mut self, delta: f32) -> f32 {
        if self.is_settled() || self.duration <= 0.0 {
            self.elapsed = self.duration;
            self.value = self.to;
            return self.value;
        }
        self.elapsed = (self.elapsed + delta.max(0.0)).min(self.duration);
        self.value = if self.elapsed >= self.duration {
            self.to
        } else {
            lerp(self.from, self.to, self.ease.apply(self.elapsed / self.duration))
        };
        self.value
    }
}
