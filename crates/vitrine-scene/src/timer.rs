//! Frame-driven timers.
//!
//! Timers are plain values advanced by the owning rig's frame delta. They
//! have no background callbacks, so dropping the rig drops them too.

use rand::Rng;
use rand_pcg::Pcg32;

/// A fixed-length window that ignores triggers while open.
#[derive(Debug, Clone, PartialEq)]
pub struct Hold {
    duration: f32,
    remaining: f32,
}

impl Hold {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
        }
    }

    /// Open the window. Returns false, leaving the window untouched, if it is
    /// already open.
    pub fn trigger(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.remaining = self.duration;
        true
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta.max(0.0)).max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }
}

/// A repeating timer whose period is redrawn uniformly from `min..max`
/// every cycle.
#[derive(Debug, Clone)]
pub struct RandomInterval {
    min: f32,
    max: f32,
    remaining: f32,
    rng: Pcg32,
    armed: bool,
}

impl RandomInterval {
    pub fn new(min: f32, max: f32, mut rng: Pcg32) -> Self {
        let remaining = draw(&mut rng, min, max);
        Self {
            min,
            max,
            remaining,
            rng,
            armed: true,
        }
    }

    /// Seconds until the next firing.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advance by `delta`. Returns true if the timer fired during this step;
    /// it re-arms itself with a fresh period.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining -= delta.max(0.0);
        if self.remaining > 0.0 {
            return false;
        }
        // Carry the overshoot; at most one firing per step.
        let next = draw(&mut self.rng, self.min, self.max);
        self.remaining = (self.remaining + next).max(f32::EPSILON);
        true
    }

    /// Stop firing for good.
    pub fn cancel(&mut self) {
        self.armed = false;
    }
}

fn draw(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{BLINK_STREAM, create_rng};

    #[test]
    fn test_hold_debounces() {
        let mut hold = Hold::new(2.0);
        assert!(hold.trigger());
        hold.tick(1.0);
        assert!(!hold.trigger());
        assert!(hold.is_active());
        hold.tick(1.0);
        assert!(!hold.is_active());
        assert!(hold.trigger());
    }

    #[test]
    fn test_hold_cancel_closes_window() {
        let mut hold = Hold::new(0.5);
        hold.trigger();
        hold.tick(0.25);
        hold.cancel();
        assert!(!hold.is_active());
        assert!(hold.trigger());
    }

    #[test]
    fn test_interval_period_within_bounds() {
        let mut interval = RandomInterval::new(3.0, 7.0, create_rng(9, BLINK_STREAM));
        for _ in 0..50 {
            let period = interval.remaining();
            assert!((3.0..7.0).contains(&period), "period {period}");
            assert!(interval.tick(period));
        }
    }

    #[test]
    fn test_interval_cancel() {
        let mut interval = RandomInterval::new(1.0, 1.0, create_rng(1, BLINK_STREAM));
        interval.cancel();
        assert!(!interval.tick(10.0));
        assert!(!interval.tick(10.0));
    }
}
