//! Timing-curve animations
//!
//! [`BasicAnimation`] moves a value from `from` to `to` over a fixed duration.
//! The elapsed-time fraction is remapped through a [`UnitBezier`] before
//! interpolating. It holds no observer list; callers poll `value()` and
//! `is_finished()` after each `advance`, or wrap it in an
//! [`AnyAnimation`](crate::AnyAnimation) to get a change stream.

use crate::animation::Animation;
use crate::bezier::UnitBezier;
use crate::values::Interpolate;

/// A duration-bounded animation driven by a cubic-bezier timing curve
#[derive(Clone, Debug, PartialEq)]
pub struct BasicAnimation<T: Interpolate> {
    from: T,
    to: T,
    /// Duration in seconds
    duration: f64,
    /// Elapsed time in seconds, never beyond `duration`
    elapsed: f64,
    curve: UnitBezier,
}

impl<T: Interpolate> BasicAnimation<T> {
    /// Create an animation from `from` to `to` lasting `duration` seconds
    ///
    /// A non-positive duration is finished immediately and reports `to`.
    pub fn new(from: T, to: T, duration: f64, curve: UnitBezier) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            curve,
        }
    }

    /// Create an animation with the identity curve
    pub fn linear(from: T, to: T, duration: f64) -> Self {
        Self::new(from, to, duration, UnitBezier::linear())
    }

    pub fn from_value(&self) -> &T {
        &self.from
    }

    pub fn to_value(&self) -> &T {
        &self.to
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn curve(&self) -> &UnitBezier {
        &self.curve
    }

    /// Elapsed fraction of the duration (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Get the current interpolated value
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to.clone();
        }
        let eased = self.curve.solve(self.progress());
        self.from.lerp(&self.to, eased)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance the animation by `dt` seconds
    ///
    /// Negative and non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f64) {
        if !dt.is_finite() {
            tracing::warn!(dt, "ignoring non-finite animation step");
            return;
        }
        if dt <= 0.0 || self.is_finished() {
            return;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

impl<T: Interpolate> Animation for BasicAnimation<T> {
    type Value = T;

    fn value(&self) -> T {
        BasicAnimation::value(self)
    }

    fn is_finished(&self) -> bool {
        BasicAnimation::is_finished(self)
    }

    fn advance(&mut self, dt: f64) {
        BasicAnimation::advance(self, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_advance_reaches_end() {
        let mut anim = BasicAnimation::new(0.0, 10.0, 1.0, UnitBezier::ease_in_out());
        anim.advance(1.0);
        assert_eq!(anim.value(), 10.0);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_cumulative_advances_reach_end() {
        let mut anim = BasicAnimation::new(0.0, 10.0, 1.0, UnitBezier::ease());
        for _ in 0..4 {
            anim.advance(0.25);
        }
        assert_eq!(anim.value(), 10.0);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_half_advance_is_in_range() {
        let mut anim = BasicAnimation::new(0.0_f64, 10.0, 1.0, UnitBezier::ease_in_out());
        anim.advance(0.5);
        let v = anim.value();
        assert!((0.0..=10.0).contains(&v));
        assert!((v - 5.0).abs() < 1e-4);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let anim = BasicAnimation::new(3.0, 7.0, 0.0, UnitBezier::ease());
        assert!(anim.is_finished());
        assert_eq!(anim.value(), 7.0);
        assert_eq!(anim.progress(), 1.0);
    }

    #[test]
    fn test_negative_duration_finishes_immediately() {
        let anim = BasicAnimation::linear(3.0, 7.0, -1.0);
        assert!(anim.is_finished());
        assert_eq!(anim.value(), 7.0);
    }

    #[test]
    fn test_over_advance_does_not_overshoot() {
        let mut anim = BasicAnimation::new(0.0, 10.0, 1.0, UnitBezier::ease_out());
        anim.advance(0.75);
        anim.advance(5.0);
        assert_eq!(anim.elapsed(), 1.0);
        assert_eq!(anim.value(), 10.0);

        anim.advance(1.0);
        assert_eq!(anim.value(), 10.0);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_invalid_steps_are_ignored() {
        let mut anim = BasicAnimation::linear(0.0, 10.0, 1.0);
        anim.advance(0.5);
        anim.advance(f64::NAN);
        anim.advance(f64::INFINITY);
        anim.advance(-0.25);
        assert_eq!(anim.elapsed(), 0.5);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_finished_value_is_exact_target() {
        let mut anim = BasicAnimation::linear(0.1, 0.3, 0.2);
        anim.advance(0.1);
        anim.advance(0.1);
        assert!(anim.is_finished());
        assert_eq!(anim.value(), 0.3);
    }

    #[test]
    fn test_composite_values() {
        let mut anim = BasicAnimation::linear([0.0_f64, 100.0], [10.0, 0.0], 2.0);
        anim.advance(1.0);
        let [x, y] = anim.value();
        assert!((x - 5.0).abs() < 1e-5);
        assert!((y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_overshooting_curve_leaves_range() {
        let back = UnitBezier::new(0.34, 1.56, 0.64, 1.0);
        let mut anim = BasicAnimation::new(0.0, 100.0, 1.0, back);
        let mut peak = 0.0_f64;
        for _ in 0..61 {
            anim.advance(1.0 / 60.0);
            peak = peak.max(anim.value());
        }
        assert!(peak > 100.0);
        assert_eq!(anim.value(), 100.0);
    }
}
