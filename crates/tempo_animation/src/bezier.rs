//! Unit cubic bezier timing curves
//!
//! A timing curve is a cubic bezier whose endpoints are pinned at (0,0) and
//! (1,1). The two free control points shape how elapsed-time fraction maps to
//! progress fraction (matches CSS `cubic-bezier()` / platform timing curves).

use serde::{Deserialize, Serialize};

/// Newton-Raphson iterations before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;
/// Bisection halvings before giving up (2^-60 is far below f64 noise on [0,1])
const BISECTION_ITERATIONS: usize = 60;
/// Acceptable error in x when solving for the curve parameter
const SOLVE_EPSILON: f64 = 1e-7;
/// Below this slope Newton steps are unreliable
const MIN_SLOPE: f64 = 1e-7;

/// A cubic bezier timing curve with fixed endpoints (0,0) and (1,1)
///
/// Control points are stored exactly as given. Points outside `[0, 1]` are
/// accepted; the resulting curve may not be monotonic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct UnitBezier {
    p1x: f64,
    p1y: f64,
    p2x: f64,
    p2y: f64,
    x: Polynomial,
    y: Polynomial,
}

/// Horner coefficients of one axis: ((a·t + b)·t + c)·t
#[derive(Clone, Copy, Debug, PartialEq)]
struct Polynomial {
    a: f64,
    b: f64,
    c: f64,
}

impl Polynomial {
    fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        Self { a, b, c }
    }

    /// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
    #[inline]
    fn sample(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    /// B'(t)
    #[inline]
    fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

impl UnitBezier {
    /// Create a curve from its two control points `(p1x, p1y)` and `(p2x, p2y)`
    pub fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        Self {
            p1x,
            p1y,
            p2x,
            p2y,
            x: Polynomial::new(p1x, p2x),
            y: Polynomial::new(p1y, p2y),
        }
    }

    /// The identity curve
    pub fn linear() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// CSS `ease`
    pub fn ease() -> Self {
        Self::new(0.25, 0.1, 0.25, 1.0)
    }

    /// CSS `ease-in`
    pub fn ease_in() -> Self {
        Self::new(0.42, 0.0, 1.0, 1.0)
    }

    /// CSS `ease-out`
    pub fn ease_out() -> Self {
        Self::new(0.0, 0.0, 0.58, 1.0)
    }

    /// CSS `ease-in-out`
    pub fn ease_in_out() -> Self {
        Self::new(0.42, 0.0, 0.58, 1.0)
    }

    /// Look up a curve by its CSS keyword (`"ease-in-out"`, `"linear"`, ...)
    ///
    /// Underscores are accepted in place of dashes.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "linear" => Some(Self::linear()),
            "ease" => Some(Self::ease()),
            "ease-in" => Some(Self::ease_in()),
            "ease-out" => Some(Self::ease_out()),
            "ease-in-out" => Some(Self::ease_in_out()),
            _ => None,
        }
    }

    /// The control points as `(p1x, p1y, p2x, p2y)`, exactly as constructed
    pub fn control_points(&self) -> (f64, f64, f64, f64) {
        (self.p1x, self.p1y, self.p2x, self.p2y)
    }

    /// Map a progress fraction `x` through the curve
    ///
    /// `x <= 0` returns `0` and `x >= 1` returns `1` without iterating.
    pub fn solve(&self, x: f64) -> f64 {
        // Endpoints are always exact
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let t = self.solve_curve_x(x);
        self.y.sample(t)
    }

    /// Find the curve parameter `t` where X(t) == x
    fn solve_curve_x(&self, x: f64) -> f64 {
        // X is close to identity for typical easing curves, so x is a good guess
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.x.sample(t) - x;
            if err.abs() < SOLVE_EPSILON {
                return t;
            }
            let slope = self.x.slope(t);
            if slope.abs() < MIN_SLOPE {
                break;
            }
            t -= err / slope;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }

        // Bisection always converges on a monotonic X
        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let val = self.x.sample(t);
            if (val - x).abs() < SOLVE_EPSILON {
                break;
            }
            if val < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }
}

impl Default for UnitBezier {
    fn default() -> Self {
        Self::ease()
    }
}

impl From<[f64; 4]> for UnitBezier {
    fn from([p1x, p1y, p2x, p2y]: [f64; 4]) -> Self {
        Self::new(p1x, p1y, p2x, p2y)
    }
}

impl From<(f64, f64, f64, f64)> for UnitBezier {
    fn from((p1x, p1y, p2x, p2y): (f64, f64, f64, f64)) -> Self {
        Self::new(p1x, p1y, p2x, p2y)
    }
}

impl From<UnitBezier> for [f64; 4] {
    fn from(curve: UnitBezier) -> Self {
        [curve.p1x, curve.p1y, curve.p2x, curve.p2y]
    }
}
