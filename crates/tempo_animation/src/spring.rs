//! Spring physics animation
//!
//! Damped harmonic oscillator integrated with semi-implicit (symplectic)
//! Euler: velocity is updated from the current acceleration first, then
//! position moves with the new velocity. Large deltas are split into fixed
//! substeps so stiff springs stay stable when the host skips frames.

use serde::{Deserialize, Serialize};
use tempo_core::{Observable, Subscription};

use crate::animation::{Animation, AnimationEvent};

/// Largest single integration step in seconds
const MAX_STEP: f64 = 1.0 / 60.0;
/// Substeps per `advance` before steps grow beyond `MAX_STEP` (ten minutes)
const MAX_SUBSTEPS: usize = 36_000;
/// Default settle threshold for displacement and velocity
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Configuration for a spring animation
///
/// Tension and mass must be positive and damping non-negative. Other values
/// are not rejected here; they produce undefined (NaN or divergent) motion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Stiffness of the restoring force
    #[serde(alias = "stiffness")]
    pub tension: f64,
    /// Resistance proportional to velocity
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Displacement and speed below which the spring counts as settled
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_mass() -> f64 {
    1.0
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl SpringConfig {
    /// Create a new spring configuration with the default threshold
    pub fn new(tension: f64, damping: f64, mass: f64) -> Self {
        Self {
            tension,
            damping,
            mass,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Builder: set the settle threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// A gentle, slow spring (good for page transitions)
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// A wobbly spring with overshoot (good for playful UI)
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// A stiff, snappy spring (good for buttons)
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// A very stiff spring with minimal oscillation (good for quick responses)
    pub fn snappy() -> Self {
        Self::new(600.0, 40.0, 1.0)
    }

    /// A slow spring with no overshoot (critically damped)
    pub fn molasses() -> Self {
        Self::new(100.0, 20.0, 1.0)
    }

    /// Calculate critical damping for this spring's tension and mass
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.tension * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is critically damped (no oscillation, fastest settling)
    pub fn is_critically_damped(&self) -> bool {
        (self.damping - self.critical_damping()).abs() < 0.01
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// A spring-based animator
///
/// The spring pulls `value` toward `target`. Retargeting keeps the current
/// velocity, so interrupted motion stays continuous.
///
/// Cloning copies the physical state but not the observers: a clone starts
/// with an empty change stream.
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
    events: Observable<AnimationEvent<f64>>,
}

impl Spring {
    /// Create a spring at rest on `initial`
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            events: Observable::new(),
        }
    }

    /// Builder: start moving toward `target`
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Retarget the spring; velocity is preserved
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    /// Replace the configuration; takes effect on the next step
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Check if displacement and speed are both under the threshold
    pub fn is_settled(&self) -> bool {
        let threshold = self.config.threshold;
        self.velocity.abs() < threshold && (self.target - self.value).abs() < threshold
    }

    /// Exactly on target with no motion; stepping would change nothing
    fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Subscribe to value changes and settle notifications
    ///
    /// Every `advance` that moves the value publishes
    /// [`AnimationEvent::Changed`]. The step that brings the spring to rest
    /// additionally publishes [`AnimationEvent::Completed`], once per settle.
    pub fn observe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AnimationEvent<f64>) + 'static,
    {
        self.events.observe(callback)
    }

    /// Step the spring simulation by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        if !dt.is_finite() {
            tracing::warn!(dt, "ignoring non-finite spring step");
            return;
        }
        if dt <= 0.0 || self.is_at_rest() {
            return;
        }

        let start = self.value;
        // The whole of `dt` is always simulated
        let step = MAX_STEP.max(dt / MAX_SUBSTEPS as f64);
        let mut remaining = dt;

        let mut settled = false;
        while remaining > 0.0 {
            let h = remaining.min(step);
            remaining -= h;
            self.integrate(h);
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                settled = true;
                break;
            }
        }

        if self.value != start {
            self.events.publish(&AnimationEvent::Changed(self.value));
        }
        if settled {
            tracing::trace!(value = self.value, "spring settled");
            self.events.publish(&AnimationEvent::Completed(self.value));
        }
    }

    /// One semi-implicit Euler step
    fn integrate(&mut self, h: f64) {
        let acceleration = self.acceleration(self.value, self.velocity);
        self.velocity += acceleration * h;
        self.value += self.velocity * h;
    }

    fn acceleration(&self, x: f64, v: f64) -> f64 {
        let spring_force = -self.config.tension * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

impl Animation for Spring {
    type Value = f64;

    fn value(&self) -> f64 {
        self.value
    }

    /// Finished once snapped onto the target
    ///
    /// A spring placed within its threshold but not on the target is still
    /// unfinished, so the next `advance` snaps it and publishes `Completed`.
    fn is_finished(&self) -> bool {
        self.is_at_rest()
    }

    fn advance(&mut self, dt: f64) {
        Spring::advance(self, dt);
    }
}
