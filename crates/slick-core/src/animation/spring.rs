#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) motion.
//!
//! Springs drive the "lift" decorations of the slider thumb: on touch the
//! thumb and its drop shadow spring upward with a visible bounce.
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! Hosts usually think in terms of an approximate duration and a bounciness
//! rather than raw physics constants. [`SpringConfig::from_duration_and_bounciness`]
//! converts the pair:
//!
//! - the duration sets the natural period, `stiffness = (2π / duration)²`;
//! - bounciness in `[0, 20]` maps linearly onto a damping ratio from `1.0`
//!   (critically damped, no overshoot) down to `0.2` (visibly bouncy).
//!
//! # Invariants
//!
//! 1. Stiffness is at least [`MIN_STIFFNESS`]; damping is never negative.
//! 2. A spring at rest does not move until `set_target()`, `impulse()`, or
//!    `reset()` wakes it.
//! 3. Coming to rest snaps the position exactly onto the target.
//!
//! # Failure Modes
//!
//! - Large dt is subdivided into 4ms integration steps.
//! - Zero damping never settles; `is_at_rest()` may stay false forever.

use std::f64::consts::TAU;
use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring is considered at rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (combined with position) the spring is at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Upper end of the bounciness scale.
pub const MAX_BOUNCINESS: f64 = 20.0;

/// Physics constants for a [`Spring`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Restoring force strength.
    pub stiffness: f64,
    /// Velocity drag.
    pub damping: f64,
}

impl Default for SpringConfig {
    /// Slightly underdamped: stiffness 170, damping 26.
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 26.0,
        }
    }
}

impl SpringConfig {
    /// Derive constants from an approximate period and a bounciness in `[0, 20]`.
    #[must_use]
    pub fn from_duration_and_bounciness(duration: Duration, bounciness: f64) -> Self {
        let secs = duration.as_secs_f64().max(0.001);
        let stiffness = (TAU / secs).powi(2).max(MIN_STIFFNESS);
        let bounce = if bounciness.is_finite() {
            bounciness.clamp(0.0, MAX_BOUNCINESS) / MAX_BOUNCINESS
        } else {
            0.0
        };
        let ratio = 1.0 - 0.8 * bounce;
        Self {
            stiffness,
            damping: ratio * 2.0 * stiffness.sqrt(),
        }
    }

    /// Damping ratio relative to critical damping.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * self.stiffness.sqrt())
    }
}

/// A damped harmonic oscillator producing physically-based motion.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self::with_config(initial, target, SpringConfig::default())
    }

    /// Create a spring with explicit physics constants.
    #[must_use]
    pub fn with_config(initial: f64, target: f64, config: SpringConfig) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: config.stiffness.max(MIN_STIFFNESS),
            damping: config.damping.max(0.0),
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    /// Set the rest threshold (builder pattern).
    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs();
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Add to velocity. Wakes the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        self.velocity += velocity_delta;
        self.at_rest = false;
    }

    /// Semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }

    /// Fraction of the way from `initial` to `target`, clamped to `[0, 1]`.
    fn progress(&self) -> f64 {
        let span = self.target - self.initial;
        if span.abs() <= f64::EPSILON {
            return 1.0;
        }
        ((self.position - self.initial) / span).clamp(0.0, 1.0)
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Progress from the initial position toward the target, clamped to
    /// `[0.0, 1.0]`. Use [`position()`](Spring::position) for pixel values.
    fn value(&self) -> f32 {
        self.progress() as f32
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(MS_16);
        }
    }

    #[test]
    fn lift_spring_settles_on_negative_target() {
        let config = SpringConfig::from_duration_and_bounciness(Duration::from_millis(200), 15.0);
        let mut spring = Spring::with_config(0.0, -31.0, config);
        simulate(&mut spring, 200);
        assert!(spring.is_complete(), "spring never settled");
        assert!((spring.position() + 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bouncy_config_overshoots() {
        let config = SpringConfig::from_duration_and_bounciness(Duration::from_millis(200), 15.0);
        let mut spring = Spring::with_config(0.0, -31.0, config);
        let mut lowest = 0.0_f64;
        for _ in 0..100 {
            spring.tick(Duration::from_millis(4));
            lowest = lowest.min(spring.position());
        }
        assert!(lowest < -31.0, "expected overshoot, lowest was {lowest}");
    }

    #[test]
    fn zero_bounciness_is_critically_damped() {
        let config = SpringConfig::from_duration_and_bounciness(Duration::from_millis(300), 0.0);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-9);

        let mut spring = Spring::with_config(0.0, 10.0, config);
        for _ in 0..200 {
            spring.tick(MS_16);
            assert!(
                spring.position() < 10.5,
                "critically damped spring overshot: {}",
                spring.position()
            );
        }
    }

    #[test]
    fn bounciness_is_clamped() {
        let wild = SpringConfig::from_duration_and_bounciness(Duration::from_millis(200), 500.0);
        let max = SpringConfig::from_duration_and_bounciness(Duration::from_millis(200), 20.0);
        assert_eq!(wild, max);
        let nan = SpringConfig::from_duration_and_bounciness(Duration::from_millis(200), f64::NAN);
        assert!((nan.damping_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn spring_value_is_normalized_progress() {
        let mut spring = Spring::new(0.0, -31.0);
        assert!(spring.value().abs() < f32::EPSILON);
        simulate(&mut spring, 300);
        assert!((spring.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn spring_reset_returns_to_initial() {
        let mut spring = Spring::new(5.0, 0.0);
        simulate(&mut spring, 300);
        assert!(spring.is_complete());
        spring.reset();
        assert!(!spring.is_complete());
        assert!((spring.position() - 5.0).abs() < f64::EPSILON);
        assert!(spring.velocity().abs() < f64::EPSILON);
    }

    #[test]
    fn impulse_wakes_resting_spring() {
        let mut spring = Spring::new(0.0, 0.0);
        simulate(&mut spring, 10);
        assert!(spring.is_at_rest());
        spring.impulse(50.0);
        assert!(!spring.is_at_rest());
        spring.tick(MS_16);
        assert!(spring.position().abs() > 0.0);
    }

    #[test]
    fn set_target_wakes_resting_spring() {
        let mut spring = Spring::new(0.0, 1.0);
        simulate(&mut spring, 300);
        assert!(spring.is_complete());
        spring.set_target(2.0);
        assert!(!spring.is_complete());
    }

    #[test]
    fn zero_dt_is_noop() {
        let mut spring = Spring::new(0.0, 1.0);
        spring.tick(Duration::ZERO);
        assert!(spring.position().abs() < f64::EPSILON);
    }
}
