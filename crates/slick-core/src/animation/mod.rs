#![forbid(unsafe_code)]

//! Animation primitives.
//!
//! Two layers live here:
//!
//! - [`Animation`] drivers that produce progress over time: [`Fade`]
//!   (duration + easing) and [`Spring`] (damped oscillator).
//! - [`AnimatedValue`], the scalar a widget binds its visuals to. It owns at
//!   most one running motion built from a driver and maps that driver's
//!   progress onto pixel space.
//!
//! All time is supplied by the caller through `tick(dt)`.

mod animated;
pub mod spring;

use std::time::Duration;

pub use animated::{AnimatedValue, AnimationId, ListenerId};
pub use spring::{Spring, SpringConfig};

/// An easing curve mapping linear progress `t ∈ [0, 1]` to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current progress, normalized to `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time accumulated past completion during the last tick.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Identity easing.
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in.
#[must_use]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out.
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out.
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progress from 0.0 to 1.0 over a fixed duration, shaped by an easing curve.
///
/// A zero duration is clamped to 1ns, so the first non-zero tick completes it.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a linear fade over `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear (un-eased) progress in `[0.0, 1.0]`.
    #[must_use]
    pub fn raw_progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress() as f32)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_completes_after_duration() {
        let mut fade = Fade::new(Duration::from_millis(100));
        fade.tick(Duration::from_millis(60));
        assert!(!fade.is_complete());
        fade.tick(Duration::from_millis(40));
        assert!(fade.is_complete());
        assert!((fade.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fade_reports_overshoot() {
        let mut fade = Fade::new(Duration::from_millis(100));
        fade.tick(Duration::from_millis(130));
        assert_eq!(fade.overshoot(), Duration::from_millis(30));
    }

    #[test]
    fn zero_duration_fade_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        assert!(!fade.is_complete());
        fade.tick(Duration::from_millis(1));
        assert!(fade.is_complete());
    }

    #[test]
    fn fade_reset_restarts() {
        let mut fade = Fade::new(Duration::from_millis(50));
        fade.tick(Duration::from_millis(50));
        fade.reset();
        assert!(!fade.is_complete());
        assert!(fade.value().abs() < f32::EPSILON);
    }

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [linear, ease_in, ease_out, ease_in_out, ease_out_cubic] {
            assert!(easing(0.0).abs() < 1e-6);
            assert!((easing(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn eased_fade_differs_from_linear_midway() {
        let mut eased = Fade::new(Duration::from_millis(100)).easing(ease_out);
        eased.tick(Duration::from_millis(50));
        assert!(eased.value() > 0.5);
        assert!((eased.raw_progress() - 0.5).abs() < 1e-9);
    }
}
