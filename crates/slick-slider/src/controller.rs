#![forbid(unsafe_code)]

//! Drag state machine for the slider thumb.
//!
//! [`DragController`] owns the animated thumb position and keeps it in step
//! with the [`GestureOffsetTracker`]. A gesture walks through the phases:
//!
//! ```text
//!            touch                 tween done              release
//! Idle ---------------> Jumping ---------------> Dragging ----------> Idle
//!  |  ^                  |    ^ touch (retarget)                        ^
//!  |  | seed done        |    |                                         |
//!  v  |                  +----+---------------- release ----------------+
//! Seeding --touch--> Jumping
//! ```
//!
//! While jumping the thumb is tweening toward the tapped position and moves
//! are ignored. Once the tween completes, the tracker starts a drag from the
//! jump target and the tween target becomes the visual baseline, so each
//! cumulative pan delta can be written straight into the animated value.
//!
//! # Invariants
//!
//! 1. Outside of `Dragging` the animated position carries no offset; its
//!    raw value is the thumb position.
//! 2. The thumb is only moved to in-bounds positions; dead-band moves leave
//!    it where it was.
//! 3. Every gesture reports exactly one [`GestureEdge::Started`] and one
//!    [`GestureEdge::Ended`].
//! 4. Re-seeds never interrupt a gesture; they are applied when it ends.
//!
//! # Failure Modes
//!
//! - Without a measured domain, touches are ignored and the gesture never
//!   starts. Its moves and release are ignored with it.

use std::fmt;
use std::time::Duration;

use slick_core::animation::{AnimatedValue, AnimationId, EasingFn, SpringConfig, ease_in_out};

use crate::config::MotionConfig;
use crate::interpolator::{PixelDomain, ValueInterpolator, ValueRange};
use crate::tracker::GestureOffsetTracker;

const TWEEN_EASING: EasingFn = ease_in_out;

/// Where the controller is in a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// At rest.
    Idle,
    /// Tweening to a re-seeded value; no gesture active.
    Seeding {
        /// The running tween.
        tween: AnimationId,
    },
    /// Tweening toward a tapped position; moves are ignored.
    Jumping {
        /// Thumb offset the tween is heading for.
        target: f64,
        /// The running tween.
        tween: AnimationId,
    },
    /// Following the pointer.
    Dragging,
}

impl Phase {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn in_gesture(&self) -> bool {
        matches!(self, Self::Jumping { .. } | Self::Dragging)
    }

    #[cfg(feature = "tracing")]
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Seeding { .. } => "seeding",
            Self::Jumping { .. } => "jumping",
            Self::Dragging => "dragging",
        }
    }
}

/// A gesture boundary the host should report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEdge {
    /// A gesture began. The thumb has not moved yet.
    Started,
    /// A gesture ended with the thumb resting at `offset`.
    Ended {
        /// Final resting offset.
        offset: f64,
    },
}

/// Gesture-driven thumb controller.
pub struct DragController {
    range: ValueRange,
    size: f64,
    motion: MotionConfig,
    interpolator: Option<ValueInterpolator>,
    tracker: GestureOffsetTracker,
    translate_x: AnimatedValue,
    thumb_lift: AnimatedValue,
    drop_lift: AnimatedValue,
    phase: Phase,
    /// Value to place once a domain is known, or to seed after a gesture.
    queued_seed: Option<f64>,
    /// Value shown before the first layout.
    unplaced_value: f64,
    in_dead_band: bool,
}

impl fmt::Debug for DragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("phase", &self.phase)
            .field("offset", &self.tracker.offset())
            .field("overflow", &self.tracker.overflow())
            .field("thumb", &self.translate_x.get())
            .field("ready", &self.interpolator.is_some())
            .field("queued_seed", &self.queued_seed)
            .finish_non_exhaustive()
    }
}

impl DragController {
    /// Unmeasured controller that will place `initial_value` on first layout.
    #[must_use]
    pub fn new(range: ValueRange, size: f64, motion: MotionConfig, initial_value: f64) -> Self {
        Self {
            range,
            size,
            motion,
            interpolator: None,
            tracker: GestureOffsetTracker::new(0.0),
            translate_x: AnimatedValue::new(0.0),
            thumb_lift: AnimatedValue::new(0.0),
            drop_lift: AnimatedValue::new(0.0),
            phase: Phase::Idle,
            queued_seed: None,
            unplaced_value: range.clamp(initial_value),
            in_dead_band: false,
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Adopt a new pixel domain, or drop the current one with `None`.
    ///
    /// The thumb is re-placed at the value it showed, without animation. A
    /// gesture in progress is finished as a release at the current position.
    pub fn set_domain(&mut self, domain: Option<PixelDomain>) -> Option<GestureEdge> {
        let finished = self.phase.in_gesture();
        if finished {
            self.finish_in_place();
        }

        let value = match self.interpolator {
            None => self.queued_seed.take().unwrap_or(self.unplaced_value),
            Some(interp) => {
                let position = match self.phase {
                    Phase::Seeding { .. } => self
                        .translate_x
                        .animation_target()
                        .unwrap_or_else(|| self.translate_x.get()),
                    _ => self.translate_x.get(),
                };
                interp.forward(position)
            }
        };
        self.translate_x.stop();
        self.translate_x.set_offset(0.0);
        self.interpolator = domain.map(|d| ValueInterpolator::build(d, self.range));
        self.set_phase(Phase::Idle);

        match self.interpolator {
            Some(interp) => {
                let offset = interp.inverse(value);
                self.tracker.reset_domain(interp.domain_max());
                self.tracker.place(offset);
                self.translate_x.set_value(offset);
            }
            None => {
                self.unplaced_value = value;
                self.tracker.reset_domain(0.0);
                self.translate_x.set_value(0.0);
            }
        }
        let edge = finished.then(|| GestureEdge::Ended {
            offset: self.tracker.offset(),
        });
        self.apply_queued_seed();
        edge
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    /// Thumb offset a touch at `normalized_x` (track coordinates) jumps to.
    ///
    /// Touches right of the midpoint are biased so the thumb never leaves the
    /// right end; touches left of it never leave the left end.
    #[must_use]
    pub fn tap_target(&self, normalized_x: f64) -> Option<f64> {
        let interp = self.interpolator?;
        let max = interp.domain_max();
        let centered = normalized_x - self.size / 2.0;
        let target = if normalized_x > interp.midpoint() {
            max.min(centered)
        } else {
            centered.max(0.0)
        };
        Some(interp.domain().clamp(target))
    }

    /// The pointer went down at `normalized_x`.
    ///
    /// Starts a jump, or retargets the running one. Returns
    /// [`GestureEdge::Started`] only for the first touch of a gesture.
    pub fn touch(&mut self, normalized_x: f64) -> Option<GestureEdge> {
        let target = self.tap_target(normalized_x)?;
        match self.phase {
            Phase::Dragging => {
                #[cfg(feature = "tracing")]
                tracing::trace!(message = "slider.touch", ignored = "dragging");
                None
            }
            Phase::Jumping { .. } => {
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "slider.touch", normalized_x, target, retarget = true);
                self.start_jump(target);
                None
            }
            Phase::Idle | Phase::Seeding { .. } => {
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "slider.touch", normalized_x, target, retarget = false);
                self.start_jump(target);
                self.raise_lifts();
                Some(GestureEdge::Started)
            }
        }
    }

    fn start_jump(&mut self, target: f64) {
        let tween = self
            .translate_x
            .timing(target, self.motion.jump, TWEEN_EASING);
        self.tracker.place(target);
        self.set_phase(Phase::Jumping { target, tween });
    }

    /// The pointer moved by the cumulative delta `dx` since it went down.
    pub fn drag(&mut self, dx: f64) {
        if self.phase != Phase::Dragging {
            return;
        }
        match self.tracker.apply_delta(dx) {
            Some(_) => {
                if self.in_dead_band {
                    self.in_dead_band = false;
                    #[cfg(feature = "tracing")]
                    tracing::trace!(message = "slider.dead_band", entered = false, dx);
                }
                self.translate_x.set_value(dx);
            }
            None => {
                if !self.in_dead_band {
                    self.in_dead_band = true;
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        message = "slider.dead_band",
                        entered = true,
                        dx,
                        overflow = self.tracker.overflow()
                    );
                }
            }
        }
    }

    /// The pointer was released (or the gesture taken away) at cumulative
    /// delta `dx`.
    pub fn release(&mut self, dx: f64) -> Option<GestureEdge> {
        let offset = match self.phase {
            Phase::Dragging => {
                let overflow = self.tracker.overflow();
                let offset = self.tracker.end_drag(dx);
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "slider.release", dx, overflow, offset);
                #[cfg(not(feature = "tracing"))]
                let _ = overflow;
                self.snap(offset);
                offset
            }
            Phase::Jumping { target, .. } => {
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "slider.release", dx, during_jump = true, offset = target);
                self.tracker.place(target);
                self.translate_x.set_value(target);
                target
            }
            Phase::Idle | Phase::Seeding { .. } => return None,
        };
        self.end_gesture();
        Some(GestureEdge::Ended { offset })
    }

    /// End the gesture where the thumb currently is, leaving any queued
    /// re-seed for the caller.
    fn finish_in_place(&mut self) {
        let position = self.translate_x.get();
        let offset = match self.interpolator {
            Some(interp) => interp.domain().clamp(position),
            None => position,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "slider.release", offset, relayout = true);
        self.tracker.place(offset);
        self.snap(offset);
        self.settle_gesture();
    }

    fn snap(&mut self, offset: f64) {
        self.translate_x.set_offset(offset);
        self.translate_x.set_value(0.0);
        self.translate_x.flatten_offset();
    }

    fn end_gesture(&mut self) {
        self.settle_gesture();
        self.apply_queued_seed();
    }

    fn settle_gesture(&mut self) {
        self.in_dead_band = false;
        self.lower_lifts();
        self.set_phase(Phase::Idle);
    }

    fn raise_lifts(&mut self) {
        let thumb = SpringConfig::from_duration_and_bounciness(
            self.motion.thumb_lift,
            self.motion.bounciness,
        );
        let drop = SpringConfig::from_duration_and_bounciness(
            self.motion.drop_lift,
            self.motion.bounciness,
        );
        self.thumb_lift.spring(-(self.size + 1.0), thumb);
        self.drop_lift.spring(self.motion.drop_offset, drop);
    }

    fn lower_lifts(&mut self) {
        self.thumb_lift.timing(0.0, self.motion.lower, TWEEN_EASING);
        self.drop_lift.timing(0.0, self.motion.lower, TWEEN_EASING);
    }

    // -----------------------------------------------------------------------
    // Re-seeding
    // -----------------------------------------------------------------------

    /// Move the thumb to `value` without a gesture.
    ///
    /// Before layout the value is remembered and placed silently; during a
    /// gesture it is applied once the gesture ends.
    pub fn reseed(&mut self, value: f64) {
        let value = self.range.clamp(value);
        self.queued_seed = Some(value);
        if !self.phase.in_gesture() {
            self.apply_queued_seed();
        }
    }

    fn apply_queued_seed(&mut self) {
        let Some(interp) = self.interpolator else {
            return;
        };
        let Some(value) = self.queued_seed.take() else {
            return;
        };
        let target = interp.inverse(value);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "slider.reseed", value, target);
        let tween = self
            .translate_x
            .timing(target, self.motion.reseed, TWEEN_EASING);
        self.tracker.place(target);
        self.set_phase(Phase::Seeding { tween });
    }

    /// Whether a re-seed is waiting for layout or for the gesture to end.
    #[must_use]
    pub fn has_queued_seed(&self) -> bool {
        self.queued_seed.is_some()
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Advance every animation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.thumb_lift.tick(dt);
        self.drop_lift.tick(dt);
        let Some(finished) = self.translate_x.tick(dt) else {
            return;
        };
        match self.phase {
            Phase::Jumping { target, tween } if tween == finished => {
                self.translate_x.set_offset(target);
                self.translate_x.set_value(0.0);
                self.tracker.begin_drag(target);
                self.set_phase(Phase::Dragging);
            }
            Phase::Seeding { tween } if tween == finished => {
                self.set_phase(Phase::Idle);
            }
            _ => {}
        }
    }

    fn set_phase(&mut self, next: Phase) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "slider.phase",
            from = self.phase.name(),
            to = next.name(),
            offset = self.tracker.offset()
        )
        .entered();
        self.phase = next;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a domain is known.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.interpolator.is_some()
    }

    /// The mapping, once a domain is known.
    #[inline]
    #[must_use]
    pub fn interpolator(&self) -> Option<ValueInterpolator> {
        self.interpolator
    }

    /// The offset bookkeeping.
    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &GestureOffsetTracker {
        &self.tracker
    }

    /// Observable thumb position in pixels.
    #[inline]
    #[must_use]
    pub fn thumb_position(&self) -> f64 {
        self.translate_x.get()
    }

    /// Vertical lift of the thumb.
    #[inline]
    #[must_use]
    pub fn thumb_lift(&self) -> f64 {
        self.thumb_lift.get()
    }

    /// Vertical lift of the drop beneath the thumb.
    #[inline]
    #[must_use]
    pub fn drop_lift(&self) -> f64 {
        self.drop_lift.get()
    }

    /// Value shown before the first layout.
    #[must_use]
    pub fn unplaced_value(&self) -> f64 {
        self.queued_seed
            .filter(|_| self.interpolator.is_none())
            .unwrap_or(self.unplaced_value)
    }

    /// The animated thumb position.
    pub fn translate_x(&self) -> &AnimatedValue {
        &self.translate_x
    }

    /// Exclusive access to the animated thumb position.
    pub fn translate_x_mut(&mut self) -> &mut AnimatedValue {
        &mut self.translate_x
    }
}
