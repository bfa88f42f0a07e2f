#![forbid(unsafe_code)]

//! Animated scalar with an additive offset.
//!
//! [`AnimatedValue`] is what a rendered element binds to. Its observable
//! value is `value + offset`:
//!
//! - `offset` is a baseline set once per drag so per-frame relative deltas
//!   can be written straight into `value`;
//! - [`flatten_offset`](AnimatedValue::flatten_offset) folds the baseline
//!   back into `value` when the drag ends.
//!
//! # Motions
//!
//! At most one motion (timing tween or spring) runs at a time. Starting a new
//! motion replaces the running one: last writer wins, and the replaced motion
//! never reports completion. [`tick`](AnimatedValue::tick) returns the id of a
//! motion that finished during that tick, after the final value has been
//! written and listeners have seen it.
//!
//! # Listeners
//!
//! Listeners receive the observable value on every change made by
//! `set_value`, `tick`, or a completing motion. `set_offset` and
//! `flatten_offset` do not notify on their own.

use std::fmt;
use std::time::Duration;

use super::spring::{Spring, SpringConfig};
use super::{Animation, EasingFn, Fade};

/// Identifies one started motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

impl AnimationId {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(f64)>;

enum Motion {
    Timing { from: f64, to: f64, fade: Fade },
    Spring(Spring),
}

impl Motion {
    fn advance(&mut self, dt: Duration) {
        match self {
            Self::Timing { fade, .. } => fade.tick(dt),
            Self::Spring(spring) => spring.tick(dt),
        }
    }

    fn current(&self) -> f64 {
        match self {
            Self::Timing { from, to, fade } => {
                if fade.is_complete() {
                    *to
                } else {
                    from + (to - from) * f64::from(fade.value())
                }
            }
            Self::Spring(spring) => spring.position(),
        }
    }

    fn target(&self) -> f64 {
        match self {
            Self::Timing { to, .. } => *to,
            Self::Spring(spring) => spring.target(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Timing { fade, .. } => fade.is_complete(),
            Self::Spring(spring) => spring.is_complete(),
        }
    }
}

struct ActiveMotion {
    id: AnimationId,
    motion: Motion,
}

/// A scalar animated over time, with an additive offset and change listeners.
pub struct AnimatedValue {
    value: f64,
    offset: f64,
    active: Option<ActiveMotion>,
    next_animation: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    pending_change: Option<f64>,
}

impl fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.value)
            .field("offset", &self.offset)
            .field("animation", &self.active.as_ref().map(|a| a.id))
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AnimatedValue {
    /// Create a resting value with zero offset.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            offset: 0.0,
            active: None,
            next_animation: 0,
            listeners: Vec::new(),
            next_listener: 0,
            pending_change: None,
        }
    }

    /// Observable value: `value + offset`.
    #[inline]
    #[must_use]
    pub fn get(&self) -> f64 {
        self.value + self.offset
    }

    /// The raw value, excluding the offset.
    #[inline]
    #[must_use]
    pub fn raw_value(&self) -> f64 {
        self.value
    }

    /// The additive offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Set the raw value directly. Stops any running motion.
    pub fn set_value(&mut self, value: f64) {
        self.active = None;
        self.value = value;
        self.emit();
    }

    /// Set the additive offset.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Fold the offset into the value and reset the offset to zero.
    ///
    /// The observable value is unchanged.
    pub fn flatten_offset(&mut self) {
        self.value += self.offset;
        self.offset = 0.0;
    }

    /// Tween the raw value to `to` over `duration`.
    pub fn timing(&mut self, to: f64, duration: Duration, easing: EasingFn) -> AnimationId {
        let motion = Motion::Timing {
            from: self.value,
            to,
            fade: Fade::new(duration).easing(easing),
        };
        self.start(motion)
    }

    /// Spring the raw value toward `to`, carrying velocity from a running spring.
    pub fn spring(&mut self, to: f64, config: SpringConfig) -> AnimationId {
        let carried = match &self.active {
            Some(ActiveMotion {
                motion: Motion::Spring(spring),
                ..
            }) => spring.velocity(),
            _ => 0.0,
        };
        let mut spring = Spring::with_config(self.value, to, config);
        if carried != 0.0 {
            spring.impulse(carried);
        }
        self.start(Motion::Spring(spring))
    }

    fn start(&mut self, motion: Motion) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation = self.next_animation.wrapping_add(1);
        self.active = Some(ActiveMotion { id, motion });
        id
    }

    /// Stop the running motion where it is. Returns its id, if any.
    pub fn stop(&mut self) -> Option<AnimationId> {
        self.active.take().map(|a| a.id)
    }

    /// The running motion, if any.
    #[must_use]
    pub fn active_animation(&self) -> Option<AnimationId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Whether a motion is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Target of the running motion, in raw-value space.
    #[must_use]
    pub fn animation_target(&self) -> Option<f64> {
        self.active.as_ref().map(|a| a.motion.target())
    }

    /// Advance the running motion by `dt`.
    ///
    /// Returns the id of the motion if it completed during this tick, after
    /// the final value has been written and listeners notified.
    pub fn tick(&mut self, dt: Duration) -> Option<AnimationId> {
        let active = self.active.as_mut()?;
        active.motion.advance(dt);
        let complete = active.motion.is_complete();
        let next = if complete {
            active.motion.target()
        } else {
            active.motion.current()
        };
        let finished = complete.then_some(active.id);
        if complete {
            self.active = None;
        }
        if next != self.value || complete {
            self.value = next;
            self.emit();
        }
        finished
    }

    /// Register a listener called with the observable value on every change.
    pub fn add_listener(&mut self, listener: impl FnMut(f64) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Remove every listener.
    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Latest observable value since the previous call, if anything changed.
    pub fn take_change(&mut self) -> Option<f64> {
        self.pending_change.take()
    }

    fn emit(&mut self) {
        let observed = self.get();
        self.pending_change = Some(observed);
        for (_, listener) in &mut self.listeners {
            listener(observed);
        }
    }
}
