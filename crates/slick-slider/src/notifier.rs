#![forbid(unsafe_code)]

//! Outbound notifications: throttled value changes plus slide start/end.
//!
//! Value changes arrive once per animation tick while the thumb moves, far
//! more often than a host wants to react. [`ChangeNotifier`] coalesces them
//! with a trailing-edge window:
//!
//! - the first change after a quiet period opens a window of `interval`;
//! - later changes inside the window only replace the pending value;
//! - once the window has elapsed, [`poll`](ChangeNotifier::poll) delivers the
//!   latest value exactly once.
//!
//! An emission equal to the previously emitted value is suppressed. Slide
//! start and slide end bypass the window entirely.
//!
//! # Invariants
//!
//! 1. At most one value change is delivered per window.
//! 2. The delivered value is the latest one recorded in that window.
//! 3. Two consecutive deliveries never carry the same value.

use std::fmt;
use std::time::Duration;

use slick_core::Instant;

/// Receiver of slider notifications.
pub trait SliderObserver {
    /// The slider's value changed (throttled, deduplicated).
    fn on_value_change(&mut self, value: f64);

    /// A gesture began; `value` is the value before any jump.
    fn on_slide_start(&mut self, _value: f64) {}

    /// A gesture ended; `value` is where the thumb came to rest.
    fn on_slide_end(&mut self, _value: f64) {}
}

type Handler = Box<dyn FnMut(f64)>;

/// Closure-backed [`SliderObserver`].
///
/// ```
/// use slick_slider::{Callbacks, SliderObserver};
///
/// let mut cb = Callbacks::new().with_value_change(|v| println!("value {v}"));
/// cb.on_value_change(42.0);
/// ```
#[derive(Default)]
pub struct Callbacks {
    value_change: Option<Handler>,
    slide_start: Option<Handler>,
    slide_end: Option<Handler>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("value_change", &self.value_change.is_some())
            .field("slide_start", &self.slide_start.is_some())
            .field("slide_end", &self.slide_end.is_some())
            .finish()
    }
}

impl Callbacks {
    /// No callbacks registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value-change callback (builder pattern).
    #[must_use]
    pub fn with_value_change(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.value_change = Some(Box::new(f));
        self
    }

    /// Set the slide-start callback (builder pattern).
    #[must_use]
    pub fn with_slide_start(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.slide_start = Some(Box::new(f));
        self
    }

    /// Set the slide-end callback (builder pattern).
    #[must_use]
    pub fn with_slide_end(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.slide_end = Some(Box::new(f));
        self
    }
}

impl SliderObserver for Callbacks {
    fn on_value_change(&mut self, value: f64) {
        if let Some(f) = self.value_change.as_mut() {
            f(value);
        }
    }

    fn on_slide_start(&mut self, value: f64) {
        if let Some(f) = self.slide_start.as_mut() {
            f(value);
        }
    }

    fn on_slide_end(&mut self, value: f64) {
        if let Some(f) = self.slide_end.as_mut() {
            f(value);
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeNotifier
// ---------------------------------------------------------------------------

/// Trailing-edge throttle and dedup in front of a [`SliderObserver`].
pub struct ChangeNotifier<O> {
    observer: O,
    interval: Duration,
    window_end: Option<Instant>,
    pending: Option<f64>,
    last_emitted: Option<f64>,
    coalesced: u32,
}

impl<O> fmt::Debug for ChangeNotifier<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("interval", &self.interval)
            .field("pending", &self.pending)
            .field("last_emitted", &self.last_emitted)
            .field("coalesced", &self.coalesced)
            .finish_non_exhaustive()
    }
}

impl<O: SliderObserver> ChangeNotifier<O> {
    /// Notifier delivering to `observer` at most once per `interval`.
    #[must_use]
    pub fn new(observer: O, interval: Duration) -> Self {
        Self {
            observer,
            interval,
            window_end: None,
            pending: None,
            last_emitted: None,
            coalesced: 0,
        }
    }

    /// Record a value change observed at `now`.
    pub fn notify(&mut self, value: f64, now: Instant) {
        if self.interval.is_zero() {
            self.coalesced = 1;
            self.emit(value);
            return;
        }
        self.pending = Some(value);
        self.coalesced = self.coalesced.saturating_add(1);
        if self.window_end.is_none() {
            self.window_end = Some(now + self.interval);
        }
    }

    /// Deliver the pending value if its window has elapsed.
    ///
    /// Returns `true` if the observer was called.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.window_end {
            Some(end) if now >= end => self.flush(),
            _ => false,
        }
    }

    /// Deliver the pending value immediately, closing the window.
    ///
    /// Returns `true` if the observer was called.
    pub fn flush(&mut self) -> bool {
        self.window_end = None;
        match self.pending.take() {
            Some(value) => self.emit(value),
            None => false,
        }
    }

    /// Adopt `value` as already delivered, without calling the observer.
    ///
    /// Any pending change is discarded.
    pub fn prime(&mut self, value: f64) {
        self.last_emitted = Some(value);
        self.pending = None;
        self.window_end = None;
        self.coalesced = 0;
    }

    /// Unthrottled slide-start notification.
    pub fn slide_start(&mut self, value: f64) {
        self.observer.on_slide_start(value);
    }

    /// Unthrottled slide-end notification.
    pub fn slide_end(&mut self, value: f64) {
        self.observer.on_slide_end(value);
    }

    /// Whether a change is waiting for its window to elapse.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The last value delivered or primed.
    #[must_use]
    pub fn last_emitted(&self) -> Option<f64> {
        self.last_emitted
    }

    /// Coalescing window.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Shared access to the observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Exclusive access to the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the notifier, returning the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    fn emit(&mut self, value: f64) -> bool {
        let coalesced = std::mem::take(&mut self.coalesced);
        if self.last_emitted == Some(value) {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "slider.notify", value, coalesced);
        #[cfg(not(feature = "tracing"))]
        let _ = coalesced;
        self.last_emitted = Some(value);
        self.observer.on_value_change(value);
        true
    }
}
