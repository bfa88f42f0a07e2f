#![forbid(unsafe_code)]

//! The slider widget shell.
//!
//! [`Slider`] wires layout measurements and pan events into the
//! [`DragController`], turns the animated thumb position into a rounded value
//! and hands value changes to the [`ChangeNotifier`]. It renders nothing; a
//! host reads [`thumb_position`](Slider::thumb_position),
//! [`thumb_lift`](Slider::thumb_lift) and [`display_text`](Slider::display_text)
//! each frame, or listens on [`animated_x_mut`](Slider::animated_x_mut).
//!
//! # Frame Loop
//!
//! ```text
//! handle_pan(event, now) --+
//!                          +--> thumb moves --> value = round(forward(x)) --> notify
//! frame(now) -- tick(dt) --+                                                    |
//!                                                              poll(now) <------+
//! ```
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use slick_core::Instant;
//! use slick_core::gesture::PanEvent;
//! use slick_slider::{Callbacks, Slider, SliderConfig};
//!
//! let mut slider = Slider::new(SliderConfig::default(), Callbacks::new()).unwrap();
//! slider.on_wrapper_layout(0.0);
//! slider.on_slider_layout(130.0);
//! assert_eq!(slider.value(), 50.0);
//!
//! let t0 = Instant::now();
//! slider.handle_pan(PanEvent::Grant { move_x: 15.0, move_y: 0.0 }, t0);
//! slider.frame(t0);
//! slider.frame(t0 + Duration::from_millis(150));
//! slider.handle_pan(PanEvent::Release { dx: 0.0, dy: 0.0 }, t0 + Duration::from_millis(160));
//! assert_eq!(slider.value(), 0.0);
//! ```

use std::fmt;

use slick_core::Instant;
use slick_core::animation::AnimatedValue;
use slick_core::gesture::PanEvent;

use crate::config::{SliderConfig, check_value};
use crate::controller::{DragController, GestureEdge, Phase};
use crate::error::ConfigError;
use crate::interpolator::{PixelDomain, ValueRange, round_to_precision};
use crate::notifier::{Callbacks, ChangeNotifier, SliderObserver};

/// Headless slider driven by layout, pan events and frames.
pub struct Slider<O: SliderObserver = Callbacks> {
    config: SliderConfig,
    range: ValueRange,
    controller: DragController,
    notifier: ChangeNotifier<O>,
    slider_width: Option<f64>,
    wrapper_x: Option<f64>,
    value: f64,
    last_frame: Option<Instant>,
}

impl<O: SliderObserver> fmt::Debug for Slider<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("value", &self.value)
            .field("range", &self.range)
            .field("slider_width", &self.slider_width)
            .field("wrapper_x", &self.wrapper_x)
            .field("controller", &self.controller)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl<O: SliderObserver> Slider<O> {
    /// Validate `config` and create an unmeasured slider.
    pub fn new(config: SliderConfig, observer: O) -> Result<Self, ConfigError> {
        let range = config.validate()?;
        let controller =
            DragController::new(range, config.size, config.motion, config.initial_value);
        let notifier = ChangeNotifier::new(observer, config.throttle);
        let value = round_to_precision(config.initial_value, config.decimal_precision);
        Ok(Self {
            config,
            range,
            controller,
            notifier,
            slider_width: None,
            wrapper_x: None,
            value,
            last_frame: None,
        })
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// The track was measured at `width` pixels.
    pub fn on_slider_layout(&mut self, width: f64) {
        self.slider_width = Some(width);
        self.relayout();
    }

    /// The wrapper's left edge is at screen x `x`.
    pub fn on_wrapper_layout(&mut self, x: f64) {
        self.wrapper_x = Some(x);
        self.relayout();
    }

    fn relayout(&mut self) {
        let (Some(width), Some(wrapper_x)) = (self.slider_width, self.wrapper_x) else {
            return;
        };
        let domain = PixelDomain::new(width, self.config.size);
        let current = self.controller.interpolator().map(|i| i.domain());
        if current == domain {
            return;
        }
        let first_placement = current.is_none();
        let edge = self.controller.set_domain(domain);
        let _ = self.controller.translate_x_mut().take_change();
        self.value = self.placed_value();
        if first_placement {
            self.notifier.prime(self.value);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "slider.layout",
            width,
            wrapper_x,
            ready = domain.is_some(),
            value = self.value
        );
        #[cfg(not(feature = "tracing"))]
        let _ = wrapper_x;

        if let Some(GestureEdge::Ended { .. }) = edge {
            self.notifier.slide_end(self.value);
        }
    }

    fn placed_value(&self) -> f64 {
        let raw = match self.controller.interpolator() {
            Some(interp) => interp.forward(self.controller.thumb_position()),
            None => self.controller.unplaced_value(),
        };
        round_to_precision(raw, self.config.decimal_precision)
    }

    // -----------------------------------------------------------------------
    // Input and frames
    // -----------------------------------------------------------------------

    /// Feed one pan event observed at `now`.
    pub fn handle_pan(&mut self, event: PanEvent, now: Instant) {
        match event {
            PanEvent::Grant { move_x, .. } => {
                let Some(wrapper_x) = self.wrapper_x else {
                    return;
                };
                let before = self.value;
                if let Some(GestureEdge::Started) = self.controller.touch(move_x - wrapper_x) {
                    self.notifier.slide_start(before);
                }
            }
            PanEvent::Move { dx, .. } => self.controller.drag(dx),
            PanEvent::Release { dx, .. } | PanEvent::Terminate { dx, .. } => {
                if let Some(GestureEdge::Ended { .. }) = self.controller.release(dx) {
                    // A change still inside its window stays queued for `frame`.
                    self.derive(now);
                    self.notifier.slide_end(self.value);
                }
            }
        }
        self.derive(now);
        self.notifier.poll(now);
    }

    /// Advance animations to `now` and deliver due notifications.
    pub fn frame(&mut self, now: Instant) {
        let dt = self
            .last_frame
            .map(|prev| now.saturating_duration_since(prev))
            .unwrap_or_default();
        self.last_frame = Some(now);
        self.controller.tick(dt);
        self.derive(now);
        self.notifier.poll(now);
    }

    fn derive(&mut self, now: Instant) {
        let Some(position) = self.controller.translate_x_mut().take_change() else {
            return;
        };
        let Some(interp) = self.controller.interpolator() else {
            return;
        };
        let value = round_to_precision(interp.forward(position), self.config.decimal_precision);
        if value != self.value {
            self.value = value;
            self.notifier.notify(value, now);
        }
    }

    /// Move the slider to `value` without a gesture.
    ///
    /// The thumb tweens there and the resulting changes are reported like any
    /// other. Invalid values are rejected and nothing changes.
    pub fn set_initial_value(&mut self, value: f64) -> Result<(), ConfigError> {
        check_value(&self.range, value)?;
        self.config.initial_value = value;
        self.controller.reseed(value);
        if !self.controller.is_ready() {
            self.value = round_to_precision(value, self.config.decimal_precision);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current value, rounded to the configured precision.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The value as the thumb label shows it.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{:.*}", usize::from(self.config.decimal_precision), self.value)
    }

    /// Resting offset of the thumb in pixels.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.controller.tracker().offset()
    }

    /// Observable horizontal thumb position in pixels.
    #[must_use]
    pub fn thumb_position(&self) -> f64 {
        self.controller.thumb_position()
    }

    /// Vertical lift of the thumb (negative is up).
    #[must_use]
    pub fn thumb_lift(&self) -> f64 {
        self.controller.thumb_lift()
    }

    /// Vertical lift of the drop (negative is up).
    #[must_use]
    pub fn drop_lift(&self) -> f64 {
        self.controller.drop_lift()
    }

    /// Gesture phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    /// Whether layout produced a usable track.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.controller.is_ready()
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// The validated value range.
    #[must_use]
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// The animated thumb position, for registering render listeners.
    pub fn animated_x_mut(&mut self) -> &mut AnimatedValue {
        self.controller.translate_x_mut()
    }

    /// The underlying controller.
    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Shared access to the observer.
    pub fn observer(&self) -> &O {
        self.notifier.observer()
    }

    /// Exclusive access to the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        self.notifier.observer_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[derive(Debug, Default)]
    struct Log {
        values: Vec<f64>,
        starts: Vec<f64>,
        ends: Vec<f64>,
    }

    impl SliderObserver for Log {
        fn on_value_change(&mut self, value: f64) {
            self.values.push(value);
        }

        fn on_slide_start(&mut self, value: f64) {
            self.starts.push(value);
        }

        fn on_slide_end(&mut self, value: f64) {
            self.ends.push(value);
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Domain `[0, 100]` over range `(0, 100)`.
    fn measured() -> Slider<Log> {
        let mut s = Slider::new(SliderConfig::default(), Log::default()).unwrap();
        s.on_wrapper_layout(20.0);
        s.on_slider_layout(130.0);
        s
    }

    fn run_frames(s: &mut Slider<Log>, start: Instant, frames: u64) -> Instant {
        let mut now = start;
        for _ in 0..frames {
            now += ms(16);
            s.frame(now);
        }
        now
    }

    #[test]
    fn invalid_config_is_refused() {
        let err = Slider::new(SliderConfig::default().with_range(1.0, 1.0), Log::default());
        assert!(err.is_err());
    }

    #[test]
    fn layout_needs_both_measurements() {
        let mut s = Slider::new(SliderConfig::default(), Log::default()).unwrap();
        s.on_slider_layout(130.0);
        assert!(!s.is_ready());
        s.on_wrapper_layout(0.0);
        assert!(s.is_ready());
        assert!((s.offset() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn initial_placement_is_silent() {
        let mut s = measured();
        let t0 = Instant::now();
        s.frame(t0);
        run_frames(&mut s, t0, 10);
        assert!(s.observer().values.is_empty());
        assert_eq!(s.value(), 50.0);
    }

    #[test]
    fn touch_before_layout_never_starts() {
        let mut s = Slider::new(SliderConfig::default(), Log::default()).unwrap();
        let t0 = Instant::now();
        s.handle_pan(PanEvent::Grant { move_x: 40.0, move_y: 0.0 }, t0);
        s.handle_pan(PanEvent::Move { dx: 10.0, dy: 0.0 }, t0);
        s.handle_pan(PanEvent::Release { dx: 10.0, dy: 0.0 }, t0);
        let log = s.observer();
        assert!(log.starts.is_empty() && log.ends.is_empty() && log.values.is_empty());
    }

    #[test]
    fn tap_drag_release_reports_each_edge_once() {
        let mut s = measured();
        let t0 = Instant::now();
        s.frame(t0);
        // Screen x 100 is track x 80: the thumb jumps to 65.
        s.handle_pan(PanEvent::Grant { move_x: 100.0, move_y: 0.0 }, t0);
        let now = run_frames(&mut s, t0, 12);
        assert_eq!(s.phase(), Phase::Dragging);
        assert_eq!(s.value(), 65.0);

        s.handle_pan(PanEvent::Move { dx: 10.0, dy: 0.0 }, now);
        s.handle_pan(PanEvent::Release { dx: 10.0, dy: 0.0 }, now + ms(1));
        assert_eq!(s.observer().starts, vec![50.0]);
        assert_eq!(s.observer().ends, vec![75.0]);
        assert_eq!(s.display_text(), "75");

        run_frames(&mut s, now + ms(1), 2);
        let log = s.observer();
        assert_eq!(log.values.last().copied(), Some(75.0));
        assert_eq!(log.values.iter().filter(|&&v| v == 75.0).count(), 1);
        assert_eq!(log.ends.len(), 1);
    }

    #[test]
    fn release_right_after_an_emission_waits_for_the_window() {
        let mut s = measured();
        let t0 = Instant::now();
        s.frame(t0);
        // Screen x 85 is track x 65: the thumb stays at 50.
        s.handle_pan(PanEvent::Grant { move_x: 85.0, move_y: 0.0 }, t0);
        let now = run_frames(&mut s, t0, 12);
        assert_eq!(s.phase(), Phase::Dragging);
        assert_eq!(s.value(), 50.0);
        assert!(s.observer().values.is_empty());

        s.handle_pan(PanEvent::Move { dx: 10.0, dy: 0.0 }, now);
        s.frame(now + ms(16));
        assert_eq!(s.observer().values, vec![60.0]);

        s.handle_pan(PanEvent::Move { dx: 20.0, dy: 0.0 }, now + ms(17));
        s.handle_pan(PanEvent::Release { dx: 20.0, dy: 0.0 }, now + ms(18));
        assert_eq!(s.observer().ends, vec![70.0]);
        assert_eq!(s.observer().values, vec![60.0]);

        s.frame(now + ms(30));
        assert_eq!(s.observer().values, vec![60.0]);
        s.frame(now + ms(33));
        assert_eq!(s.observer().values, vec![60.0, 70.0]);
    }

    #[test]
    fn reseed_tweens_and_reports() {
        let mut s = measured();
        let t0 = Instant::now();
        s.frame(t0);
        s.set_initial_value(20.0).unwrap();
        run_frames(&mut s, t0, 20);
        assert_eq!(s.value(), 20.0);
        let log = s.observer();
        assert_eq!(log.values.last().copied(), Some(20.0));
        assert!(log.starts.is_empty() && log.ends.is_empty());
    }

    #[test]
    fn invalid_reseed_is_rejected() {
        let mut s = measured();
        assert!(s.set_initial_value(150.0).is_err());
        assert_eq!(s.config().initial_value, 50.0);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn display_text_uses_precision() {
        let config = SliderConfig::default()
            .with_decimal_precision(2)
            .with_initial_value(12.3456);
        let s = Slider::new(config, Log::default()).unwrap();
        assert_eq!(s.display_text(), "12.35");
    }

    #[test]
    fn huge_range_keeps_values_finite() {
        let config = SliderConfig::default()
            .with_range(0.0, 1e300)
            .with_initial_value(5e299)
            .with_decimal_precision(15);
        let mut s = Slider::new(config, Log::default()).unwrap();
        s.on_wrapper_layout(20.0);
        s.on_slider_layout(130.0);
        assert_eq!(s.value(), 5e299);

        let t0 = Instant::now();
        s.frame(t0);
        s.handle_pan(PanEvent::Grant { move_x: 85.0, move_y: 0.0 }, t0);
        let now = run_frames(&mut s, t0, 12);
        s.handle_pan(PanEvent::Move { dx: 500.0, dy: 0.0 }, now);
        s.handle_pan(PanEvent::Release { dx: 500.0, dy: 0.0 }, now);
        assert_eq!(s.value(), 1e300);
        assert_eq!(s.observer().ends, vec![1e300]);
    }

    #[test]
    fn degenerate_track_is_not_ready() {
        let mut s = Slider::new(SliderConfig::default(), Log::default()).unwrap();
        s.on_wrapper_layout(0.0);
        s.on_slider_layout(30.0);
        assert!(!s.is_ready());
        s.on_slider_layout(230.0);
        assert!(s.is_ready());
        assert!((s.thumb_position() - 100.0).abs() < 1e-9);
    }
}
