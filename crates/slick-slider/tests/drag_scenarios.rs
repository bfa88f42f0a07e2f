//! End-to-end drag scenarios through the `Slider` shell.

use std::time::Duration;

use slick_core::Instant;
use slick_core::gesture::{PanEvent, PanRecognizer, PointerEvent};
use slick_slider::{Phase, Slider, SliderConfig, SliderObserver};

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

const FRAME: Duration = Duration::from_millis(16);

struct Harness {
    slider: Slider<Log>,
    now: Instant,
}

impl Harness {
    /// Track 130 wide at screen x 20, thumb 30: domain `[0, 100]`.
    fn new(config: SliderConfig) -> Self {
        let mut slider = Slider::new(config, Log::default()).expect("valid config");
        slider.on_wrapper_layout(20.0);
        slider.on_slider_layout(130.0);
        let now = Instant::now();
        slider.frame(now);
        Self { slider, now }
    }

    fn frames(&mut self, n: u32) {
        for _ in 0..n {
            self.now += FRAME;
            self.slider.frame(self.now);
        }
    }

    fn advance(&mut self, d: Duration) {
        self.now += d;
    }

    fn pan(&mut self, event: PanEvent) {
        self.slider.handle_pan(event, self.now);
    }

    /// Touch at track x and let the jump finish.
    fn grab(&mut self, track_x: f64) {
        self.pan(PanEvent::Grant {
            move_x: track_x + 20.0,
            move_y: 5.0,
        });
        self.frames(10);
        assert_eq!(self.slider.phase(), Phase::Dragging);
    }

    fn drag(&mut self, dx: f64) {
        self.pan(PanEvent::Move { dx, dy: 0.0 });
    }

    fn release(&mut self, dx: f64) {
        self.pan(PanEvent::Release { dx, dy: 0.0 });
    }

    fn log(&self) -> &Log {
        self.slider.observer()
    }
}

#[test]
fn tap_right_of_midpoint_is_biased_left_by_half_thumb() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(80.0);
    assert_eq!(h.slider.thumb_position(), 65.0);
    assert_eq!(h.slider.value(), 65.0);
}

#[test]
fn tap_near_left_end_clamps_to_zero() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(10.0);
    assert_eq!(h.slider.thumb_position(), 0.0);
    assert_eq!(h.slider.value(), 0.0);
}

#[test]
fn dead_band_freezes_value_then_resumes() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(65.0);
    assert_eq!(h.slider.value(), 50.0);

    h.drag(30.0);
    assert_eq!(h.slider.value(), 80.0);
    h.drag(80.0);
    assert_eq!(h.slider.value(), 80.0, "out-of-bounds move must not update");
    assert_eq!(h.slider.thumb_position(), 80.0);
    h.drag(40.0);
    assert_eq!(h.slider.value(), 90.0);
    assert_eq!(h.slider.thumb_position(), 90.0);
}

#[test]
fn release_in_bounds_adds_delta_to_baseline() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(55.0);
    assert_eq!(h.slider.offset(), 40.0);
    h.drag(30.0);
    h.release(30.0);
    assert_eq!(h.slider.offset(), 70.0);
    assert_eq!(h.log().ends, vec![70.0]);
}

#[test]
fn release_past_the_end_lands_on_the_end() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(55.0);
    h.drag(80.0);
    h.release(80.0);
    assert_eq!(h.slider.offset(), 100.0);
    assert_eq!(h.slider.value(), 100.0);
    assert_eq!(h.log().ends, vec![100.0]);
}

#[test]
fn burst_of_moves_inside_one_window_reports_once() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(65.0);
    let before = h.log().values.len();

    for dx in [1.0, 2.0, 3.0, 4.0, 5.0] {
        h.drag(dx);
        h.advance(Duration::from_millis(2));
    }
    assert_eq!(h.log().values.len(), before);
    h.frames(1);
    assert_eq!(&h.log().values[before..], &[55.0]);
}

#[test]
fn implicit_seed_is_never_reported() {
    let mut h = Harness::new(SliderConfig::default().with_initial_value(30.0));
    h.frames(30);
    assert_eq!(h.slider.value(), 30.0);
    assert!(h.log().values.is_empty());
}

#[test]
fn slide_start_carries_pre_jump_value() {
    let mut h = Harness::new(SliderConfig::default().with_initial_value(30.0));
    h.grab(95.0);
    h.release(0.0);
    assert_eq!(h.log().starts, vec![30.0]);
    assert_eq!(h.log().ends, vec![80.0]);
}

#[test]
fn scenario_range_with_negative_low() {
    let config = SliderConfig::default()
        .with_range(-50.0, 200.0)
        .with_initial_value(75.0);
    let mut slider = Slider::new(config, Log::default()).expect("valid config");
    slider.on_wrapper_layout(0.0);
    slider.on_slider_layout(300.0);

    let interp = slider.controller().interpolator().expect("measured");
    assert_eq!(interp.domain_max(), 270.0);
    assert!((interp.inverse(75.0) - 135.0).abs() < 1e-9);
    assert!((interp.forward(135.0) - 75.0).abs() < 1e-9);
    assert!((slider.offset() - 135.0).abs() < 1e-9);
    assert_eq!(slider.value(), 75.0);
    assert_eq!(slider.display_text(), "75");
}

#[test]
fn descending_range_drag_decreases_value() {
    let config = SliderConfig::default()
        .with_range(100.0, 0.0)
        .with_initial_value(50.0);
    let mut h = Harness::new(config);
    h.grab(65.0);
    h.drag(20.0);
    assert_eq!(h.slider.value(), 30.0);
    h.release(20.0);
    assert_eq!(h.log().ends, vec![30.0]);
}

#[test]
fn terminate_ends_gesture_like_release() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(65.0);
    h.drag(-20.0);
    h.pan(PanEvent::Terminate { dx: -20.0, dy: 0.0 });
    assert_eq!(h.slider.phase(), Phase::Idle);
    assert_eq!(h.slider.offset(), 30.0);
    assert_eq!(h.log().ends, vec![30.0]);
}

#[test]
fn release_during_jump_ends_at_target() {
    let mut h = Harness::new(SliderConfig::default());
    h.pan(PanEvent::Grant {
        move_x: 100.0,
        move_y: 0.0,
    });
    h.frames(2);
    h.drag(15.0);
    h.release(15.0);
    assert_eq!(h.slider.phase(), Phase::Idle);
    assert_eq!(h.slider.value(), 65.0);
    assert_eq!(h.log().starts, vec![50.0]);
    assert_eq!(h.log().ends, vec![65.0]);
}

#[test]
fn precision_rounds_reported_values() {
    let config = SliderConfig::default()
        .with_range(0.0, 1.0)
        .with_initial_value(0.5)
        .with_decimal_precision(2);
    let mut h = Harness::new(config);
    h.grab(65.0);
    h.drag(12.345);
    h.release(12.345);
    assert_eq!(h.slider.value(), 0.62);
    assert_eq!(h.slider.display_text(), "0.62");
    assert_eq!(h.log().ends, vec![0.62]);
}

#[test]
fn reseed_during_drag_applies_after_release() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(65.0);
    h.slider.set_initial_value(10.0).expect("in range");
    h.drag(10.0);
    assert_eq!(h.slider.value(), 60.0);
    h.release(10.0);
    assert_eq!(h.log().ends, vec![60.0]);
    h.frames(12);
    assert_eq!(h.slider.value(), 10.0);
    assert_eq!(h.log().values.last().copied(), Some(10.0));
    assert_eq!(h.log().ends.len(), 1);
}

#[test]
fn relayout_mid_drag_finishes_gesture() {
    let mut h = Harness::new(SliderConfig::default());
    h.grab(65.0);
    h.drag(25.0);
    h.slider.on_slider_layout(230.0);
    assert_eq!(h.slider.phase(), Phase::Idle);
    assert_eq!(h.slider.value(), 75.0);
    assert_eq!(h.slider.offset(), 150.0);
    assert_eq!(h.log().ends, vec![75.0]);

    h.release(25.0);
    assert_eq!(h.log().ends.len(), 1);
}

#[test]
fn recognizer_drives_slider_end_to_end() {
    let mut h = Harness::new(SliderConfig::default());
    let mut pan = PanRecognizer::default();
    let mut feed = |h: &mut Harness, event: PointerEvent| {
        for e in pan.process(event) {
            h.pan(e);
        }
    };

    feed(&mut h, PointerEvent::Down { x: 85.0, y: 3.0 });
    h.frames(10);
    feed(&mut h, PointerEvent::Move { x: 95.0, y: 3.0 });
    feed(&mut h, PointerEvent::Move { x: 105.0, y: 4.0 });
    feed(&mut h, PointerEvent::Up { x: 105.0, y: 4.0 });

    assert_eq!(h.log().starts, vec![50.0]);
    assert_eq!(h.log().ends, vec![70.0]);
    assert_eq!(h.slider.value(), 70.0);
}
