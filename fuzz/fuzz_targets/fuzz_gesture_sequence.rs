#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use slick_core::Instant;
use slick_core::gesture::{PanRecognizer, PointerEvent};
use slick_slider::{Callbacks, Slider, SliderConfig};

#[derive(Debug, Arbitrary)]
enum Op {
    Down(i16),
    Move(i16),
    Up(i16),
    Cancel,
    Frames(u8),
    Reseed(i16),
    Resize(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    low: i16,
    high: i16,
    size: u8,
    width: u16,
    throttle_ms: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let (low, high) = (f64::from(input.low), f64::from(input.high));
    let config = SliderConfig::default()
        .with_range(low, high)
        .with_initial_value(low)
        .with_size(f64::from(input.size))
        .with_throttle(Duration::from_millis(u64::from(input.throttle_ms)));
    // Equal bounds are a configuration error, not a crash.
    let Ok(mut slider) = Slider::new(config, Callbacks::new()) else {
        return;
    };
    slider.on_wrapper_layout(0.0);
    slider.on_slider_layout(f64::from(input.width));

    let range = slider.range();
    let mut pan = PanRecognizer::default();
    let mut now = Instant::now();
    for op in input.ops.into_iter().take(512) {
        let pointer = match op {
            Op::Down(x) => Some(PointerEvent::Down { x: f64::from(x), y: 0.0 }),
            Op::Move(x) => Some(PointerEvent::Move { x: f64::from(x), y: 0.0 }),
            Op::Up(x) => Some(PointerEvent::Up { x: f64::from(x), y: 0.0 }),
            Op::Cancel => Some(PointerEvent::Cancel),
            Op::Frames(n) => {
                for _ in 0..n % 32 {
                    now += Duration::from_millis(16);
                    slider.frame(now);
                }
                None
            }
            Op::Reseed(v) => {
                let _ = slider.set_initial_value(f64::from(v));
                None
            }
            Op::Resize(w) => {
                slider.on_slider_layout(f64::from(w));
                None
            }
        };
        if let Some(event) = pointer {
            for e in pan.process(event) {
                slider.handle_pan(e, now);
            }
        }

        let value = slider.value();
        assert!(
            value >= range.min() - 0.5 && value <= range.max() + 0.5,
            "value {value} outside {range:?}"
        );
        if let Some(interp) = slider.controller().interpolator() {
            let max = interp.domain_max();
            let offset = slider.offset();
            assert!((0.0..=max).contains(&offset), "offset {offset} outside [0, {max}]");
            let thumb = slider.thumb_position();
            assert!(thumb >= -1e-6 && thumb <= max + 1e-6, "thumb {thumb} outside [0, {max}]");
        }
    }
});
