#![forbid(unsafe_code)]

//! Slick slider walkthrough.
//!
//! Drives a scripted pointer sequence through a headless [`Slider`] and
//! prints every callback it produces, one line per event.
//!
//! # Running
//!
//! ```sh
//! cargo run -p slick-demo
//! cargo run -p slick-demo -- path/to/slider.json
//! RUST_LOG=slick_slider=trace cargo run -p slick-demo
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use slick_core::Instant;
use slick_core::gesture::{PanRecognizer, PointerEvent};
use slick_slider::{Callbacks, Slider, SliderConfig};

const FRAME: Duration = Duration::from_millis(16);
const TRACK_X: f64 = 24.0;
const TRACK_WIDTH: f64 = 300.0;

/// One step of the script.
#[derive(Debug, Clone, Copy)]
enum Step {
    Pointer(PointerEvent),
    Frames(u32),
    Reseed(f64),
}

fn script() -> Vec<Step> {
    let y = 12.0;
    vec![
        Step::Frames(2),
        // Tap right of center, wait for the jump, then drag past the end.
        Step::Pointer(PointerEvent::Down { x: TRACK_X + 220.0, y }),
        Step::Frames(8),
        Step::Pointer(PointerEvent::Move { x: TRACK_X + 240.0, y }),
        Step::Frames(1),
        Step::Pointer(PointerEvent::Move { x: TRACK_X + 330.0, y }),
        Step::Frames(1),
        Step::Pointer(PointerEvent::Move { x: TRACK_X + 200.0, y }),
        Step::Frames(1),
        Step::Pointer(PointerEvent::Up { x: TRACK_X + 200.0, y }),
        Step::Frames(15),
        // Quick tap near the left end.
        Step::Pointer(PointerEvent::Down { x: TRACK_X + 5.0, y }),
        Step::Frames(2),
        Step::Pointer(PointerEvent::Up { x: TRACK_X + 5.0, y }),
        Step::Frames(15),
        Step::Reseed(42.0),
        Step::Frames(10),
    ]
}

fn load_config() -> Result<SliderConfig, String> {
    match std::env::args().nth(1) {
        Some(path) => SliderConfig::from_json_file(&path).map_err(|e| format!("{path}: {e}")),
        None => Ok(SliderConfig::default()
            .with_range(-50.0, 200.0)
            .with_initial_value(75.0)),
    }
}

fn main() {
    if let Err(e) = slick_core::logging::init_json_logging() {
        eprintln!("logging disabled: {e}");
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let clock = Rc::new(RefCell::new(start));
    let stamp = {
        let clock = Rc::clone(&clock);
        move |label: &str, value: f64| {
            let elapsed = clock.borrow().duration_since(start);
            println!("{:>6.1}ms  {label:<13} {value}", elapsed.as_secs_f64() * 1_000.0);
        }
    };
    let (on_change, on_start, on_end) = (stamp.clone(), stamp.clone(), stamp);
    let callbacks = Callbacks::new()
        .with_value_change(move |v| on_change("value_change", v))
        .with_slide_start(move |v| on_start("slide_start", v))
        .with_slide_end(move |v| on_end("slide_end", v));

    let mut slider = match Slider::new(config, callbacks) {
        Ok(slider) => slider,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    slider.on_wrapper_layout(TRACK_X);
    slider.on_slider_layout(TRACK_WIDTH);
    tracing::info!(
        message = "demo.ready",
        value = slider.value(),
        offset = slider.offset()
    );
    println!("start value {} at offset {:.1}", slider.display_text(), slider.offset());

    let mut pan = PanRecognizer::default();
    let mut now = start;
    for step in script() {
        match step {
            Step::Pointer(event) => {
                for pan_event in pan.process(event) {
                    slider.handle_pan(pan_event, now);
                }
            }
            Step::Frames(n) => {
                for _ in 0..n {
                    now += FRAME;
                    *clock.borrow_mut() = now;
                    slider.frame(now);
                }
            }
            Step::Reseed(value) => {
                if let Err(e) = slider.set_initial_value(value) {
                    eprintln!("re-seed rejected: {e}");
                }
            }
        }
    }

    println!(
        "final value {} at offset {:.1} ({:?})",
        slider.display_text(),
        slider.offset(),
        slider.phase()
    );
}
