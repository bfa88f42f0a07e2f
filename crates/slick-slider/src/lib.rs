#![forbid(unsafe_code)]

//! Gesture-to-value state machine for a draggable slider thumb.
//!
//! # Role in slick
//! `slick-slider` turns pan gestures into a bounded numeric value. It keeps
//! three things consistent at all times: the animated thumb position, the
//! resting offset with its dead-band overflow, and the rounded value derived
//! from the thumb position.
//!
//! # Primary responsibilities
//! - **ValueInterpolator**: clamped linear pixel/value mapping, either
//!   direction.
//! - **GestureOffsetTracker**: resting offset plus overflow bookkeeping.
//! - **DragController**: idle/seeding/jumping/dragging phases, tap-to-jump.
//! - **ChangeNotifier**: throttled, deduplicated value changes and slide
//!   start/end.
//! - **Slider**: the headless widget shell binding all of the above.
//!
//! # How it fits in the system
//! Pan events come from [`slick_core::gesture::PanRecognizer`] (or any host
//! gesture system producing the same cumulative deltas), animation is
//! [`slick_core::animation::AnimatedValue`]. Rendering is left to the host.

pub mod config;
pub mod controller;
pub mod error;
pub mod interpolator;
pub mod notifier;
pub mod slider;
pub mod tracker;

pub use config::{DEFAULT_THROTTLE, MAX_DECIMAL_PRECISION, MotionConfig, Presentation, SliderConfig};
pub use controller::{DragController, GestureEdge, Phase};
#[cfg(feature = "serde")]
pub use error::ConfigLoadError;
pub use error::ConfigError;
pub use interpolator::{PixelDomain, ValueInterpolator, ValueRange, round_to_precision};
pub use notifier::{Callbacks, ChangeNotifier, SliderObserver};
pub use slider::Slider;
pub use tracker::GestureOffsetTracker;
