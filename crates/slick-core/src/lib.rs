#![forbid(unsafe_code)]

//! Core: animated scalars, pan gesture recognition, and logging.
//!
//! # Role in slick
//! `slick-core` holds the collaborators the slider state machine drives but
//! does not own: the animation primitive that tweens the thumb, and the pan
//! recognizer that turns pointer input into cumulative drag deltas.
//!
//! # Primary responsibilities
//! - **AnimatedValue**: a scalar with an additive offset, timing/spring
//!   motions, and change listeners.
//! - **Animation**: normalized progress drivers (`Fade`, `Spring`) and easing.
//! - **PanRecognizer**: pointer down/move/up into grant/move/release events.
//!
//! # How it fits in the system
//! `slick-slider` consumes [`gesture::PanEvent`] values and mutates
//! [`animation::AnimatedValue`]s. Hosts render whatever those values hold.
//! Time is always injected by the caller, so everything here is
//! deterministic under test.

pub mod animation;
pub mod gesture;
pub mod logging;

pub use web_time::Instant;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
