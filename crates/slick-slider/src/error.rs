#![forbid(unsafe_code)]

//! Error types.
//!
//! Only configuration can fail. An unmeasured layout is not an error (gestures
//! are ignored until the track has a width), and dragging past the track ends
//! is a dead band, never reported.

use std::fmt;

/// Invalid slider configuration. Fatal to construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `low == high`.
    EqualBounds(f64),
    /// A range bound is NaN or infinite.
    NonFiniteBound { low: f64, high: f64 },
    /// The initial value lies outside the range.
    InitialValueOutOfRange { value: f64, low: f64, high: f64 },
    /// The initial value is NaN or infinite.
    NonFiniteInitialValue(f64),
    /// Thumb size is negative or not finite.
    InvalidThumbSize(f64),
    /// More decimal digits than an `f64` can represent meaningfully.
    PrecisionTooLarge { precision: u8, max: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EqualBounds(bound) => {
                write!(f, "range bounds must differ, both are {bound}")
            }
            Self::NonFiniteBound { low, high } => {
                write!(f, "range bounds must be finite, got ({low}, {high})")
            }
            Self::InitialValueOutOfRange { value, low, high } => {
                write!(f, "initial value {value} is outside range ({low}, {high})")
            }
            Self::NonFiniteInitialValue(value) => {
                write!(f, "initial value must be finite, got {value}")
            }
            Self::InvalidThumbSize(size) => {
                write!(f, "thumb size must be a finite non-negative number, got {size}")
            }
            Self::PrecisionTooLarge { precision, max } => {
                write!(f, "decimal precision {precision} exceeds maximum {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors while loading a configuration from JSON.
#[cfg(feature = "serde")]
#[derive(Debug)]
pub enum ConfigLoadError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// The document parsed but describes an invalid slider.
    Invalid(ConfigError),
}

#[cfg(feature = "serde")]
impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

#[cfg(feature = "serde")]
impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

#[cfg(feature = "serde")]
impl From<ConfigError> for ConfigLoadError {
    fn from(error: ConfigError) -> Self {
        Self::Invalid(error)
    }
}
