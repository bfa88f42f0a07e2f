#![forbid(unsafe_code)]

//! Slider configuration.
//!
//! [`SliderConfig`] is supplied once per slider and never mutated by it,
//! apart from re-seed requests that replace the initial value. Every field
//! has a default matching the stock slider: range `(0, 100)`, thumb size 30,
//! initial value 50, whole-number precision, a 16ms change throttle.
//!
//! Presentation fields are carried for hosts that render from the config;
//! they have no effect on behavior.
//!
//! # Loading
//!
//! With the `serde` feature the config round-trips through JSON. Durations
//! are written as integer milliseconds and missing fields take defaults:
//!
//! ```json
//! { "range": [-50, 200], "size": 30, "initial_value": 75, "throttle_ms": 16 }
//! ```

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::interpolator::ValueRange;

/// Largest accepted decimal precision.
pub const MAX_DECIMAL_PRECISION: u8 = 15;

/// Default change-notification window, one 60Hz frame.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(16);

/// Immutable per-slider settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderConfig {
    /// `(low, high)`; low is the value at the left end of the track.
    pub range: (f64, f64),
    /// Thumb diameter in layout pixels.
    pub size: f64,
    /// Starting value; must lie within the range.
    pub initial_value: f64,
    /// Digits the value is rounded to.
    pub decimal_precision: u8,
    /// Change-notification coalescing window.
    #[cfg_attr(feature = "serde", serde(rename = "throttle_ms", with = "duration_ms"))]
    pub throttle: Duration,
    /// Cosmetic motion parameters.
    pub motion: MotionConfig,
    /// Presentation only.
    pub presentation: Presentation,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            range: (0.0, 100.0),
            size: 30.0,
            initial_value: 50.0,
            decimal_precision: 0,
            throttle: DEFAULT_THROTTLE,
            motion: MotionConfig::default(),
            presentation: Presentation::default(),
        }
    }
}

impl SliderConfig {
    /// Set the value range (builder pattern).
    #[must_use]
    pub fn with_range(mut self, low: f64, high: f64) -> Self {
        self.range = (low, high);
        self
    }

    /// Set the thumb size (builder pattern).
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the initial value (builder pattern).
    #[must_use]
    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = value;
        self
    }

    /// Set the decimal precision (builder pattern).
    #[must_use]
    pub fn with_decimal_precision(mut self, digits: u8) -> Self {
        self.decimal_precision = digits;
        self
    }

    /// Set the change-notification window (builder pattern).
    #[must_use]
    pub fn with_throttle(mut self, window: Duration) -> Self {
        self.throttle = window;
        self
    }

    /// Set the motion parameters (builder pattern).
    #[must_use]
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set presentation fields (builder pattern).
    #[must_use]
    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    /// Validate every behavioral field, returning the checked range.
    pub fn validate(&self) -> Result<ValueRange, ConfigError> {
        let range = ValueRange::try_from(self.range)?;
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(ConfigError::InvalidThumbSize(self.size));
        }
        if self.decimal_precision > MAX_DECIMAL_PRECISION {
            return Err(ConfigError::PrecisionTooLarge {
                precision: self.decimal_precision,
                max: MAX_DECIMAL_PRECISION,
            });
        }
        check_value(&range, self.initial_value)?;
        Ok(range)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, crate::error::ConfigLoadError> {
        let config: Self =
            serde_json::from_str(s).map_err(crate::error::ConfigLoadError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk and validate.
    #[cfg(feature = "serde")]
    pub fn from_json_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::error::ConfigLoadError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(crate::error::ConfigLoadError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty JSON.
    #[cfg(feature = "serde")]
    pub fn to_json_string(&self) -> Result<String, crate::error::ConfigLoadError> {
        serde_json::to_string_pretty(self).map_err(crate::error::ConfigLoadError::Json)
    }
}

/// Check that `value` is a finite member of `range`.
pub(crate) fn check_value(range: &ValueRange, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteInitialValue(value));
    }
    if !range.contains(value) {
        return Err(ConfigError::InitialValueOutOfRange {
            value,
            low: range.low(),
            high: range.high(),
        });
    }
    Ok(())
}

/// Durations and springiness of the thumb's animations.
///
/// None of these affect which value is produced; they only shape how the
/// thumb travels there.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Tween from the resting position to a tapped position.
    #[cfg_attr(feature = "serde", serde(rename = "jump_ms", with = "duration_ms"))]
    pub jump: Duration,
    /// Tween to a re-seeded value.
    #[cfg_attr(feature = "serde", serde(rename = "reseed_ms", with = "duration_ms"))]
    pub reseed: Duration,
    /// Period of the thumb lift spring.
    #[cfg_attr(feature = "serde", serde(rename = "thumb_lift_ms", with = "duration_ms"))]
    pub thumb_lift: Duration,
    /// Period of the drop lift spring.
    #[cfg_attr(feature = "serde", serde(rename = "drop_lift_ms", with = "duration_ms"))]
    pub drop_lift: Duration,
    /// Bounciness of both lift springs, `0..=20`.
    pub bounciness: f64,
    /// How far the drop rises, in pixels (negative is up).
    pub drop_offset: f64,
    /// Tween lowering both decorations on release.
    #[cfg_attr(feature = "serde", serde(rename = "lower_ms", with = "duration_ms"))]
    pub lower: Duration,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            jump: Duration::from_millis(100),
            reseed: Duration::from_millis(100),
            thumb_lift: Duration::from_millis(200),
            drop_lift: Duration::from_millis(300),
            bounciness: 15.0,
            drop_offset: -2.0,
            lower: Duration::from_millis(200),
        }
    }
}

/// Colors and text styling. Opaque strings, interpreted by the host.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Presentation {
    /// Accent color used wherever a more specific color is unset.
    pub color: String,
    /// Track background; falls back to `color`.
    pub background_color: Option<String>,
    /// Thumb border; falls back to `color`.
    pub value_border_color: Option<String>,
    /// Drop shadow; falls back to `color`.
    pub drop_color: Option<String>,
    /// Range label color on the track.
    pub slider_text_color: String,
    /// Value label color inside the thumb.
    pub value_text_color: String,
    /// Track corner radius.
    pub slider_border_radius: f64,
    /// Range label font weight.
    pub slider_font_weight: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            color: "#6168e7".to_string(),
            background_color: None,
            value_border_color: None,
            drop_color: None,
            slider_text_color: "white".to_string(),
            value_text_color: "black".to_string(),
            slider_border_radius: 5.0,
            slider_font_weight: "bold".to_string(),
        }
    }
}

impl Presentation {
    /// Track background after fallback.
    #[must_use]
    pub fn track_color(&self) -> &str {
        self.background_color.as_deref().unwrap_or(&self.color)
    }

    /// Thumb border after fallback.
    #[must_use]
    pub fn border_color(&self) -> &str {
        self.value_border_color.as_deref().unwrap_or(&self.color)
    }

    /// Drop shadow after fallback.
    #[must_use]
    pub fn shadow_color(&self) -> &str {
        self.drop_color.as_deref().unwrap_or(&self.color)
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
