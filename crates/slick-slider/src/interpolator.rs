#![forbid(unsafe_code)]

//! Bidirectional linear mapping between thumb pixels and slider values.
//!
//! # Domains
//!
//! - [`PixelDomain`] is `[0, track_width - thumb_size]`: the left edge of the
//!   thumb can travel that far. It only exists once layout produced a
//!   positive width, so an unmeasured slider has no interpolator at all.
//! - [`ValueRange`] is `(low, high)` with `low != high`, in either direction.
//!
//! # Invariants
//!
//! 1. `forward` output always lies in the range; `inverse` output always lies
//!    in the domain. Out-of-bounds inputs saturate to the nearest bound.
//! 2. `forward` is monotonic: increasing for ascending ranges, decreasing
//!    for descending ones.
//! 3. `forward(0) == low` and `forward(max) == high` exactly.
//! 4. NaN inputs map to the domain start / range low.

use crate::error::ConfigError;

/// Numeric bounds of a slider. May be descending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    low: f64,
    high: f64,
}

impl ValueRange {
    /// Create a range, rejecting equal or non-finite bounds.
    pub fn new(low: f64, high: f64) -> Result<Self, ConfigError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ConfigError::NonFiniteBound { low, high });
        }
        if low == high {
            return Err(ConfigError::EqualBounds(low));
        }
        Ok(Self { low, high })
    }

    /// The value at the left end of the track.
    #[inline]
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// The value at the right end of the track.
    #[inline]
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Whether `low > high`.
    #[inline]
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.low > self.high
    }

    /// Smallest bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.low.min(self.high)
    }

    /// Largest bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.low.max(self.high)
    }

    /// Inclusive containment, independent of direction.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Saturate `value` into the range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.low;
        }
        value.clamp(self.min(), self.max())
    }
}

impl TryFrom<(f64, f64)> for ValueRange {
    type Error = ConfigError;

    fn try_from((low, high): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

/// The pixel span `[0, max]` the thumb's left edge travels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelDomain {
    max: f64,
}

impl PixelDomain {
    /// Domain for a measured track. `None` while the span is not positive.
    #[must_use]
    pub fn new(track_width: f64, thumb_size: f64) -> Option<Self> {
        Self::with_max(track_width - thumb_size)
    }

    /// Domain `[0, max]`. `None` unless `max` is positive and finite.
    #[must_use]
    pub fn with_max(max: f64) -> Option<Self> {
        (max.is_finite() && max > 0.0).then_some(Self { max })
    }

    /// Upper bound of the domain.
    #[inline]
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Saturate `offset` into the domain.
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max)
    }

    /// Whether `offset` lies in `[0, max]`.
    #[must_use]
    pub fn contains(&self, offset: f64) -> bool {
        (0.0..=self.max).contains(&offset)
    }
}

/// Linear pixel/value mapping with saturation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueInterpolator {
    domain: PixelDomain,
    range: ValueRange,
}

impl ValueInterpolator {
    /// Build the mapping for a measured domain.
    #[must_use]
    pub fn build(domain: PixelDomain, range: ValueRange) -> Self {
        Self { domain, range }
    }

    /// Map a pixel offset to a value, clamped to the range.
    #[must_use]
    pub fn forward(&self, offset: f64) -> f64 {
        let t = self.domain.clamp(offset) / self.domain.max;
        if t >= 1.0 {
            return self.range.high;
        }
        let value = self.range.low + (self.range.high - self.range.low) * t;
        self.range.clamp(value)
    }

    /// Map a value to a pixel offset, clamped to the domain.
    #[must_use]
    pub fn inverse(&self, value: f64) -> f64 {
        let value = self.range.clamp(value);
        let t = (value - self.range.low) / (self.range.high - self.range.low);
        self.domain.clamp(t * self.domain.max)
    }

    /// Pixel midpoint of the domain.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.domain.max / 2.0
    }

    /// Upper bound of the pixel domain.
    #[inline]
    #[must_use]
    pub fn domain_max(&self) -> f64 {
        self.domain.max
    }

    /// The pixel domain.
    #[inline]
    #[must_use]
    pub fn domain(&self) -> PixelDomain {
        self.domain
    }

    /// The value range.
    #[inline]
    #[must_use]
    pub fn range(&self) -> ValueRange {
        self.range
    }
}

/// Round `value` to `digits` decimal places, half away from zero.
///
/// Negative zero is normalized to `0.0` so formatted output never shows `-0`.
/// Values too large to carry `digits` fractional digits are returned as is.
#[must_use]
pub fn round_to_precision(value: f64, digits: u8) -> f64 {
    const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    let scale = 10f64.powi(i32::from(digits));
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    let rounded = scaled.round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}
