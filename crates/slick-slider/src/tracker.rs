#![forbid(unsafe_code)]

//! Resting offset and overflow bookkeeping for one drag at a time.
//!
//! Pan deltas are cumulative since the touch went down, so the tracker keeps
//! the offset the drag started from and adds each delta to it. Candidates
//! that leave `[0, domain_max]` fall into a dead band: the thumb stays where
//! it was and the excess is remembered as overflow. At release the overflow
//! is subtracted back out so the thumb lands on the boundary.
//!
//! # Invariants
//!
//! 1. [`offset`](GestureOffsetTracker::offset) is always within the domain.
//! 2. Overflow is negative only below the domain, positive only above it,
//!    and zero whenever the latest candidate was in bounds.
//! 3. [`end_drag`](GestureOffsetTracker::end_drag) always resets overflow.

/// Offset accumulator for the slider thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureOffsetTracker {
    offset: f64,
    overflow: f64,
    domain_max: f64,
}

impl GestureOffsetTracker {
    /// Tracker resting at `0` in the domain `[0, domain_max]`.
    #[must_use]
    pub fn new(domain_max: f64) -> Self {
        Self {
            offset: 0.0,
            overflow: 0.0,
            domain_max: domain_max.max(0.0),
        }
    }

    /// Snapshot `initial` (clamped) as the baseline of a new drag.
    pub fn begin_drag(&mut self, initial: f64) {
        self.offset = self.clamp(initial);
        self.overflow = 0.0;
    }

    /// Integrate a cumulative delta.
    ///
    /// Returns the in-bounds candidate, or `None` while it is in the dead band.
    pub fn apply_delta(&mut self, delta: f64) -> Option<f64> {
        let candidate = self.offset + delta;
        if candidate < 0.0 {
            self.overflow = candidate;
            None
        } else if candidate > self.domain_max {
            self.overflow = candidate - self.domain_max;
            None
        } else if candidate.is_nan() {
            None
        } else {
            self.overflow = 0.0;
            Some(candidate)
        }
    }

    /// Finish the drag with its final cumulative delta; returns the new offset.
    pub fn end_drag(&mut self, final_delta: f64) -> f64 {
        let landed = self.offset + final_delta - self.overflow;
        self.offset = self.clamp(landed);
        self.overflow = 0.0;
        self.offset
    }

    /// Adopt a new domain, keeping the offset inside it.
    pub fn reset_domain(&mut self, domain_max: f64) {
        self.domain_max = domain_max.max(0.0);
        self.offset = self.clamp(self.offset);
        self.overflow = 0.0;
    }

    /// Place the thumb at `offset` outside of any drag.
    pub fn place(&mut self, offset: f64) {
        self.begin_drag(offset);
    }

    /// Resting offset, or the baseline of the drag in progress.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Signed dead-band excess of the latest candidate.
    #[inline]
    #[must_use]
    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Upper bound of the domain.
    #[inline]
    #[must_use]
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.domain_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_at(domain_max: f64, baseline: f64) -> GestureOffsetTracker {
        let mut t = GestureOffsetTracker::new(domain_max);
        t.begin_drag(baseline);
        t
    }

    #[test]
    fn in_bounds_release() {
        let mut t = tracker_at(100.0, 40.0);
        assert_eq!(t.apply_delta(30.0), Some(70.0));
        assert_eq!(t.end_drag(30.0), 70.0);
        assert_eq!(t.overflow(), 0.0);
    }

    #[test]
    fn overflow_release_lands_on_upper_bound() {
        let mut t = tracker_at(100.0, 40.0);
        assert_eq!(t.apply_delta(80.0), None);
        assert_eq!(t.overflow(), 20.0);
        assert_eq!(t.end_drag(80.0), 100.0);
        assert_eq!(t.overflow(), 0.0);
    }

    #[test]
    fn underflow_is_negative_and_lands_on_zero() {
        let mut t = tracker_at(100.0, 10.0);
        assert_eq!(t.apply_delta(-25.0), None);
        assert_eq!(t.overflow(), -15.0);
        assert_eq!(t.end_drag(-25.0), 0.0);
    }

    #[test]
    fn dead_band_exit_resumes_and_clears_overflow() {
        let mut t = tracker_at(100.0, 50.0);
        assert_eq!(t.apply_delta(80.0), None);
        assert_eq!(t.overflow(), 30.0);
        assert_eq!(t.apply_delta(40.0), Some(90.0));
        assert_eq!(t.overflow(), 0.0);
        assert_eq!(t.end_drag(40.0), 90.0);
    }

    #[test]
    fn release_beyond_last_overflow_is_clamped() {
        let mut t = tracker_at(100.0, 50.0);
        t.apply_delta(60.0);
        assert_eq!(t.end_drag(90.0), 100.0);
    }

    #[test]
    fn boundaries_are_in_bounds() {
        let mut t = tracker_at(100.0, 50.0);
        assert_eq!(t.apply_delta(50.0), Some(100.0));
        assert_eq!(t.apply_delta(-50.0), Some(0.0));
    }

    #[test]
    fn begin_drag_clamps_baseline() {
        let t = tracker_at(100.0, 150.0);
        assert_eq!(t.offset(), 100.0);
        let t = tracker_at(100.0, f64::NAN);
        assert_eq!(t.offset(), 0.0);
    }

    #[test]
    fn reset_domain_keeps_offset_inside() {
        let mut t = tracker_at(200.0, 180.0);
        t.reset_domain(120.0);
        assert_eq!(t.offset(), 120.0);
        assert_eq!(t.domain_max(), 120.0);
    }

    #[test]
    fn nan_delta_is_ignored() {
        let mut t = tracker_at(100.0, 50.0);
        assert_eq!(t.apply_delta(f64::NAN), None);
        assert_eq!(t.end_drag(f64::NAN), 0.0);
    }
}
