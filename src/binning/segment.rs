//! Time segments — the minimal `(start, end)` interval consumed by the binning core.
//!
//! Segment-list algebra (unions, intersections, coalescing) lives with the
//! callers; this type only carries validated bounds and a duration.
use crate::binning::errors::{BinningError, BinningResult};

/// A closed interval `[start, end]` with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: f64,
    end: f64,
}

impl Segment {
    /// Construct a segment.
    ///
    /// # Errors
    /// - [`BinningError::InvalidSegment`] if either bound is non-finite or
    ///   `end <= start`.
    pub fn new(start: f64, end: f64) -> BinningResult<Self> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(BinningError::InvalidSegment { start, end });
        }
        Ok(Segment { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// `end - start`, always strictly positive.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl TryFrom<(f64, f64)> for Segment {
    type Error = BinningError;

    fn try_from((start, end): (f64, f64)) -> BinningResult<Self> {
        Segment::new(start, end)
    }
}
