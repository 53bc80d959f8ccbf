//! binning::axis — one dimension's discretization rule.
//!
//! Purpose
//! -------
//! Map a real coordinate onto an integer bin index along a single dimension,
//! with either linearly or logarithmically spaced bins, and produce the
//! representative coordinate ("centre") of every bin.
//!
//! Key behaviors
//! -------------
//! - [`Spacing`] is a plain tag; it selects the bin-width rule and the
//!   `position`/`centre` strategy pair used by [`Axis`]. No trait objects are
//!   involved, so axes of both kinds compose uniformly inside a grid.
//! - [`Axis::index`] treats the range as `[min, max)` plus the single point
//!   `max`, which maps to the last bin. Everything else is a range error.
//! - [`Axis::index_segment`] and [`Axis::index_slice`] convert intervals into
//!   half-open index ranges suitable for slicing arrays.
//!
//! Invariants & assumptions
//! ------------------------
//! - `min` and `max` are finite with `max > min`; `n >= 1`.
//! - Logarithmic axes have `min > 0`.
//! - Axes are immutable after construction.
//!
//! Conventions
//! -----------
//! - Linear bins have width `(max - min) / n`; logarithmic bins have constant
//!   log-width `ln(max / min) / n`.
//! - Linear centres are arithmetic midpoints, logarithmic centres geometric
//!   midpoints.
//! - `index` is `floor` of the fractional position, corrected by at most one
//!   bin against the exact bin edges so that a coordinate sitting on an edge
//!   lands in the upper bin despite rounding (`0.3 / 0.1 = 2.9999999999999996`).
use std::ops::Range;
use std::str::FromStr;

use ndarray::Array1;

use crate::binning::{
    errors::{BinningError, BinningResult},
    segment::Segment,
};

/// Bin spacing along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Spacing {
    #[default]
    Linear,
    Logarithmic,
}

impl Spacing {
    /// Bin width in the spacing's native measure (absolute or log).
    fn delta(self, min: f64, max: f64, n: usize) -> f64 {
        match self {
            Spacing::Linear => (max - min) / n as f64,
            Spacing::Logarithmic => (max / min).ln() / n as f64,
        }
    }

    /// Fractional bin position of `x` (bin `k` covers `[k, k + 1)`).
    fn position(self, min: f64, delta: f64, x: f64) -> f64 {
        match self {
            Spacing::Linear => (x - min) / delta,
            Spacing::Logarithmic => (x / min).ln() / delta,
        }
    }

    /// Coordinate of bin edge `k` of `n` (edge 0 is `min`, edge `n` is `max`).
    fn edge(self, min: f64, max: f64, n: usize, k: usize) -> f64 {
        let frac = k as f64 / n as f64;
        match self {
            Spacing::Linear => min + (max - min) * frac,
            Spacing::Logarithmic => min * (max / min).powf(frac),
        }
    }

    /// Coordinate at fractional bin position `k`.
    fn centre(self, min: f64, delta: f64, k: f64) -> f64 {
        match self {
            Spacing::Linear => min + delta * k,
            Spacing::Logarithmic => min * (delta * k).exp(),
        }
    }
}

impl FromStr for Spacing {
    type Err = BinningError;

    fn from_str(s: &str) -> BinningResult<Self> {
        match s {
            "lin" | "linear" => Ok(Spacing::Linear),
            "log" | "logarithmic" => Ok(Spacing::Logarithmic),
            other => Err(BinningError::UnknownSpacing { spacing: other.to_string() }),
        }
    }
}

/// Axis — `n` bins covering `[min, max]` with a given spacing.
///
/// Fields
/// ------
/// - `min`, `max`: closed coordinate range.
/// - `n`: number of bins.
/// - `spacing`: [`Spacing::Linear`] or [`Spacing::Logarithmic`].
/// - `delta`: cached bin width derived from the other three.
///
/// Equality compares spacing, bounds, and bin count (`delta` follows from
/// them).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    min: f64,
    max: f64,
    n: usize,
    spacing: Spacing,
    delta: f64,
}

impl Axis {
    /// Construct an axis.
    ///
    /// Parameters
    /// ----------
    /// - `min`, `max`: `f64`
    ///   Finite bounds with `max > min`; `min > 0` for logarithmic spacing.
    /// - `n`: `usize`
    ///   Number of bins, at least 1.
    /// - `spacing`: [`Spacing`]
    ///
    /// Errors
    /// ------
    /// - [`BinningError::InvalidBounds`] for non-finite bounds or `max <= min`.
    /// - [`BinningError::InvalidBinCount`] for `n == 0`.
    /// - [`BinningError::NonPositiveLogMin`] for logarithmic spacing with `min <= 0`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use binsmooth::binning::axis::{Axis, Spacing};
    /// let axis = Axis::new(0.0, 10.0, 5, Spacing::Linear).unwrap();
    /// assert_eq!(axis.index(3.0).unwrap(), 1);
    /// assert_eq!(axis.index(10.0).unwrap(), 4);
    /// assert!(axis.index(10.5).is_err());
    /// ```
    pub fn new(min: f64, max: f64, n: usize, spacing: Spacing) -> BinningResult<Self> {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(BinningError::InvalidBounds { min, max });
        }
        if n == 0 {
            return Err(BinningError::InvalidBinCount { n });
        }
        if spacing == Spacing::Logarithmic && min <= 0.0 {
            return Err(BinningError::NonPositiveLogMin { min });
        }
        let delta = spacing.delta(min, max, n);
        Ok(Axis { min, max, n, spacing, delta })
    }

    /// Linearly spaced axis.
    pub fn linear(min: f64, max: f64, n: usize) -> BinningResult<Self> {
        Axis::new(min, max, n, Spacing::Linear)
    }

    /// Logarithmically spaced axis.
    pub fn logarithmic(min: f64, max: f64, n: usize) -> BinningResult<Self> {
        Axis::new(min, max, n, Spacing::Logarithmic)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Bin width: absolute for linear axes, natural-log width for logarithmic ones.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Bin index of coordinate `x`.
    ///
    /// Returns
    /// -------
    /// `index ∈ [0, n)`. `x == max` is the closed-endpoint exception and maps
    /// to `n - 1`.
    ///
    /// Errors
    /// ------
    /// - [`BinningError::NonPositiveLogCoordinate`] for `x <= 0` on a
    ///   logarithmic axis.
    /// - [`BinningError::OutOfRange`] for `x < min`, `x > max`, or NaN.
    pub fn index(&self, x: f64) -> BinningResult<usize> {
        if self.spacing == Spacing::Logarithmic && x <= 0.0 {
            return Err(BinningError::NonPositiveLogCoordinate { value: x });
        }
        if x == self.max {
            return Ok(self.n - 1);
        }
        if !(self.min <= x && x < self.max) {
            return Err(BinningError::OutOfRange { value: x, min: self.min, max: self.max });
        }
        let pos = self.spacing.position(self.min, self.delta, x);
        let mut k = (pos.floor().max(0.0) as usize).min(self.n - 1);
        // Rounding in `pos` can be off by one bin at an edge.
        if k + 1 < self.n && self.edge(k + 1) <= x {
            k += 1;
        } else if k > 0 && self.edge(k) > x {
            k -= 1;
        }
        Ok(k)
    }

    /// Half-open index range covering the closed interval `segment`:
    /// `index(start)..index(end) + 1`.
    pub fn index_segment(&self, segment: &Segment) -> BinningResult<Range<usize>> {
        Ok(self.index(segment.start())?..self.index(segment.end())? + 1)
    }

    /// Half-open index range for the half-open slice `[start, stop)`:
    /// `index(start)..index(stop)`, empty when `stop` falls in an earlier bin.
    ///
    /// # Errors
    /// - [`BinningError::UnsupportedStep`] whenever `step` is given.
    /// - Any error of [`Axis::index`] for either endpoint.
    pub fn index_slice(&self, start: f64, stop: f64, step: Option<f64>) -> BinningResult<Range<usize>> {
        if let Some(step) = step {
            return Err(BinningError::UnsupportedStep { step });
        }
        let (lo, hi) = (self.index(start)?, self.index(stop)?);
        Ok(lo..hi.max(lo))
    }

    fn edge(&self, k: usize) -> f64 {
        self.spacing.edge(self.min, self.max, self.n, k)
    }

    /// The `n` bin centres in increasing order.
    pub fn centres(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.n, |k| self.spacing.centre(self.min, self.delta, k as f64 + 0.5))
    }

    /// Structural equality: same spacing, bounds, and bin count.
    pub fn equals(&self, other: &Axis) -> bool {
        self.spacing == other.spacing
            && self.min == other.min
            && self.max == other.max
            && self.n == other.n
    }
}
