//! rate::estimator — smoothed event rates over a time segment.
//!
//! Purpose
//! -------
//! Bind a time segment and a filter width to an automatically sized 1-D
//! grid, accumulate weighted impulsive events into it, and read back a
//! smoothed rate curve in events (or event weight) per unit time.
//!
//! Key behaviors
//! -------------
//! - Construction fixes `binsize = filterwidth / bins_per_filter` and a
//!   linear grid over `[start, end]` with
//!   `n = ceil(duration / binsize) + 1` bins. Sizings above [`MAX_BINS`]
//!   are rejected before any allocation.
//! - [`RateEstimator::set_filterwidth`] changes only the filter width; the
//!   grid never changes after construction. Widths spanning fewer than
//!   `min_filter_bins` bins are rejected.
//! - `window()` is the selected window sized in bins and divided by
//!   `binsize`, which turns a per-bin kernel into a per-unit-time one.
//! - `yvals()` convolves a copy of the binned data, so repeated reads return
//!   the same curve and never disturb the accumulated counts.
//!
//! Invariants & assumptions
//! ------------------------
//! - `filterwidth` is always finite and > 0.
//! - The grid is one-dimensional and linear.
//! - Nothing is cached: each `window()`/`yvals()` call recomputes.
//!
//! Downstream usage
//! ----------------
//! - Use [`RateEstimator`] for a plain rate and [`RatioRateEstimator`] for
//!   a smoothed ratio (e.g. efficiency vs. time).
//! - With the `python-bindings` feature both are wrapped as `Rate` and
//!   `RatiosRate`.
//!
//! Testing notes
//! -------------
//! - Unit tests here cover sizing, filter-width validation, the window
//!   scaling, and that reads leave the accumulators untouched. The full
//!   accumulate → smooth pipeline is exercised in
//!   `tests/integration_rate_pipeline.rs`.
use ndarray::{Array1, ArrayD, Ix1};
use tracing::debug;

use crate::{
    accumulate::{DenseAccumulator, RatioAccumulator},
    binning::{grid::Grid, segment::Segment},
    rate::{
        errors::{RateError, RateResult},
        options::RateOptions,
    },
    smoothing::{
        errors::SmoothingError,
        filter::{Boundary, filter_array},
    },
};

/// Largest grid an estimator will size for itself.
pub const MAX_BINS: usize = 1 << 28;

/// Segment, filter width, and bin sizing shared by both estimators.
#[derive(Debug, Clone, PartialEq)]
struct FilterBinding {
    segment: Segment,
    filterwidth: f64,
    binsize: f64,
    options: RateOptions,
}

impl FilterBinding {
    fn new(segment: Segment, filterwidth: f64, options: RateOptions) -> RateResult<(Self, Grid)> {
        check_filterwidth(filterwidth)?;
        let binsize = filterwidth / options.bins_per_filter() as f64;
        let bins = (segment.duration() / binsize).ceil() + 1.0;
        if !(bins <= MAX_BINS as f64) {
            return Err(RateError::TooManyBins { filterwidth, duration: segment.duration(), max: MAX_BINS });
        }
        let n = bins as usize;
        let grid = Grid::linear(segment.start(), segment.end(), n)?;
        debug!(
            start = segment.start(),
            end = segment.end(),
            filterwidth,
            binsize,
            bins = n,
            window = ?options.window(),
            "rate estimator constructed"
        );
        Ok((FilterBinding { segment, filterwidth, binsize, options }, grid))
    }

    fn set_filterwidth(&mut self, filterwidth: f64) -> RateResult<()> {
        check_filterwidth(filterwidth)?;
        let min_bins = self.options.min_filter_bins();
        if filterwidth / self.binsize < min_bins as f64 {
            return Err(RateError::FilterTooNarrow { filterwidth, binsize: self.binsize, min_bins });
        }
        debug!(from = self.filterwidth, to = filterwidth, "filter width changed");
        self.filterwidth = filterwidth;
        Ok(())
    }

    fn window(&self) -> RateResult<Array1<f64>> {
        let window = self.options.window().window_1d(self.filterwidth / self.binsize)?;
        Ok(window / self.binsize)
    }

    /// Filter `data` with the current window and return it as 1-D.
    fn smooth(&self, mut data: ArrayD<f64>, boundary: Boundary) -> RateResult<Array1<f64>> {
        let window = self.window()?.into_dyn();
        filter_array(&mut data, &window, boundary)?;
        Ok(data.into_dimensionality::<Ix1>().map_err(SmoothingError::from)?)
    }
}

fn check_filterwidth(filterwidth: f64) -> RateResult<()> {
    if !(filterwidth.is_finite() && filterwidth > 0.0) {
        return Err(RateError::InvalidFilterWidth { value: filterwidth });
    }
    Ok(())
}

/// RateEstimator — binned and smoothed event rate over a segment.
///
/// Parameters
/// ----------
/// Constructed via:
/// - `RateEstimator::new(segment, filterwidth)` with default [`RateOptions`].
/// - `RateEstimator::with_options(segment, filterwidth, options)`.
///
/// Invariants
/// ----------
/// - `binsize()` and `grid()` are fixed at construction.
/// - `filterwidth() / binsize() >= options.min_filter_bins()` after any
///   successful `set_filterwidth`.
///
/// Examples
/// --------
/// ```rust
/// # use binsmooth::{binning::Segment, rate::RateEstimator, smoothing::Boundary};
/// let mut rate = RateEstimator::new(Segment::new(0.0, 100.0).unwrap(), 10.0).unwrap();
/// assert_eq!(rate.binsize(), 0.5);
/// assert_eq!(rate.grid().shape(), vec![201]);
///
/// rate.accumulate(50.0, 1.0).unwrap();
/// let y = rate.yvals(Boundary::Bounded).unwrap();
/// // One event integrates to one.
/// assert!((y.sum() * rate.binsize() - 1.0).abs() < 1e-9);
/// assert!(rate.set_filterwidth(1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateEstimator {
    binding: FilterBinding,
    accumulator: DenseAccumulator,
}

impl RateEstimator {
    /// Estimator with the default options.
    ///
    /// # Errors
    /// - [`RateError::InvalidFilterWidth`] if `filterwidth` is not finite and > 0.
    /// - [`RateError::Binning`] if the derived grid cannot be built.
    pub fn new(segment: Segment, filterwidth: f64) -> RateResult<Self> {
        Self::with_options(segment, filterwidth, RateOptions::default())
    }

    pub fn with_options(segment: Segment, filterwidth: f64, options: RateOptions) -> RateResult<Self> {
        let (binding, grid) = FilterBinding::new(segment, filterwidth, options)?;
        Ok(RateEstimator { binding, accumulator: DenseAccumulator::new(grid) })
    }

    /// Add `weight` to the bin containing time `t`.
    ///
    /// # Errors
    /// - [`RateError::Binning`] wrapping a range error if `t` lies outside
    ///   the segment.
    pub fn accumulate(&mut self, t: f64, weight: f64) -> RateResult<()> {
        Ok(self.accumulator.accumulate(&[t], weight)?)
    }

    /// Change the filter width used by `window()` and `yvals()`.
    ///
    /// # Errors
    /// - [`RateError::InvalidFilterWidth`] if `filterwidth` is not finite and > 0.
    /// - [`RateError::FilterTooNarrow`] if it spans fewer than
    ///   `min_filter_bins` bins. The width is unchanged on error.
    pub fn set_filterwidth(&mut self, filterwidth: f64) -> RateResult<()> {
        self.binding.set_filterwidth(filterwidth)
    }

    /// Window in per-unit-time normalization.
    pub fn window(&self) -> RateResult<Array1<f64>> {
        self.binding.window()
    }

    /// Bin centres along the time axis.
    pub fn xvals(&self) -> Array1<f64> {
        self.accumulator.grid().axes()[0].centres()
    }

    /// Smoothed rate, one value per bin.
    ///
    /// # Errors
    /// - [`RateError::Smoothing`] if the window is wider than the grid.
    pub fn yvals(&self, boundary: Boundary) -> RateResult<Array1<f64>> {
        self.binding.smooth(self.accumulator.array().clone(), boundary)
    }

    pub fn segment(&self) -> Segment {
        self.binding.segment
    }

    pub fn filterwidth(&self) -> f64 {
        self.binding.filterwidth
    }

    pub fn binsize(&self) -> f64 {
        self.binding.binsize
    }

    pub fn options(&self) -> RateOptions {
        self.binding.options
    }

    pub fn grid(&self) -> &Grid {
        self.accumulator.grid()
    }

    pub fn accumulator(&self) -> &DenseAccumulator {
        &self.accumulator
    }
}

/// RatioRateEstimator — smoothed ratio of two binned event streams.
///
/// Same sizing and filter-width rules as [`RateEstimator`], but backed by a
/// [`RatioAccumulator`]. `yvals()` smooths `ratio()`, so empty bins should
/// be regularized first or they propagate NaN through the window.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioRateEstimator {
    binding: FilterBinding,
    accumulator: RatioAccumulator,
}

impl RatioRateEstimator {
    pub fn new(segment: Segment, filterwidth: f64) -> RateResult<Self> {
        Self::with_options(segment, filterwidth, RateOptions::default())
    }

    pub fn with_options(segment: Segment, filterwidth: f64, options: RateOptions) -> RateResult<Self> {
        let (binding, grid) = FilterBinding::new(segment, filterwidth, options)?;
        Ok(RatioRateEstimator { binding, accumulator: RatioAccumulator::new(grid) })
    }

    pub fn increment_numerator(&mut self, t: f64, weight: f64) -> RateResult<()> {
        Ok(self.accumulator.increment_numerator(&[t], weight)?)
    }

    pub fn increment_denominator(&mut self, t: f64, weight: f64) -> RateResult<()> {
        Ok(self.accumulator.increment_denominator(&[t], weight)?)
    }

    /// See [`RatioAccumulator::regularize`].
    pub fn regularize(&mut self) -> &mut Self {
        self.accumulator.regularize();
        self
    }

    /// See [`RatioAccumulator::log_regularize`].
    pub fn log_regularize(&mut self, epsilon: Option<f64>) -> &mut Self {
        self.accumulator.log_regularize(epsilon);
        self
    }

    /// Unsmoothed per-bin ratio.
    pub fn ratio(&self) -> Array1<f64> {
        // The grid is 1-D, so the flattened ratio has the same layout.
        self.accumulator.ratio().into_iter().collect()
    }

    pub fn set_filterwidth(&mut self, filterwidth: f64) -> RateResult<()> {
        self.binding.set_filterwidth(filterwidth)
    }

    pub fn window(&self) -> RateResult<Array1<f64>> {
        self.binding.window()
    }

    pub fn xvals(&self) -> Array1<f64> {
        self.accumulator.grid().axes()[0].centres()
    }

    /// Smoothed ratio, one value per bin.
    pub fn yvals(&self, boundary: Boundary) -> RateResult<Array1<f64>> {
        self.binding.smooth(self.accumulator.ratio(), boundary)
    }

    pub fn segment(&self) -> Segment {
        self.binding.segment
    }

    pub fn filterwidth(&self) -> f64 {
        self.binding.filterwidth
    }

    pub fn binsize(&self) -> f64 {
        self.binding.binsize
    }

    pub fn options(&self) -> RateOptions {
        self.binding.options
    }

    pub fn grid(&self) -> &Grid {
        self.accumulator.grid()
    }

    pub fn accumulator(&self) -> &RatioAccumulator {
        &self.accumulator
    }
}
