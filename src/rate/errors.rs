//! Errors for rate estimators (filter-width checks, option validation, and
//! failures bubbled up from binning and smoothing).
//!
//! [`RateError`] is the single error type of the `rate` subtree. Lower-level
//! failures are carried unchanged in the `Binning` and `Smoothing` variants
//! so callers can still match on them; `?` converts them automatically.
//!
//! ## Conventions
//! - Filter widths are in the same units as the segment (e.g. seconds).
//! - "Bins per filter" is the ratio `filterwidth / binsize`.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{binning::errors::BinningError, smoothing::errors::SmoothingError};

/// Result alias for rate-estimator operations.
pub type RateResult<T> = Result<T, RateError>;

/// Unified error type for rate estimators.
#[derive(Debug, Clone, PartialEq)]
pub enum RateError {
    // ---- Filter width ----
    /// Filter width must be finite and > 0.
    InvalidFilterWidth { value: f64 },

    /// Filter must span at least `min_bins` bins.
    FilterTooNarrow { filterwidth: f64, binsize: f64, min_bins: usize },

    /// Segment and filter width together need more than `max` bins.
    TooManyBins { filterwidth: f64, duration: f64, max: usize },

    // ---- Options ----
    /// Bins per filter width must be >= 1.
    InvalidBinsPerFilter { value: usize },

    /// Minimum filter bins must be in `1..=bins_per_filter`.
    InvalidMinFilterBins { min_bins: usize, bins_per_filter: usize },

    // ---- Lower layers ----
    Binning(BinningError),
    Smoothing(SmoothingError),
}

impl std::error::Error for RateError {}

impl std::fmt::Display for RateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Filter width ----
            RateError::InvalidFilterWidth { value } => {
                write!(f, "Invalid filter width {value}: must be finite and > 0.")
            }
            RateError::FilterTooNarrow { filterwidth, binsize, min_bins } => write!(
                f,
                "Filter too narrow: width {filterwidth} spans {} bins of size {binsize} \
                 (need at least {min_bins}).",
                filterwidth / binsize
            ),
            RateError::TooManyBins { filterwidth, duration, max } => write!(
                f,
                "Filter width {filterwidth} is too small for a segment of duration {duration}: \
                 more than {max} bins would be needed."
            ),

            // ---- Options ----
            RateError::InvalidBinsPerFilter { value } => {
                write!(f, "Invalid bins per filter {value}: must be >= 1.")
            }
            RateError::InvalidMinFilterBins { min_bins, bins_per_filter } => write!(
                f,
                "Invalid minimum filter bins {min_bins}: must be in 1..={bins_per_filter}."
            ),

            // ---- Lower layers ----
            RateError::Binning(err) => write!(f, "{err}"),
            RateError::Smoothing(err) => write!(f, "{err}"),
        }
    }
}

impl From<BinningError> for RateError {
    fn from(err: BinningError) -> RateError {
        RateError::Binning(err)
    }
}

impl From<SmoothingError> for RateError {
    fn from(err: SmoothingError) -> RateError {
        RateError::Smoothing(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<RateError> for PyErr {
    fn from(err: RateError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
