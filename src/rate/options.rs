//! Rate options — configuration for rate estimators.
//!
//! Purpose
//! -------
//! Collect the knobs that decide how a rate estimator sizes its bins and
//! which window it smooths with, so the fixed rule (Gaussian window, 20
//! bins per filter width, at least 3 bins per filter) is one `Default`
//! rather than constants scattered through the estimator.
//!
//! Key behaviors
//! -------------
//! - [`RateOptions::new`] validates the bin counts; `Default` yields the
//!   fixed rule.
//! - Options are plain data: copying them into an estimator freezes them for
//!   that estimator's lifetime.
//!
//! Invariants & assumptions
//! ------------------------
//! - `bins_per_filter >= 1`.
//! - `1 <= min_filter_bins <= bins_per_filter`, so the filter width given at
//!   construction always passes the narrow-filter check.
use crate::{
    rate::errors::{RateError, RateResult},
    smoothing::window::WindowKind,
};

/// Bins per filter width under the default rule.
pub const DEFAULT_BINS_PER_FILTER: usize = 20;

/// Narrowest filter, in bins, accepted by `set_filterwidth` by default.
pub const DEFAULT_MIN_FILTER_BINS: usize = 3;

/// RateOptions — bin sizing and window selection for rate estimators.
///
/// Fields
/// ------
/// - `window`: [`WindowKind`]
///   Window family used by `window()` and `yvals()`.
/// - `bins_per_filter`: `usize`
///   `binsize = filterwidth / bins_per_filter` at construction.
/// - `min_filter_bins`: `usize`
///   `set_filterwidth(w)` rejects `w / binsize < min_filter_bins`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateOptions {
    window: WindowKind,
    bins_per_filter: usize,
    min_filter_bins: usize,
}

impl RateOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`RateError::InvalidBinsPerFilter`] if `bins_per_filter == 0`.
    /// - [`RateError::InvalidMinFilterBins`] if `min_filter_bins` is 0 or
    ///   exceeds `bins_per_filter`.
    pub fn new(window: WindowKind, bins_per_filter: usize, min_filter_bins: usize) -> RateResult<Self> {
        if bins_per_filter == 0 {
            return Err(RateError::InvalidBinsPerFilter { value: bins_per_filter });
        }
        if min_filter_bins == 0 || min_filter_bins > bins_per_filter {
            return Err(RateError::InvalidMinFilterBins { min_bins: min_filter_bins, bins_per_filter });
        }
        Ok(RateOptions { window, bins_per_filter, min_filter_bins })
    }

    /// Default sizing with a different window family.
    pub fn with_window(window: WindowKind) -> Self {
        RateOptions { window, ..RateOptions::default() }
    }

    pub fn window(&self) -> WindowKind {
        self.window
    }

    pub fn bins_per_filter(&self) -> usize {
        self.bins_per_filter
    }

    pub fn min_filter_bins(&self) -> usize {
        self.min_filter_bins
    }
}

impl Default for RateOptions {
    fn default() -> Self {
        RateOptions {
            window: WindowKind::Gaussian,
            bins_per_filter: DEFAULT_BINS_PER_FILTER,
            min_filter_bins: DEFAULT_MIN_FILTER_BINS,
        }
    }
}
