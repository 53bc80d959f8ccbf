//! rate — smoothed rates and ratios of impulsive events over a time segment.
//!
//! Purpose
//! -------
//! Compose the binning, accumulation, and smoothing layers into the two
//! convenience estimators most callers want: a rate (events per unit time)
//! and a ratio of two event streams, each smoothed by a window whose width
//! is given in time units.
//!
//! Key behaviors
//! -------------
//! - [`RateEstimator`] and [`RatioRateEstimator`] size their own grid from
//!   the segment and filter width (see [`RateOptions`]).
//! - [`RateError`] wraps lower-layer errors so `?` works across layers.

pub mod errors;
pub mod estimator;
pub mod options;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{RateError, RateResult};
pub use self::estimator::{RateEstimator, RatioRateEstimator};
pub use self::options::RateOptions;
