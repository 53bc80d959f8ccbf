//! accumulate — coordinate-addressed histograms over a [`Grid`](crate::binning::Grid).
//!
//! Purpose
//! -------
//! Hold the binned state of an estimate: a single weighted histogram
//! ([`DenseAccumulator`]) or a numerator/denominator pair
//! ([`RatioAccumulator`]) for ratio fields.
//!
//! Conventions
//! -----------
//! - Lookups go through the grid first; a failed lookup never touches the
//!   stored arrays.
//! - Accumulators built on different grids cannot be merged.
//!
//! Downstream usage
//! ----------------
//! - `rate` builds one accumulator per estimator and smooths copies of its
//!   array for read-out.

pub mod dense;
pub mod ratio;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::dense::{DenseAccumulator, SMALLEST_POSITIVE};
pub use self::ratio::RatioAccumulator;
