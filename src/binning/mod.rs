//! binning — coordinate-to-index mapping for dense arrays.
//!
//! Purpose
//! -------
//! Discretize real-valued coordinates into array indices. An [`Axis`]
//! describes one dimension (range, bin count, linear or logarithmic
//! spacing); a [`Grid`] composes axes so that coordinate tuples, segments,
//! and slices address cells of an `n`-dimensional array.
//!
//! Key behaviors
//! -------------
//! - Closed upper endpoint: the maximum coordinate of every axis maps to its
//!   last bin instead of falling out of range.
//! - Logarithmic axes reject non-positive coordinates before any logarithm is
//!   taken.
//! - [`Segment`] is the minimal `(start, end)` interval contract consumed from
//!   callers; segment-list algebra is not part of this crate.
//!
//! Downstream usage
//! ----------------
//! - Accumulators in [`crate::accumulate`] hold a `Grid` and use
//!   [`Grid::bin`] for every coordinate-indexed read and write.
//! - Rate estimators in [`crate::rate`] derive a one-dimensional grid from a
//!   segment and a filter width.

pub mod axis;
pub mod errors;
pub mod grid;
pub mod segment;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::axis::{Axis, Spacing};
pub use self::errors::{BinningError, BinningResult};
pub use self::grid::{BinIndex, Coord, Grid};
pub use self::segment::Segment;
