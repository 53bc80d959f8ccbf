//! binning::errors — error type shared by axes, grids, and accumulators.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`BinningError`], and result alias,
//! [`BinningResult`], for everything that maps real-valued coordinates onto
//! array indices: axis/grid construction, coordinate lookup, and the
//! grid-compatibility check guarding accumulator merges.
//!
//! Key behaviors
//! -------------
//! - Group variants by the three failure families callers care about:
//!   construction (bad bounds, bad bin counts, unsupported spacing or step),
//!   coordinate range (value outside `[min, max]`, non-positive value on a
//!   logarithmic axis), and grid compatibility.
//! - Tag lookup failures with the dimension that produced them via
//!   [`BinningError::InDimension`], while [`BinningError::is_range_error`]
//!   and [`BinningError::dimension`] let callers see through the tag.
//! - Attach human-readable `Display` messages that embed the offending
//!   values.
//!
//! Conventions
//! -----------
//! - Dimensions are 0-based.
//! - Errors are small and `Clone`; they carry values, never arrays.
//! - With the `python-bindings` feature every variant surfaces in Python as a
//!   `ValueError` whose message is the `Display` text.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for binning and accumulation operations.
pub type BinningResult<T> = Result<T, BinningError>;

/// BinningError — construction, lookup, and compatibility failures.
///
/// Variants
/// --------
/// Construction:
/// - `InvalidBounds { min, max }`: bounds are non-finite or `max <= min`.
/// - `InvalidBinCount { n }`: an axis needs at least one bin.
/// - `NonPositiveLogMin { min }`: logarithmic axes need `min > 0`.
/// - `UnknownSpacing { spacing }`: spacing name is neither linear nor log.
/// - `SpacingCountMismatch { axes, spacings }`: one spacing per axis.
/// - `EmptyGrid`: a grid needs at least one axis.
/// - `UnsupportedStep { step }`: stepped slices are not supported.
/// - `InvalidSegment { start, end }`: segments need finite `end > start`.
///
/// Coordinate range:
/// - `OutOfRange { value, min, max }`: value outside the closed axis range.
/// - `NonPositiveLogCoordinate { value }`: `value <= 0` on a log axis.
/// - `CoordinateCount { expected, got }`: coordinate tuple length differs
///   from the grid's dimensionality.
/// - `InDimension { dim, source }`: an axis failure tagged with its dimension.
///
/// Compatibility:
/// - `IncompatibleGrid`: accumulators were built on different grids.
#[derive(Debug, Clone, PartialEq)]
pub enum BinningError {
    // ---- Construction ----
    InvalidBounds { min: f64, max: f64 },
    InvalidBinCount { n: usize },
    NonPositiveLogMin { min: f64 },
    UnknownSpacing { spacing: String },
    SpacingCountMismatch { axes: usize, spacings: usize },
    EmptyGrid,
    UnsupportedStep { step: f64 },
    InvalidSegment { start: f64, end: f64 },

    // ---- Coordinate range ----
    OutOfRange { value: f64, min: f64, max: f64 },
    NonPositiveLogCoordinate { value: f64 },
    CoordinateCount { expected: usize, got: usize },
    InDimension { dim: usize, source: Box<BinningError> },

    // ---- Compatibility ----
    IncompatibleGrid,
}

impl BinningError {
    /// The error with any dimension tags removed.
    pub fn root(&self) -> &BinningError {
        match self {
            BinningError::InDimension { source, .. } => source.root(),
            other => other,
        }
    }

    /// Dimension of the axis that failed, if the error was produced by a grid lookup.
    pub fn dimension(&self) -> Option<usize> {
        match self {
            BinningError::InDimension { dim, .. } => Some(*dim),
            _ => None,
        }
    }

    /// `true` for coordinate-range failures, tagged or not.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self.root(),
            BinningError::OutOfRange { .. } | BinningError::NonPositiveLogCoordinate { .. }
        )
    }

    pub(crate) fn in_dimension(self, dim: usize) -> BinningError {
        BinningError::InDimension { dim, source: Box::new(self) }
    }
}

impl std::error::Error for BinningError {}

impl std::fmt::Display for BinningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction ----
            BinningError::InvalidBounds { min, max } => {
                write!(f, "Invalid axis bounds ({min}, {max}): need finite values with max > min.")
            }
            BinningError::InvalidBinCount { n } => {
                write!(f, "Invalid bin count {n}: an axis needs at least one bin.")
            }
            BinningError::NonPositiveLogMin { min } => {
                write!(f, "Logarithmic axis needs min > 0; got {min}.")
            }
            BinningError::UnknownSpacing { spacing } => {
                write!(f, "Unsupported spacing {spacing:?} (expected 'lin' or 'log').")
            }
            BinningError::SpacingCountMismatch { axes, spacings } => {
                write!(f, "Got {spacings} spacing(s) for {axes} axis/axes.")
            }
            BinningError::EmptyGrid => write!(f, "A grid needs at least one axis."),
            BinningError::UnsupportedStep { step } => {
                write!(f, "Slices with steps are not supported (step = {step}).")
            }
            BinningError::InvalidSegment { start, end } => {
                write!(f, "Invalid segment [{start}, {end}): need finite values with end > start.")
            }

            // ---- Coordinate range ----
            BinningError::OutOfRange { value, min, max } => {
                write!(f, "Coordinate {value} is outside the axis range [{min}, {max}].")
            }
            BinningError::NonPositiveLogCoordinate { value } => {
                write!(f, "Coordinate {value} is not positive on a logarithmic axis.")
            }
            BinningError::CoordinateCount { expected, got } => {
                write!(f, "Expected {expected} coordinate(s), got {got}.")
            }
            BinningError::InDimension { dim, source } => write!(f, "Dimension {dim}: {source}"),

            // ---- Compatibility ----
            BinningError::IncompatibleGrid => {
                write!(f, "Incompatible grids: accumulators must share an identical grid.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<BinningError> for PyErr {
    fn from(err: BinningError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
