//! Error handling for window generation and array filtering.
//!
//! `SmoothingError` groups the two failure families of the smoothing layer:
//! value errors (a window width that is not strictly positive, a window that
//! is larger than the array it filters, an unknown window name) and
//! dimension errors (array and window ranks disagree, or the rank is not 1
//! or 2). `SmoothingResult<T>` is the matching alias.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SmoothingResult<T> = Result<T, SmoothingError>;

/// Error type for window generation and filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum SmoothingError {
    // ---- Value errors ----
    /// Window width (in bins) must be finite and > 0.
    InvalidWindowWidth { width: f64 },

    /// Width (in bins) would need a window longer than `max` samples per axis.
    WindowTooLong { width: f64, max: usize },

    /// Window extent along `axis` exceeds the array's.
    WindowTooLarge { axis: usize, window: usize, array: usize },

    /// Window name is not one of the supported kinds.
    UnknownWindow { name: String },

    // ---- Dimension errors ----
    /// Array and window ranks differ.
    DimensionMismatch { array: usize, window: usize },

    /// Only 1-D and 2-D arrays can be filtered.
    UnsupportedDimension { ndim: usize },

    // ---- ndarray passthrough ----
    Shape(String),
}

impl SmoothingError {
    /// `true` for the rank-related variants.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            SmoothingError::DimensionMismatch { .. } | SmoothingError::UnsupportedDimension { .. }
        )
    }
}

impl From<ndarray::ShapeError> for SmoothingError {
    fn from(err: ndarray::ShapeError) -> Self {
        SmoothingError::Shape(err.to_string())
    }
}

impl std::error::Error for SmoothingError {}

impl std::fmt::Display for SmoothingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Value errors ----
            SmoothingError::InvalidWindowWidth { width } => {
                write!(f, "Invalid window width {width}: must be finite and > 0 bins.")
            }
            SmoothingError::WindowTooLong { width, max } => {
                write!(f, "Window width {width} bins needs more than {max} samples per axis.")
            }
            SmoothingError::WindowTooLarge { axis, window, array } => write!(
                f,
                "Window extent {window} exceeds array extent {array} along axis {axis}."
            ),
            SmoothingError::UnknownWindow { name } => {
                write!(f, "Unknown window {name:?} (expected 'gaussian' or 'tophat').")
            }

            // ---- Dimension errors ----
            SmoothingError::DimensionMismatch { array, window } => {
                write!(f, "Array is {array}-D but window is {window}-D.")
            }
            SmoothingError::UnsupportedDimension { ndim } => {
                write!(f, "Can only filter 1-D and 2-D arrays; got {ndim}-D.")
            }

            // ---- ndarray passthrough ----
            SmoothingError::Shape(msg) => write!(f, "Array shape error: {msg}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SmoothingError> for PyErr {
    fn from(err: SmoothingError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that messages embed their payloads and that only the rank
    // variants count as dimension errors.
    //
    // Given
    // -----
    // - One value error and one dimension error.
    //
    // Expect
    // ------
    // - The width and the rank appear in the messages.
    // - `is_dimension_error` is false for the value error, true for the rank error.
    fn smoothing_error_messages_and_classification() {
        // Arrange
        let width = SmoothingError::InvalidWindowWidth { width: -2.5 };
        let rank = SmoothingError::UnsupportedDimension { ndim: 3 };

        // Act
        let width_msg = width.to_string();
        let rank_msg = rank.to_string();

        // Assert
        assert!(width_msg.contains("-2.5"), "Got: {width_msg}");
        assert!(rank_msg.contains("3-D"), "Got: {rank_msg}");
        assert!(!width.is_dimension_error());
        assert!(rank.is_dimension_error());
        assert!(SmoothingError::DimensionMismatch { array: 1, window: 2 }.is_dimension_error());
        assert!(!SmoothingError::WindowTooLong { width: 1e30, max: 8 }.is_dimension_error());
    }
}
