//! Conversion helpers for the Python bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns loosely typed Python arguments (tuples, strings, array-likes) into
//! the validated Rust types used by the `rate` estimators.
#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec / Array1 → PyArray
    PyArray1,
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::{
    binning::segment::Segment, rate::options::RateOptions, smoothing::window::WindowKind,
};

/// Borrow a 1-D contiguous `float64` view of `raw_data`, copying only when
/// the input is not already such an array (pandas Series, lists, tuples).
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Event times and per-event weights as owned vectors of equal length.
///
/// `weights = None` means unit weight for every event.
#[cfg(feature = "python-bindings")]
pub fn extract_events<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, weights: Option<&Bound<'py, PyAny>>,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let times_arr = extract_f64_array(py, times)?;
    let times = times_arr
        .as_slice()
        .map_err(|_| PyValueError::new_err("times must be a 1-D contiguous float64 array"))?
        .to_vec();

    let weights = match weights {
        None => vec![1.0; times.len()],
        Some(raw) => {
            let arr = extract_f64_array(py, raw)?;
            let w = arr
                .as_slice()
                .map_err(|_| PyValueError::new_err("weights must be a 1-D contiguous float64 array"))?;
            if w.len() != times.len() {
                return Err(PyValueError::new_err(format!(
                    "weights has length {} but times has length {}",
                    w.len(),
                    times.len()
                )));
            }
            w.to_vec()
        }
    };
    Ok((times, weights))
}

/// `(start, end)` tuple → validated [`Segment`].
#[cfg(feature = "python-bindings")]
pub fn extract_segment(segment: (f64, f64)) -> PyResult<Segment> {
    Ok(Segment::try_from(segment)?)
}

/// Window name → [`RateOptions`] with the default bin sizing.
///
/// `None` selects the Gaussian window.
#[cfg(feature = "python-bindings")]
pub fn extract_rate_options(window: Option<&str>) -> PyResult<RateOptions> {
    let kind = match window {
        None => WindowKind::default(),
        Some(name) => WindowKind::from_str(&name.to_ascii_lowercase())?,
    };
    Ok(RateOptions::with_window(kind))
}

/// Hand an owned 1-D array to Python without copying.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn to_pyarray<'py>(py: Python<'py>, values: Array1<f64>) -> Bound<'py, PyArray1<f64>> {
    values.into_pyarray(py)
}
