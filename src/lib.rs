//! binsmooth — coordinate binning and window smoothing of impulsive data.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the rate estimators to Python via the `_binsmooth` extension
//! module. Real-valued coordinates are mapped onto linear or logarithmic
//! bins, weighted events are accumulated into dense arrays, and smooth
//! density, rate, or ratio estimates are produced by convolving the bins
//! with a normalized window.
//!
//! Key behaviors
//! -------------
//! - Re-export the core layers as the public crate surface:
//!   [`binning`] (axes, grids, segments), [`accumulate`] (dense and ratio
//!   accumulators), [`smoothing`] (windows and convolution), and [`rate`]
//!   (segment + filter-width estimators).
//! - With the `python-bindings` feature, define the `Rate` and `RatiosRate`
//!   `#[pyclass]` wrappers and the `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue and error mapping.
//! - Errors from the core are rich Rust enums internally and become Python
//!   `ValueError`s at the PyO3 boundary.
//!
//! Conventions
//! -----------
//! - Indices are 0-based. A coordinate equal to an axis maximum falls in the
//!   last bin; anything else outside `[min, max]` is a range error.
//! - Windows are sized in bins and normalized to unit sum.
//!
//! Downstream usage
//! ----------------
//! - Rust callers usually start from [`rate::RateEstimator`] or build a
//!   [`binning::Grid`] and an accumulator directly.
//! - The Python package imports `_binsmooth.rate` and uses `Rate` and
//!   `RatiosRate` as-is.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; the end-to-end accumulate → smooth
//!   pipeline is covered in `tests/integration_rate_pipeline.rs`.

pub mod accumulate;
pub mod binning;
pub mod rate;
pub mod smoothing;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::PyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    rate::estimator::{RateEstimator, RatioRateEstimator},
    smoothing::filter::Boundary,
    utils::{extract_events, extract_rate_options, extract_segment, to_pyarray},
};

/// Rate — Python-facing wrapper for [`RateEstimator`].
///
/// Purpose
/// -------
/// Bin and smooth impulsive events in one dimension, normalized to events
/// (or event weight) per unit time.
///
/// Parameters
/// ----------
/// Constructed from Python via `Rate(segment, filterwidth, window='gaussian')`:
/// - `segment`: `(float, float)`
///   Start and end time; `end > start`.
/// - `filterwidth`: `float`
///   Window width in time units; fixes `binsize = filterwidth / 20`.
/// - `window`: `str`
///   `'gaussian'` or `'tophat'`.
///
/// Notes
/// -----
/// - Native Rust code should use [`RateEstimator`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "binsmooth.rate")]
pub struct Rate {
    inner: RateEstimator,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Rate {
    #[new]
    #[pyo3(
        signature = (segment, filterwidth, window = None),
        text_signature = "(segment, filterwidth, /, window='gaussian')"
    )]
    pub fn new(segment: (f64, f64), filterwidth: f64, window: Option<&str>) -> PyResult<Self> {
        let segment = extract_segment(segment)?;
        let options = extract_rate_options(window)?;
        let inner = RateEstimator::with_options(segment, filterwidth, options)?;
        Ok(Rate { inner })
    }

    /// Add `weight` to the bin containing `t`.
    #[pyo3(signature = (t, weight = 1.0), text_signature = "(self, t, /, weight=1.0)")]
    pub fn accumulate(&mut self, t: f64, weight: f64) -> PyResult<()> {
        Ok(self.inner.accumulate(t, weight)?)
    }

    /// Add many events at once; nothing is added if any time is out of range.
    #[pyo3(signature = (times, weights = None), text_signature = "(self, times, /, weights=None)")]
    pub fn accumulate_many<'py>(
        &mut self, py: Python<'py>, times: &Bound<'py, PyAny>, weights: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let (times, weights) = extract_events(py, times, weights)?;
        let mut staged = self.inner.clone();
        for (&t, &w) in times.iter().zip(&weights) {
            staged.accumulate(t, w)?;
        }
        self.inner = staged;
        Ok(())
    }

    pub fn set_filterwidth(&mut self, filterwidth: f64) -> PyResult<()> {
        Ok(self.inner.set_filterwidth(filterwidth)?)
    }

    #[getter]
    pub fn filterwidth(&self) -> f64 {
        self.inner.filterwidth()
    }

    #[getter]
    pub fn binsize(&self) -> f64 {
        self.inner.binsize()
    }

    pub fn window<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(to_pyarray(py, self.inner.window()?))
    }

    pub fn xvals<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        to_pyarray(py, self.inner.xvals())
    }

    /// Smoothed rate; `cyclic=True` wraps the window around the segment ends.
    #[pyo3(signature = (cyclic = false), text_signature = "(self, /, cyclic=False)")]
    pub fn yvals<'py>(&self, py: Python<'py>, cyclic: bool) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(to_pyarray(py, self.inner.yvals(Boundary::from_cyclic(cyclic))?))
    }
}

/// RatiosRate — Python-facing wrapper for [`RatioRateEstimator`].
///
/// Same constructor as `Rate`. Events are added with `incnumerator` and
/// `incdenominator`; call `regularize()` (or `logregularize()`) before
/// `yvals()` if some bins have no denominator weight.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "binsmooth.rate")]
pub struct RatiosRate {
    inner: RatioRateEstimator,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl RatiosRate {
    #[new]
    #[pyo3(
        signature = (segment, filterwidth, window = None),
        text_signature = "(segment, filterwidth, /, window='gaussian')"
    )]
    pub fn new(segment: (f64, f64), filterwidth: f64, window: Option<&str>) -> PyResult<Self> {
        let segment = extract_segment(segment)?;
        let options = extract_rate_options(window)?;
        let inner = RatioRateEstimator::with_options(segment, filterwidth, options)?;
        Ok(RatiosRate { inner })
    }

    #[pyo3(signature = (t, weight = 1.0), text_signature = "(self, t, /, weight=1.0)")]
    pub fn incnumerator(&mut self, t: f64, weight: f64) -> PyResult<()> {
        Ok(self.inner.increment_numerator(t, weight)?)
    }

    #[pyo3(signature = (t, weight = 1.0), text_signature = "(self, t, /, weight=1.0)")]
    pub fn incdenominator(&mut self, t: f64, weight: f64) -> PyResult<()> {
        Ok(self.inner.increment_denominator(t, weight)?)
    }

    pub fn regularize(&mut self) {
        self.inner.regularize();
    }

    #[pyo3(signature = (epsilon = None), text_signature = "(self, /, epsilon=None)")]
    pub fn logregularize(&mut self, epsilon: Option<f64>) {
        self.inner.log_regularize(epsilon);
    }

    pub fn ratio<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        to_pyarray(py, self.inner.ratio())
    }

    pub fn set_filterwidth(&mut self, filterwidth: f64) -> PyResult<()> {
        Ok(self.inner.set_filterwidth(filterwidth)?)
    }

    #[getter]
    pub fn filterwidth(&self) -> f64 {
        self.inner.filterwidth()
    }

    #[getter]
    pub fn binsize(&self) -> f64 {
        self.inner.binsize()
    }

    pub fn window<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(to_pyarray(py, self.inner.window()?))
    }

    pub fn xvals<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        to_pyarray(py, self.inner.xvals())
    }

    #[pyo3(signature = (cyclic = false), text_signature = "(self, /, cyclic=False)")]
    pub fn yvals<'py>(&self, py: Python<'py>, cyclic: bool) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(to_pyarray(py, self.inner.yvals(Boundary::from_cyclic(cyclic))?))
    }
}

/// _binsmooth — PyO3 module initializer for the Python extension.
///
/// Creates the `rate` submodule, attaches it to `_binsmooth`, and registers
/// it in `sys.modules` as `binsmooth.rate` so dotted imports work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _binsmooth<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let rate_mod = PyModule::new(_py, "rate")?;
    rate_module(_py, m, &rate_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("binsmooth.rate", rate_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn rate_module<'py>(_py: Python, binsmooth: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<Rate>()?;
    m.add_class::<RatiosRate>()?;
    binsmooth.add_submodule(m)?;
    Ok(())
}
