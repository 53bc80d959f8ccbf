//! smoothing::window — integral-preserving window functions.
//!
//! Purpose
//! -------
//! Generate the 1-D and 2-D kernels that binned data is convolved with.
//! Every window is normalized so that convolving it with a histogram
//! preserves the histogram's total weight.
//!
//! Key behaviors
//! -------------
//! - [`gaussian_window`] samples a Gaussian of standard deviation `width / 2`
//!   at integer offsets out to ten standard deviations and normalizes it
//!   analytically by `sqrt(2π)·σ`; the sample sum is therefore close to, but
//!   not exactly, 1.
//! - [`tophat_window`] is a uniform window of odd length, normalized
//!   exactly.
//! - The 2-D variants are the outer product of two Gaussians and an
//!   elliptical top-hat, respectively.
//! - [`WindowKind`] is the selector stored by rate estimators.
//!
//! Conventions
//! -----------
//! - Widths are in bin units and must be finite and strictly positive.
//! - No window is longer than [`MAX_WINDOW_LEN`] samples along any axis;
//!   wider requests fail with [`SmoothingError::WindowTooLong`].
//! - Every window has odd extents, so its centre falls on a sample.
use std::f64::consts::PI;
use std::str::FromStr;

use ndarray::{Array1, Array2};

use crate::smoothing::errors::{SmoothingError, SmoothingResult};

/// Gaussian tails are truncated at this many standard deviations.
const GAUSSIAN_REACH: f64 = 10.0;

/// Longest window, in samples, along one axis.
pub const MAX_WINDOW_LEN: usize = 1 << 28;

/// Selector for the window family used by a rate estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowKind {
    #[default]
    Gaussian,
    TopHat,
}

impl WindowKind {
    /// 1-D window of this family with the given width in bins.
    pub fn window_1d(self, width: f64) -> SmoothingResult<Array1<f64>> {
        match self {
            WindowKind::Gaussian => gaussian_window(width),
            WindowKind::TopHat => tophat_window(width),
        }
    }

    /// 2-D window of this family with the given widths in bins.
    pub fn window_2d(self, width_x: f64, width_y: f64) -> SmoothingResult<Array2<f64>> {
        match self {
            WindowKind::Gaussian => gaussian_window_2d(width_x, width_y),
            WindowKind::TopHat => tophat_window_2d(width_x, width_y),
        }
    }
}

impl FromStr for WindowKind {
    type Err = SmoothingError;

    fn from_str(s: &str) -> SmoothingResult<Self> {
        match s {
            "gaussian" => Ok(WindowKind::Gaussian),
            "tophat" | "top-hat" => Ok(WindowKind::TopHat),
            other => Err(SmoothingError::UnknownWindow { name: other.to_string() }),
        }
    }
}

fn check_width(width: f64) -> SmoothingResult<()> {
    if !(width.is_finite() && width > 0.0) {
        return Err(SmoothingError::InvalidWindowWidth { width });
    }
    Ok(())
}

/// Odd window length `2·floor(half) + 1`, checked against [`MAX_WINDOW_LEN`].
fn odd_len(half: f64, width: f64) -> SmoothingResult<usize> {
    let half = half.floor();
    if half > ((MAX_WINDOW_LEN - 1) / 2) as f64 {
        return Err(SmoothingError::WindowTooLong { width, max: MAX_WINDOW_LEN });
    }
    Ok(2 * half as usize + 1)
}

/// Normalized 1-D Gaussian window.
///
/// Parameters
/// ----------
/// - `width`: `f64`
///   Full width in bins; the standard deviation is `h = width / 2`.
///
/// Returns
/// -------
/// `Array1<f64>` of length `2·floor(10h) + 1` holding
/// `exp(−k²/(2h²)) / (sqrt(2π)·h)` for `k = −floor(10h)..=floor(10h)`.
///
/// Errors
/// ------
/// - [`SmoothingError::InvalidWindowWidth`] if `width` is not finite and > 0.
/// - [`SmoothingError::WindowTooLong`] if the length exceeds [`MAX_WINDOW_LEN`].
///
/// Examples
/// --------
/// ```rust
/// # use binsmooth::smoothing::window::gaussian_window;
/// let w = gaussian_window(4.0).unwrap();
/// assert_eq!(w.len(), 41);
/// assert!((w.sum() - 1.0).abs() < 1e-9);
/// ```
pub fn gaussian_window(width: f64) -> SmoothingResult<Array1<f64>> {
    check_width(width)?;
    let h = width / 2.0;
    let len = odd_len(GAUSSIAN_REACH * h, width)?;
    let reach = (len / 2) as f64;
    let norm = (2.0 * PI).sqrt() * h;
    Ok(Array1::from_shape_fn(len, |i| {
        let k = i as f64 - reach;
        (-k * k / (2.0 * h * h)).exp() / norm
    }))
}

/// Normalized 2-D Gaussian window: outer product of two 1-D Gaussians.
pub fn gaussian_window_2d(width_x: f64, width_y: f64) -> SmoothingResult<Array2<f64>> {
    let gx = gaussian_window(width_x)?;
    let gy = gaussian_window(width_y)?;
    Ok(Array2::from_shape_fn((gx.len(), gy.len()), |(i, j)| gx[i] * gy[j]))
}

/// Normalized 1-D top-hat window.
///
/// The length is forced odd, `2·floor(width/2) + 1`, and every element equals
/// `1 / length`, so the window sums to exactly 1.
///
/// # Errors
/// - [`SmoothingError::InvalidWindowWidth`] if `width` is not finite and > 0.
/// - [`SmoothingError::WindowTooLong`] if the length exceeds [`MAX_WINDOW_LEN`].
pub fn tophat_window(width: f64) -> SmoothingResult<Array1<f64>> {
    check_width(width)?;
    let len = odd_len(width / 2.0, width)?;
    Ok(Array1::from_elem(len, 1.0 / len as f64))
}

/// Normalized 2-D elliptical top-hat window.
///
/// The window starts as a rectangle of odd extents
/// `(2·floor(wx/2) + 1, 2·floor(wy/2) + 1)`. Cells whose offset from the
/// centre cell satisfies `((i − ci)·2/wx)² + ((j − cj)·2/wy)² > 1` lie outside
/// the inscribed ellipse and are zeroed; the remaining cells share a uniform
/// value chosen so the window sums to 1.
///
/// # Errors
/// - [`SmoothingError::InvalidWindowWidth`] if either width is not finite and > 0.
/// - [`SmoothingError::WindowTooLong`] if either extent exceeds [`MAX_WINDOW_LEN`].
pub fn tophat_window_2d(width_x: f64, width_y: f64) -> SmoothingResult<Array2<f64>> {
    check_width(width_x)?;
    check_width(width_y)?;
    let (rows, cols) = (odd_len(width_x / 2.0, width_x)?, odd_len(width_y / 2.0, width_y)?);
    let (ci, cj) = (rows / 2, cols / 2);
    let mut window = Array2::from_shape_fn((rows, cols), |(i, j)| {
        let u = (i as f64 - ci as f64) / width_x * 2.0;
        let v = (j as f64 - cj as f64) / width_y * 2.0;
        if u * u + v * v > 1.0 { 0.0 } else { 1.0 }
    });
    // The centre cell always survives, so the sum is at least 1.
    let total = window.sum();
    window /= total;
    Ok(window)
}
