//! smoothing::filter — boundary-aware discrete convolution.
//!
//! Purpose
//! -------
//! Convolve a 1-D or 2-D array with a window in place, treating the array
//! edges either as zero padding ([`Boundary::Bounded`]) or as periodic
//! ([`Boundary::Cyclic`]).
//!
//! Key behaviors
//! -------------
//! - Output has the same shape as the input ("same" convolution); the window
//!   centre sits at index `(len − 1) / 2` along each axis.
//! - The window is flipped (true convolution, not correlation). Symmetric
//!   windows are unaffected by the distinction.
//! - 1-D cyclic filtering triplicates the array, convolves with zero padding,
//!   and keeps the centre third. 2-D cyclic filtering wraps indices directly.
//!
//! Invariants & assumptions
//! ------------------------
//! - Array and window ranks are equal and in {1, 2}.
//! - No window extent exceeds the array's extent along the same axis. This is
//!   also the condition under which the 1-D triplication equals true
//!   periodic convolution.
//! - On error the input array is left untouched.
use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, Ix1, Ix2, s};
use tracing::trace;

use crate::smoothing::errors::{SmoothingError, SmoothingResult};

/// Edge treatment for [`filter_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Boundary {
    /// Values beyond the edges are zero.
    #[default]
    Bounded,
    /// The array repeats periodically (angles, phases).
    Cyclic,
}

impl Boundary {
    /// `Cyclic` when `cyclic` is true, `Bounded` otherwise.
    pub fn from_cyclic(cyclic: bool) -> Self {
        if cyclic { Boundary::Cyclic } else { Boundary::Bounded }
    }
}

/// Filter `array` with `window` in place and return it.
///
/// Parameters
/// ----------
/// - `array`: `&mut ArrayD<f64>`
///   1-D or 2-D data, overwritten with the filtered result.
/// - `window`: `&ArrayD<f64>`
///   Kernel of the same rank, no larger than `array` along any axis.
/// - `boundary`: [`Boundary`]
///
/// Errors
/// ------
/// - [`SmoothingError::DimensionMismatch`] if the ranks differ.
/// - [`SmoothingError::UnsupportedDimension`] if the rank is not 1 or 2.
/// - [`SmoothingError::WindowTooLarge`] if a window extent exceeds the
///   array's.
///
/// Examples
/// --------
/// ```rust
/// # use binsmooth::smoothing::{filter::{filter_array, Boundary}, window::tophat_window};
/// # use ndarray::array;
/// let mut data = array![0.0, 0.0, 0.0, 0.0, 3.0].into_dyn();
/// let window = tophat_window(3.0).unwrap().into_dyn();
/// filter_array(&mut data, &window, Boundary::Cyclic).unwrap();
/// assert_eq!(data[[0]], 1.0);
/// ```
pub fn filter_array<'a>(
    array: &'a mut ArrayD<f64>, window: &ArrayD<f64>, boundary: Boundary,
) -> SmoothingResult<&'a mut ArrayD<f64>> {
    check_shapes(array.shape(), window.shape())?;
    trace!(ndim = array.ndim(), ?boundary, window = ?window.shape(), "filtering array");

    let filtered = if array.ndim() == 1 {
        let data = array.view().into_dimensionality::<Ix1>()?;
        let kernel = window.view().into_dimensionality::<Ix1>()?;
        let out = match boundary {
            Boundary::Bounded => convolve_1d(data, kernel),
            Boundary::Cyclic => convolve_1d_cyclic(data, kernel),
        };
        out.into_dyn()
    } else {
        let data = array.view().into_dimensionality::<Ix2>()?;
        let kernel = window.view().into_dimensionality::<Ix2>()?;
        convolve_2d(data, kernel, boundary).into_dyn()
    };

    array.assign(&filtered);
    Ok(array)
}

fn check_shapes(array: &[usize], window: &[usize]) -> SmoothingResult<()> {
    if array.len() != window.len() {
        return Err(SmoothingError::DimensionMismatch { array: array.len(), window: window.len() });
    }
    if !(1..=2).contains(&array.len()) {
        return Err(SmoothingError::UnsupportedDimension { ndim: array.len() });
    }
    for (axis, (&a, &w)) in array.iter().zip(window).enumerate() {
        if w > a {
            return Err(SmoothingError::WindowTooLarge { axis, window: w, array: a });
        }
    }
    Ok(())
}

/// Source index feeding output `i` through window tap `tap`, if any.
#[inline]
fn source_index(i: usize, tap: usize, centre: usize, len: usize, boundary: Boundary) -> Option<usize> {
    let pos = (i + centre) as isize - tap as isize;
    match boundary {
        Boundary::Bounded => (0..len as isize).contains(&pos).then_some(pos as usize),
        Boundary::Cyclic => Some(pos.rem_euclid(len as isize) as usize),
    }
}

fn centre(len: usize) -> usize {
    len.saturating_sub(1) / 2
}

fn convolve_1d(data: ArrayView1<f64>, kernel: ArrayView1<f64>) -> Array1<f64> {
    let (n, c) = (data.len(), centre(kernel.len()));
    Array1::from_shape_fn(n, |i| {
        kernel
            .iter()
            .enumerate()
            .filter_map(|(tap, &w)| source_index(i, tap, c, n, Boundary::Bounded).map(|src| w * data[src]))
            .sum()
    })
}

fn convolve_1d_cyclic(data: ArrayView1<f64>, kernel: ArrayView1<f64>) -> Array1<f64> {
    let n = data.len();
    let tripled = Array1::from_shape_fn(3 * n, |i| data[i % n]);
    convolve_1d(tripled.view(), kernel).slice(s![n..2 * n]).to_owned()
}

fn convolve_2d(data: ArrayView2<f64>, kernel: ArrayView2<f64>, boundary: Boundary) -> Array2<f64> {
    let (rows, cols) = data.dim();
    let (kr, kc) = kernel.dim();
    let (cr, cc) = (centre(kr), centre(kc));
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let mut acc = 0.0;
        for p in 0..kr {
            let Some(src_i) = source_index(i, p, cr, rows, boundary) else { continue };
            for q in 0..kc {
                if let Some(src_j) = source_index(j, q, cc, cols, boundary) {
                    acc += kernel[[p, q]] * data[[src_i, src_j]];
                }
            }
        }
        acc
    })
}
