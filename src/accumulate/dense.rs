//! accumulate::dense — a dense array addressed by real-valued coordinates.
//!
//! Purpose
//! -------
//! Pair a [`Grid`] with a zero-initialized `f64` array of the grid's shape so
//! that weighted point events can be histogrammed, read back, combined, and
//! smoothed using coordinates instead of raw indices.
//!
//! Key behaviors
//! -------------
//! - [`DenseAccumulator::accumulate`] adds a weight to the cell containing a
//!   coordinate tuple; [`DenseAccumulator::set`] replaces the cell value.
//! - [`DenseAccumulator::merge`] adds another accumulator elementwise, but
//!   only when both were built on structurally equal grids.
//! - [`DenseAccumulator::regularize_for_log`] replaces non-positive cells with
//!   a tiny positive value so `ln` of the array is finite everywhere.
//! - [`DenseAccumulator::smooth`] convolves the stored array in place.
//!
//! Invariants & assumptions
//! ------------------------
//! - `array().shape() == grid().shape()` for the accumulator's lifetime.
//! - Coordinate lookups complete before any cell is touched, so a failed call
//!   leaves the array unchanged.
//! - Single writer: mutation requires `&mut self`. Work split across several
//!   accumulators is combined with `merge`.
use ndarray::{ArrayD, ArrayViewD, IxDyn, Slice};

use crate::{
    binning::{
        errors::{BinningError, BinningResult},
        grid::{Coord, Grid},
    },
    smoothing::{
        errors::SmoothingResult,
        filter::{Boundary, filter_array},
    },
};

/// Smallest positive `f64` (2⁻¹⁰⁷⁴, a subnormal); the default log-regularization floor.
pub const SMALLEST_POSITIVE: f64 = 5e-324;

/// DenseAccumulator — binned `f64` array on a [`Grid`].
///
/// Fields
/// ------
/// - `grid`: [`Grid`]
///   Coordinate-to-index mapping; fixed at construction.
/// - `array`: `ArrayD<f64>`
///   Cell values, shape `grid.shape()`, initially zero.
///
/// Examples
/// --------
/// ```rust
/// # use binsmooth::{accumulate::DenseAccumulator, binning::Grid};
/// let mut acc = DenseAccumulator::new(Grid::linear(0.0, 10.0, 5).unwrap());
/// acc.increment(&[0.0]).unwrap();
/// acc.increment(&[0.5]).unwrap();
/// assert_eq!(acc.array().as_slice().unwrap(), &[2.0, 0.0, 0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseAccumulator {
    grid: Grid,
    array: ArrayD<f64>,
}

impl DenseAccumulator {
    /// Zero-filled accumulator on `grid`.
    pub fn new(grid: Grid) -> Self {
        let array = ArrayD::zeros(IxDyn(&grid.shape()));
        DenseAccumulator { grid, array }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn array(&self) -> &ArrayD<f64> {
        &self.array
    }

    // Shape-preserving in-place edits only.
    pub(crate) fn array_mut(&mut self) -> &mut ArrayD<f64> {
        &mut self.array
    }

    pub fn shape(&self) -> &[usize] {
        self.array.shape()
    }

    /// Consume the accumulator and return its array.
    pub fn into_array(self) -> ArrayD<f64> {
        self.array
    }

    /// Bin centres, one array per dimension.
    pub fn centres(&self) -> Vec<ndarray::Array1<f64>> {
        self.grid.centres()
    }

    /// Add `weight` to the cell containing `coords`.
    ///
    /// # Errors
    /// - Any lookup error of [`Grid::bin`]; the array is unchanged.
    pub fn accumulate(&mut self, coords: &[f64], weight: f64) -> BinningResult<()> {
        let idx = self.grid.bin(coords)?;
        self.array[IxDyn(&idx)] += weight;
        Ok(())
    }

    /// Add a unit weight to the cell containing `coords`.
    pub fn increment(&mut self, coords: &[f64]) -> BinningResult<()> {
        self.accumulate(coords, 1.0)
    }

    /// Value of the cell containing `coords`.
    pub fn get(&self, coords: &[f64]) -> BinningResult<f64> {
        let idx = self.grid.bin(coords)?;
        Ok(self.array[IxDyn(&idx)])
    }

    /// Replace the value of the cell containing `coords`.
    pub fn set(&mut self, coords: &[f64], value: f64) -> BinningResult<()> {
        let idx = self.grid.bin(coords)?;
        self.array[IxDyn(&idx)] = value;
        Ok(())
    }

    /// Value at raw array indices, `None` if out of bounds or of the wrong rank.
    pub fn at(&self, index: &[usize]) -> Option<f64> {
        self.array.get(IxDyn(index)).copied()
    }

    /// Read-only view selected by points, segments, or slices.
    ///
    /// Every dimension is kept: a point coordinate selects a length-1 extent.
    ///
    /// # Errors
    /// - Any lookup error of [`Grid::index`].
    pub fn view(&self, coords: &[Coord]) -> BinningResult<ArrayViewD<'_, f64>> {
        let ranges: Vec<_> = self.grid.index(coords)?.iter().map(|b| b.as_range()).collect();
        Ok(self.array.slice_each_axis(|ax| {
            let r = &ranges[ax.axis.index()];
            Slice::from(r.start..r.end.max(r.start))
        }))
    }

    /// Add `other` elementwise.
    ///
    /// # Errors
    /// - [`BinningError::IncompatibleGrid`] unless both grids are equal; the
    ///   array is unchanged.
    pub fn merge(&mut self, other: &DenseAccumulator) -> BinningResult<()> {
        if !self.grid.equals(&other.grid) {
            return Err(BinningError::IncompatibleGrid);
        }
        self.array += &other.array;
        Ok(())
    }

    /// Replace every cell `<= 0` with `epsilon` (default [`SMALLEST_POSITIVE`]).
    pub fn regularize_for_log(&mut self, epsilon: Option<f64>) -> &mut Self {
        let eps = epsilon.unwrap_or(SMALLEST_POSITIVE);
        self.array.mapv_inplace(|v| if v > 0.0 { v } else { eps });
        self
    }

    /// Number of cells with a non-zero value.
    pub fn count_nonzero(&self) -> usize {
        self.array.iter().filter(|&&v| v != 0.0).count()
    }

    /// Convolve the stored array with `window` in place and return it.
    ///
    /// # Errors
    /// - Any error of [`filter_array`]; the array is unchanged.
    pub fn smooth(&mut self, window: &ArrayD<f64>, boundary: Boundary) -> SmoothingResult<&ArrayD<f64>> {
        filter_array(&mut self.array, window, boundary)?;
        Ok(&self.array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::{axis::Spacing, segment::Segment};
    use crate::smoothing::window::tophat_window;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Coordinate-indexed accumulate/get/set and raw-index reads.
    // - Failed lookups leaving the array unchanged.
    // - Merge on equal and unequal grids.
    // - Log regularization and non-zero counting.
    // - Sliced views and in-place smoothing.
    // -------------------------------------------------------------------------

    fn line(n: usize) -> DenseAccumulator {
        DenseAccumulator::new(Grid::linear(0.0, n as f64, n).unwrap())
    }

    #[test]
    // Purpose
    // -------
    // Weights add up in the cell containing each coordinate.
    //
    // Given
    // -----
    // - A 5-bin grid on [0, 10]; events at 0, 0.5 (bin 0) and 10 (bin 4).
    //
    // Expect
    // ------
    // - [2, 0, 0, 0, 2.5]; `get` and `at` agree with the array.
    fn accumulate_adds_weights_per_cell() {
        // Arrange
        let mut acc = DenseAccumulator::new(Grid::linear(0.0, 10.0, 5).unwrap());

        // Act
        acc.increment(&[0.0]).unwrap();
        acc.increment(&[0.5]).unwrap();
        acc.accumulate(&[10.0], 2.5).unwrap();

        // Assert
        assert_eq!(acc.array(), &array![2.0, 0.0, 0.0, 0.0, 2.5].into_dyn());
        assert_eq!(acc.get(&[1.9]).unwrap(), 2.0);
        assert_eq!(acc.at(&[4]), Some(2.5));
        assert_eq!(acc.at(&[5]), None);
        assert_eq!(acc.count_nonzero(), 2);
    }

    #[test]
    // Purpose
    // -------
    // `set` replaces rather than accumulates; out-of-range calls change nothing.
    fn set_replaces_and_failures_leave_state_unchanged() {
        let mut acc = line(3);
        acc.accumulate(&[1.5], 4.0).unwrap();

        acc.set(&[1.5], 1.0).unwrap();
        let before = acc.clone();
        let err = acc.accumulate(&[3.5], 1.0).unwrap_err();

        assert_eq!(acc.get(&[1.0]).unwrap(), 1.0);
        assert!(err.is_range_error());
        assert_eq!(acc, before);
    }

    #[test]
    // Purpose
    // -------
    // Verify elementwise merge and its grid guard.
    //
    // Given
    // -----
    // - Two accumulators on one 3-bin grid holding [1, 0, 0] and [0, 2, 0].
    // - A third on a different grid.
    //
    // Expect
    // ------
    // - Merge gives [1, 2, 0]; merging the third fails with IncompatibleGrid
    //   and leaves the target unchanged.
    fn merge_adds_on_equal_grids_only() {
        // Arrange
        let mut a = line(3);
        let mut b = line(3);
        a.increment(&[0.5]).unwrap();
        b.accumulate(&[1.5], 2.0).unwrap();
        let other = DenseAccumulator::new(Grid::linear(0.0, 3.0, 4).unwrap());

        // Act
        a.merge(&b).unwrap();
        let err = a.merge(&other).unwrap_err();

        // Assert
        assert_eq!(a.array(), &array![1.0, 2.0, 0.0].into_dyn());
        assert_eq!(err, BinningError::IncompatibleGrid);
        assert_eq!(a.array(), &array![1.0, 2.0, 0.0].into_dyn());
    }

    #[test]
    // Purpose
    // -------
    // Non-positive cells become epsilon so the logarithm is finite.
    fn regularize_for_log_replaces_non_positive_cells() {
        let mut acc = line(4);
        acc.set(&[0.5], 3.0).unwrap();
        acc.set(&[1.5], -2.0).unwrap();

        acc.regularize_for_log(None);
        let logs = acc.array().mapv(f64::ln);

        assert_eq!(acc.at(&[0]), Some(3.0));
        assert_eq!(acc.at(&[1]), Some(SMALLEST_POSITIVE));
        assert_eq!(acc.at(&[3]), Some(SMALLEST_POSITIVE));
        assert!(logs.iter().all(|v| v.is_finite()));
        assert_eq!(acc.regularize_for_log(Some(1e-3)).at(&[1]), Some(SMALLEST_POSITIVE));
        assert_eq!(SMALLEST_POSITIVE, f64::from_bits(1));
    }

    #[test]
    // Purpose
    // -------
    // Views select segments and slices on a 2-D grid and keep every dimension.
    fn view_selects_segments_and_points() {
        // Arrange
        let grid = Grid::from_triples(&[(0.0, 4.0, 4), (1.0, 16.0, 4)], &[Spacing::Linear, Spacing::Logarithmic]).unwrap();
        let mut acc = DenseAccumulator::new(grid);
        acc.accumulate(&[1.5, 2.5], 7.0).unwrap();

        // Act
        let seg = Segment::new(1.0, 2.0).unwrap();
        let view = acc.view(&[Coord::from(seg), Coord::from(2.5)]).unwrap();

        // Assert
        assert_eq!(view.shape(), &[2, 1]);
        assert_eq!(view[[0, 0]], 7.0);
        assert!(acc.view(&[Coord::from(5.0), Coord::from(2.0)]).unwrap_err().is_range_error());
    }

    #[test]
    // Purpose
    // -------
    // `smooth` filters the stored array in place.
    fn smooth_filters_in_place() {
        let mut acc = line(5);
        acc.accumulate(&[2.5], 3.0).unwrap();

        let smoothed = acc.smooth(&tophat_window(3.0).unwrap().into_dyn(), Boundary::Bounded).unwrap().clone();

        assert_eq!(&smoothed, acc.array());
        assert_abs_diff_eq!(smoothed[[1]], 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(smoothed[[2]], 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(smoothed[[3]], 1.0, epsilon = 1e-15);
        assert_eq!(smoothed[[0]], 0.0);
    }
}
