//! accumulate::ratio — paired numerator/denominator accumulators.
//!
//! Purpose
//! -------
//! Estimate a ratio field (e.g. the fraction of events flagged by some
//! condition) by binning numerator and denominator events on one shared
//! [`Grid`] and dividing only at read time. Keeping raw counts makes the
//! combination of several runs correct: merged counts give the ratio of
//! sums, not the average of ratios.
//!
//! Key behaviors
//! -------------
//! - Numerator and denominator are only ever incremented; there is no direct
//!   setter on either half.
//! - [`RatioAccumulator::ratio`] divides elementwise with plain IEEE
//!   semantics: `0/0` is NaN and `x/0` is ±inf.
//! - [`RatioAccumulator::regularize`] and [`RatioAccumulator::log_regularize`]
//!   rewrite empty cells (denominator exactly zero) so the ratio, or its
//!   logarithm, is finite there.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both halves always share the same grid and shape.
//! - Regularization only touches cells whose denominator is exactly `0.0`.
use ndarray::{Array1, ArrayD, Zip};

use crate::{
    accumulate::dense::{DenseAccumulator, SMALLEST_POSITIVE},
    binning::{
        errors::{BinningError, BinningResult},
        grid::Grid,
    },
    smoothing::{
        errors::SmoothingResult,
        filter::{Boundary, filter_array},
    },
};

/// RatioAccumulator — numerator and denominator binned on one grid.
///
/// Examples
/// --------
/// ```rust
/// # use binsmooth::{accumulate::RatioAccumulator, binning::Grid};
/// let mut acc = RatioAccumulator::new(Grid::linear(0.0, 2.0, 2).unwrap());
/// acc.increment_denominator(&[0.5], 4.0).unwrap();
/// acc.increment_numerator(&[0.5], 1.0).unwrap();
/// acc.regularize();
/// assert_eq!(acc.ratio().as_slice().unwrap(), &[0.25, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RatioAccumulator {
    numerator: DenseAccumulator,
    denominator: DenseAccumulator,
}

impl RatioAccumulator {
    pub fn new(grid: Grid) -> Self {
        RatioAccumulator {
            numerator: DenseAccumulator::new(grid.clone()),
            denominator: DenseAccumulator::new(grid),
        }
    }

    pub fn grid(&self) -> &Grid {
        self.denominator.grid()
    }

    pub fn numerator(&self) -> &DenseAccumulator {
        &self.numerator
    }

    pub fn denominator(&self) -> &DenseAccumulator {
        &self.denominator
    }

    /// Bin centres, one array per dimension.
    pub fn centres(&self) -> Vec<Array1<f64>> {
        self.grid().centres()
    }

    /// Add `weight` to the numerator cell containing `coords`.
    pub fn increment_numerator(&mut self, coords: &[f64], weight: f64) -> BinningResult<()> {
        self.numerator.accumulate(coords, weight)
    }

    /// Add `weight` to the denominator cell containing `coords`.
    pub fn increment_denominator(&mut self, coords: &[f64], weight: f64) -> BinningResult<()> {
        self.denominator.accumulate(coords, weight)
    }

    /// Add both halves of `other` into `self`.
    ///
    /// # Errors
    /// - [`BinningError::IncompatibleGrid`] unless the grids are equal; neither
    ///   half is modified.
    pub fn merge(&mut self, other: &RatioAccumulator) -> BinningResult<()> {
        if !self.grid().equals(other.grid()) {
            return Err(BinningError::IncompatibleGrid);
        }
        self.numerator.merge(&other.numerator)?;
        self.denominator.merge(&other.denominator)
    }

    /// Elementwise `numerator / denominator`.
    pub fn ratio(&self) -> ArrayD<f64> {
        self.numerator.array() / self.denominator.array()
    }

    /// Set the denominator to 1 wherever it is 0, so empty cells read as
    /// `numerator / 1` instead of NaN or inf.
    pub fn regularize(&mut self) -> &mut Self {
        self.denominator
            .array_mut()
            .mapv_inplace(|d| if d == 0.0 { 1.0 } else { d });
        self
    }

    /// Where the denominator is 0, set numerator to `epsilon` (default
    /// [`SMALLEST_POSITIVE`]) and denominator to 1, so `ln(ratio)` is finite
    /// in empty cells.
    pub fn log_regularize(&mut self, epsilon: Option<f64>) -> &mut Self {
        let eps = epsilon.unwrap_or(SMALLEST_POSITIVE);
        Zip::from(self.numerator.array_mut())
            .and(self.denominator.array_mut())
            .for_each(|n, d| {
                if *d == 0.0 {
                    *n = eps;
                    *d = 1.0;
                }
            });
        self
    }

    /// Number of cells that received any denominator weight.
    pub fn count_nonzero_denominator(&self) -> usize {
        self.denominator.count_nonzero()
    }

    /// Ratio of the separately smoothed numerator and denominator.
    ///
    /// Both halves are convolved with the same window, so the result is a
    /// locally weighted ratio of sums. The stored counts are not modified.
    ///
    /// # Errors
    /// - Any error of [`filter_array`].
    pub fn smoothed_ratio(&self, window: &ArrayD<f64>, boundary: Boundary) -> SmoothingResult<ArrayD<f64>> {
        let mut num = self.numerator.array().clone();
        let mut den = self.denominator.array().clone();
        filter_array(&mut num, window, boundary)?;
        filter_array(&mut den, window, boundary)?;
        Ok(num / den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::window::tophat_window;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Raw IEEE division before regularization.
    // - `regularize` and `log_regularize` touching only empty cells.
    // - Merge combining counts, not ratios.
    // - Smoothed ratios and the non-zero denominator count.
    // -------------------------------------------------------------------------

    fn three_bins() -> RatioAccumulator {
        RatioAccumulator::new(Grid::linear(0.0, 3.0, 3).unwrap())
    }

    #[test]
    // Purpose
    // -------
    // Without regularization, empty cells follow IEEE division.
    //
    // Given
    // -----
    // - Cell 0: 1/2. Cell 1: 0/0. Cell 2: 3/0.
    //
    // Expect
    // ------
    // - [0.5, NaN, +inf].
    fn ratio_uses_ieee_division() {
        // Arrange
        let mut acc = three_bins();
        acc.increment_numerator(&[0.5], 1.0).unwrap();
        acc.increment_denominator(&[0.5], 2.0).unwrap();
        acc.increment_numerator(&[2.5], 3.0).unwrap();

        // Act
        let r = acc.ratio();

        // Assert
        assert_eq!(r[[0]], 0.5);
        assert!(r[[1]].is_nan());
        assert!(r[[2]].is_infinite() && r[[2]] > 0.0);
        assert_eq!(acc.count_nonzero_denominator(), 1);
    }

    #[test]
    // Purpose
    // -------
    // `regularize` turns empty cells into `numerator / 1` and leaves the rest.
    //
    // Given
    // -----
    // - Cell 0: 1/4; cells 1 and 2 empty.
    //
    // Expect
    // ------
    // - Ratio [0.25, 0, 0]; the denominator reads [4, 1, 1].
    fn regularize_only_touches_empty_cells() {
        // Arrange
        let mut acc = three_bins();
        acc.increment_numerator(&[0.5], 1.0).unwrap();
        acc.increment_denominator(&[0.5], 4.0).unwrap();

        // Act
        let r = acc.regularize().ratio();

        // Assert
        assert_eq!(r, array![0.25, 0.0, 0.0].into_dyn());
        assert_eq!(acc.denominator().array(), &array![4.0, 1.0, 1.0].into_dyn());
        assert_eq!(acc.numerator().array(), &array![1.0, 0.0, 0.0].into_dyn());
    }

    #[test]
    // Purpose
    // -------
    // `log_regularize` makes `ln(ratio)` finite in empty cells only.
    fn log_regularize_sets_epsilon_over_one() {
        let mut acc = three_bins();
        acc.increment_numerator(&[1.5], 2.0).unwrap();
        acc.increment_denominator(&[1.5], 8.0).unwrap();

        let r = acc.log_regularize(Some(1e-6)).ratio();

        assert_eq!(r, array![1e-6, 0.25, 1e-6].into_dyn());
        assert!(r.iter().all(|v| v.ln().is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // Merging two runs combines raw counts, so the merged ratio is the ratio
    // of sums rather than the mean of the two ratios.
    //
    // Given
    // -----
    // - Run A: 1 of 1 in cell 0 (ratio 1).
    // - Run B: 1 of 3 in cell 0 (ratio 1/3).
    //
    // Expect
    // ------
    // - Merged ratio 2/4 = 0.5, not (1 + 1/3) / 2.
    // - Merging a different grid fails and changes nothing.
    fn merge_combines_counts_not_ratios() {
        // Arrange
        let mut a = three_bins();
        let mut b = three_bins();
        a.increment_numerator(&[0.5], 1.0).unwrap();
        a.increment_denominator(&[0.5], 1.0).unwrap();
        b.increment_numerator(&[0.5], 1.0).unwrap();
        b.increment_denominator(&[0.5], 3.0).unwrap();
        let other = RatioAccumulator::new(Grid::linear(0.0, 6.0, 3).unwrap());

        // Act
        a.merge(&b).unwrap();
        let before = a.clone();
        let err = a.merge(&other).unwrap_err();

        // Assert
        assert_abs_diff_eq!(a.ratio()[[0]], 0.5, epsilon = 1e-15);
        assert_eq!(err, BinningError::IncompatibleGrid);
        assert_eq!(a, before);
    }

    #[test]
    // Purpose
    // -------
    // Smoothing both halves with one window gives a ratio of local sums and
    // leaves the stored counts alone.
    fn smoothed_ratio_divides_smoothed_halves() {
        let mut acc = RatioAccumulator::new(Grid::linear(0.0, 5.0, 5).unwrap());
        acc.increment_numerator(&[1.5], 1.0).unwrap();
        acc.increment_denominator(&[1.5], 2.0).unwrap();
        acc.increment_denominator(&[2.5], 2.0).unwrap();
        let before = acc.clone();

        let window = tophat_window(3.0).unwrap().into_dyn();
        let r = acc.smoothed_ratio(&window, Boundary::Bounded).unwrap();

        // Cell 2 sees numerator 1 and denominator 4 within its window.
        assert_abs_diff_eq!(r[[2]], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(r[[1]], 0.25, epsilon = 1e-12);
        assert!(r[[4]].is_nan());
        assert_eq!(acc, before);
    }
}
