//! Integration tests for the binning → accumulation → smoothing pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path a caller takes: build a grid (directly or
//!   through a rate estimator), accumulate weighted events, and read back a
//!   smoothed curve or ratio.
//! - Exercise realistic configurations (log axes, 2-D grids, merged runs,
//!   cyclic boundaries) rather than only single-module edge cases.
//!
//! Coverage
//! --------
//! - `binning`: mixed linear/log grids and endpoint handling.
//! - `accumulate`: dense and ratio accumulators, merges across runs.
//! - `smoothing`: 2-D windows with both boundary modes.
//! - `rate`: `RateEstimator` and `RatioRateEstimator` with default and
//!   top-hat options.
//!
//! Exclusions
//! ----------
//! - Window shapes, index arithmetic, and error messages are covered by
//!   unit tests next to each module.
//! - Python bindings are tested from Python.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use binsmooth::{
    accumulate::{DenseAccumulator, RatioAccumulator},
    binning::{Grid, Segment, Spacing},
    rate::{RateError, RateEstimator, RateOptions, RatioRateEstimator},
    smoothing::{Boundary, SmoothingError, WindowKind, gaussian_window_2d, tophat_window_2d},
};

/// Deterministic event times spread over `[start, end)` with a burst in the
/// middle third.
fn event_times(start: f64, end: f64, n: usize) -> Vec<f64> {
    let span = end - start;
    (0..n)
        .map(|i| {
            let u = (i as f64 + 0.5) / n as f64;
            if i % 3 == 0 { start + span * (1.0 / 3.0 + u / 3.0) } else { start + span * u }
        })
        .collect()
}

#[test]
// Purpose
// -------
// Total event weight is preserved by smoothing when the window fits inside
// the segment, and cyclic smoothing preserves it exactly up to the Gaussian
// tail truncation.
//
// Given
// -----
// - Segment (0, 1000), filter width 50 (binsize 2.5, 401 bins).
// - 300 unit events in [0, 900) plus a weight-5 event at the segment end.
//
// Expect
// ------
// - `sum(yvals_cyclic) · binsize ≈ 305`.
// - The bounded curve loses weight only near the edges, so its integral is
//   below the cyclic one.
// - The event at `t = end` lands in the last bin.
fn rate_estimator_preserves_total_weight() {
    // Arrange
    let segment = Segment::new(0.0, 1000.0).unwrap();
    let mut rate = RateEstimator::new(segment, 50.0).unwrap();
    for t in event_times(0.0, 900.0, 300) {
        rate.accumulate(t, 1.0).unwrap();
    }
    rate.accumulate(1000.0, 5.0).unwrap();

    // Act
    let cyclic = rate.yvals(Boundary::Cyclic).unwrap();
    let bounded = rate.yvals(Boundary::Bounded).unwrap();

    // Assert
    assert_eq!(rate.grid().shape(), vec![401]);
    assert_eq!(rate.accumulator().at(&[400]), Some(5.0));
    assert_relative_eq!(cyclic.sum() * rate.binsize(), 305.0, max_relative = 1e-9);
    assert!(bounded.sum() < cyclic.sum());
    assert_eq!(rate.xvals().len(), cyclic.len());
}

#[test]
// Purpose
// -------
// Changing the filter width changes the curve but not the bins; a width the
// grid cannot hold fails at read time rather than at `set_filterwidth`.
fn filterwidth_changes_do_not_rebin() {
    // Arrange
    let opts = RateOptions::with_window(WindowKind::TopHat);
    let mut rate = RateEstimator::with_options(Segment::new(10.0, 20.0).unwrap(), 1.0, opts).unwrap();
    rate.accumulate(15.0, 1.0).unwrap();
    let narrow = rate.yvals(Boundary::Bounded).unwrap();

    // Act
    rate.set_filterwidth(4.0).unwrap();
    let wide = rate.yvals(Boundary::Bounded).unwrap();
    rate.set_filterwidth(100.0).unwrap();
    let too_wide = rate.yvals(Boundary::Bounded).unwrap_err();

    // Assert
    assert_eq!(rate.binsize(), 0.05);
    assert_eq!(narrow.len(), wide.len());
    assert!(wide.iter().cloned().fold(0.0, f64::max) < narrow.iter().cloned().fold(0.0, f64::max));
    assert!(matches!(too_wide, RateError::Smoothing(SmoothingError::WindowTooLarge { .. })));
}

#[test]
// Purpose
// -------
// Efficiency estimate from two independent runs: merging the raw counts
// before dividing gives the pooled efficiency.
//
// Given
// -----
// - Two ratio accumulators over a log-spaced amplitude axis (1..1000, 3 bins).
// - Run A: 9 of 10 found in the first decade. Run B: 1 of 30 found there,
//   and 3 of 4 in the second decade.
//
// Expect
// ------
// - Pooled efficiency 10/40 = 0.25 in the first decade, not the mean of
//   the per-run ratios (about 0.467).
// - Only run B has second-decade data, so 0.75 survives unchanged.
// - Regularized empty decades read 0.
fn pooled_efficiency_from_merged_runs() {
    // Arrange
    let grid = Grid::from_triples(&[(1.0, 1000.0, 3)], &[Spacing::Logarithmic]).unwrap();
    let mut a = RatioAccumulator::new(grid.clone());
    let mut b = RatioAccumulator::new(grid);
    a.increment_denominator(&[5.0], 10.0).unwrap();
    b.increment_denominator(&[5.0], 30.0).unwrap();
    a.increment_numerator(&[5.0], 9.0).unwrap();
    b.increment_numerator(&[5.0], 1.0).unwrap();
    b.increment_denominator(&[50.0], 4.0).unwrap();
    b.increment_numerator(&[50.0], 3.0).unwrap();

    // Act
    a.merge(&b).unwrap();
    let eff = a.regularize().ratio();

    // Assert
    assert_abs_diff_eq!(eff[[0]], 0.25, epsilon = 1e-15);
    assert_abs_diff_eq!(eff[[1]], 0.75, epsilon = 1e-15);
    assert_eq!(eff[[2]], 0.0);
    assert_eq!(a.count_nonzero_denominator(), 3);
}

#[test]
// Purpose
// -------
// A 2-D histogram on a linear × log grid smooths with both window families
// and both boundary modes. Cyclic smoothing scales the total by the window
// sum; bounded smoothing loses weight at the edges.
fn two_dimensional_density_smoothing() {
    // Arrange
    let grid = Grid::from_triples(&[(0.0, 10.0, 20), (1.0, 100.0, 16)], &[Spacing::Linear, Spacing::Logarithmic])
        .unwrap();
    let mut acc = DenseAccumulator::new(grid);
    acc.accumulate(&[5.0, 10.0], 4.0).unwrap();
    acc.accumulate(&[0.1, 1.5], 2.0).unwrap();
    acc.accumulate(&[10.0, 100.0], 1.0).unwrap();
    let total = acc.array().sum();
    let gaussian = gaussian_window_2d(1.5, 1.5).unwrap();

    // Act
    let mut cyclic = acc.clone();
    cyclic.smooth(&gaussian.clone().into_dyn(), Boundary::Cyclic).unwrap();
    let mut bounded = acc.clone();
    bounded.smooth(&tophat_window_2d(5.0, 3.0).unwrap().into_dyn(), Boundary::Bounded).unwrap();

    // Assert
    assert_eq!(total, 7.0);
    assert_relative_eq!(cyclic.array().sum(), total * gaussian.sum(), max_relative = 1e-12);
    assert!(bounded.array().sum() < total);
    assert!(bounded.array().iter().all(|&v| v >= 0.0));
    assert_eq!(acc.at(&[19, 15]), Some(1.0));
}

#[test]
// Purpose
// -------
// Ratio rate over a segment where the denominator covers only half the bins:
// after regularization the smoothed ratio is finite everywhere and close to
// the true fraction well inside the covered half.
fn ratio_rate_with_partial_coverage() {
    // Arrange
    let mut rate = RatioRateEstimator::new(Segment::new(0.0, 200.0).unwrap(), 20.0).unwrap();
    let xs = rate.xvals();
    for &x in xs.iter().filter(|&&x| x < 100.0) {
        rate.increment_denominator(x, 4.0).unwrap();
        rate.increment_numerator(x, 1.0).unwrap();
    }

    // Act
    let before = rate.yvals(Boundary::Bounded).unwrap();
    rate.regularize();
    let after = rate.yvals(Boundary::Bounded).unwrap();

    // Assert
    assert!(before.iter().any(|v| v.is_nan()));
    assert!(after.iter().all(|v| v.is_finite()));
    assert_abs_diff_eq!(after[50] * rate.binsize(), 0.25, epsilon = 1e-6);
}
