//! binning::grid — multi-dimensional coordinate binning.
//!
//! Purpose
//! -------
//! Compose an ordered list of [`Axis`] values into a grid that converts a
//! tuple of coordinates into a tuple of array indices, so that the contents of
//! a dense array can be addressed with real-valued coordinates.
//!
//! Key behaviors
//! -------------
//! - [`Grid::index`] accepts a mix of point coordinates, closed segments, and
//!   half-open slices ([`Coord`]) and returns one [`BinIndex`] per dimension.
//! - [`Grid::bin`] is the point-only shorthand used by the accumulators.
//! - [`Grid::equals`] is the structural comparison guarding accumulator merges.
//! - [`Grid::centres`] returns one centre array per dimension; forming the
//!   Cartesian product is left to the caller.
//!
//! Conventions
//! -----------
//! - Failures from an axis are re-raised tagged with the 0-based dimension
//!   (see [`BinningError::InDimension`]).
//! - `shape()` is the tuple of per-axis bin counts and is the shape of every
//!   array built on the grid.
use std::ops::Range;

use ndarray::Array1;

use crate::binning::{
    axis::{Axis, Spacing},
    errors::{BinningError, BinningResult},
    segment::Segment,
};

/// One component of a coordinate tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coord {
    /// A single coordinate value.
    Value(f64),
    /// A closed interval; selects `index(start)..index(end) + 1`.
    Segment(Segment),
    /// A half-open interval; selects `index(start)..index(stop)`.
    /// A `step` is always rejected.
    Slice { start: f64, stop: f64, step: Option<f64> },
}

impl From<f64> for Coord {
    fn from(value: f64) -> Self {
        Coord::Value(value)
    }
}

impl From<Segment> for Coord {
    fn from(segment: Segment) -> Self {
        Coord::Segment(segment)
    }
}

/// Index produced for one dimension by [`Grid::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinIndex {
    Bin(usize),
    Span(Range<usize>),
}

impl BinIndex {
    /// The index as a half-open range (a single bin becomes `i..i + 1`).
    pub fn as_range(&self) -> Range<usize> {
        match self {
            BinIndex::Bin(i) => *i..*i + 1,
            BinIndex::Span(r) => r.clone(),
        }
    }
}

/// Grid — an ordered, non-empty composition of axes.
///
/// Invariants
/// ----------
/// - At least one axis.
/// - Immutable after construction; two grids are interchangeable exactly when
///   [`Grid::equals`] holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axes: Vec<Axis>,
}

impl Grid {
    /// Construct a grid from its axes, one per dimension.
    ///
    /// # Errors
    /// - [`BinningError::EmptyGrid`] if `axes` is empty.
    pub fn new(axes: Vec<Axis>) -> BinningResult<Self> {
        if axes.is_empty() {
            return Err(BinningError::EmptyGrid);
        }
        Ok(Grid { axes })
    }

    /// One-dimensional linearly spaced grid.
    pub fn linear(min: f64, max: f64, n: usize) -> BinningResult<Self> {
        Grid::new(vec![Axis::linear(min, max, n)?])
    }

    /// Build a grid from `(min, max, n)` triples and a matching spacing list.
    ///
    /// Parameters
    /// ----------
    /// - `triples`: `&[(f64, f64, usize)]`
    ///   Range and bin count for each dimension, in order.
    /// - `spacings`: `&[Spacing]`
    ///   One spacing per triple; an empty slice means all linear.
    ///
    /// Errors
    /// ------
    /// - [`BinningError::SpacingCountMismatch`] if `spacings` is non-empty and
    ///   its length differs from `triples.len()`.
    /// - Any axis construction error, tagged with its dimension.
    /// - [`BinningError::EmptyGrid`] if `triples` is empty.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use binsmooth::binning::{axis::Spacing, grid::Grid};
    /// let grid = Grid::from_triples(
    ///     &[(1.0, 25.0, 3), (1.0, 25.0, 3)],
    ///     &[Spacing::Linear, Spacing::Logarithmic],
    /// ).unwrap();
    /// assert_eq!(grid.bin(&[10.0, 1.0]).unwrap(), vec![1, 0]);
    /// assert_eq!(grid.bin(&[1.0, 5.0]).unwrap(), vec![0, 1]);
    /// ```
    pub fn from_triples(triples: &[(f64, f64, usize)], spacings: &[Spacing]) -> BinningResult<Self> {
        if !spacings.is_empty() && spacings.len() != triples.len() {
            return Err(BinningError::SpacingCountMismatch {
                axes: triples.len(),
                spacings: spacings.len(),
            });
        }
        let axes = triples
            .iter()
            .enumerate()
            .map(|(dim, &(min, max, n))| {
                let spacing = spacings.get(dim).copied().unwrap_or_default();
                Axis::new(min, max, n, spacing).map_err(|e| e.in_dimension(dim))
            })
            .collect::<BinningResult<Vec<_>>>()?;
        Grid::new(axes)
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Per-dimension bin counts.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(Axis::n).collect()
    }

    /// Map a coordinate tuple onto per-dimension indices.
    ///
    /// Errors
    /// ------
    /// - [`BinningError::CoordinateCount`] if `coords.len() != ndim()`.
    /// - The failing axis's error wrapped in [`BinningError::InDimension`].
    pub fn index(&self, coords: &[Coord]) -> BinningResult<Vec<BinIndex>> {
        self.check_count(coords.len())?;
        self.axes
            .iter()
            .zip(coords)
            .enumerate()
            .map(|(dim, (axis, coord))| {
                let idx = match *coord {
                    Coord::Value(x) => axis.index(x).map(BinIndex::Bin),
                    Coord::Segment(ref seg) => axis.index_segment(seg).map(BinIndex::Span),
                    Coord::Slice { start, stop, step } => {
                        axis.index_slice(start, stop, step).map(BinIndex::Span)
                    }
                };
                idx.map_err(|e| e.in_dimension(dim))
            })
            .collect()
    }

    /// Map a tuple of point coordinates onto array indices.
    pub fn bin(&self, coords: &[f64]) -> BinningResult<Vec<usize>> {
        self.check_count(coords.len())?;
        self.axes
            .iter()
            .zip(coords)
            .enumerate()
            .map(|(dim, (axis, &x))| axis.index(x).map_err(|e| e.in_dimension(dim)))
            .collect()
    }

    /// Structural equality: same number of axes, pairwise equal.
    pub fn equals(&self, other: &Grid) -> bool {
        self.axes.len() == other.axes.len()
            && self.axes.iter().zip(&other.axes).all(|(a, b)| a.equals(b))
    }

    /// Bin centres, one array per dimension.
    pub fn centres(&self) -> Vec<Array1<f64>> {
        self.axes.iter().map(Axis::centres).collect()
    }

    fn check_count(&self, got: usize) -> BinningResult<()> {
        if got != self.axes.len() {
            return Err(BinningError::CoordinateCount { expected: self.axes.len(), got });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mixed_grid() -> Grid {
        Grid::from_triples(&[(1.0, 25.0, 3), (1.0, 25.0, 3)], &[Spacing::Linear, Spacing::Logarithmic])
            .expect("valid grid")
    }

    #[test]
    // Purpose
    // -------
    // Verify per-dimension mapping on a mixed linear/log grid.
    //
    // Given
    // -----
    // - Linear [1, 25] x logarithmic [1, 25], 3 bins each.
    //
    // Expect
    // ------
    // - (1, 1) -> (0, 0), (1.5, 1) -> (0, 0), (10, 1) -> (1, 0), (1, 5) -> (0, 1).
    fn bin_maps_mixed_spacing_coordinates() {
        // Arrange
        let grid = mixed_grid();

        // Act / Assert
        assert_eq!(grid.shape(), vec![3, 3]);
        assert_eq!(grid.bin(&[1.0, 1.0]).unwrap(), vec![0, 0]);
        assert_eq!(grid.bin(&[1.5, 1.0]).unwrap(), vec![0, 0]);
        assert_eq!(grid.bin(&[10.0, 1.0]).unwrap(), vec![1, 0]);
        assert_eq!(grid.bin(&[1.0, 5.0]).unwrap(), vec![0, 1]);
        assert_eq!(grid.bin(&[25.0, 25.0]).unwrap(), vec![2, 2]);
    }

    #[test]
    // Purpose
    // -------
    // Failures identify the dimension that produced them.
    //
    // Expect
    // ------
    // - A bad second coordinate yields `InDimension { dim: 1, .. }` wrapping
    //   a range error; a short tuple yields `CoordinateCount`.
    fn lookup_failures_are_tagged_with_dimension() {
        // Arrange
        let grid = mixed_grid();

        // Act
        let err = grid.bin(&[2.0, 0.0]).unwrap_err();

        // Assert
        assert_eq!(err.dimension(), Some(1));
        assert!(err.is_range_error());
        assert_eq!(grid.bin(&[2.0]).unwrap_err(), BinningError::CoordinateCount { expected: 2, got: 1 });
    }

    #[test]
    // Purpose
    // -------
    // Mixed point/segment/slice coordinates produce bins and spans.
    fn index_handles_values_segments_and_slices() {
        // Arrange
        let grid = Grid::from_triples(&[(0.0, 10.0, 10), (0.0, 10.0, 5)], &[]).unwrap();
        let seg = Segment::new(2.0, 6.0).unwrap();

        // Act
        let idx = grid.index(&[Coord::from(seg), Coord::from(3.5)]).unwrap();
        let sliced = grid.index(&[Coord::Slice { start: 0.0, stop: 4.0, step: None }, Coord::Value(10.0)]).unwrap();

        // Assert
        assert_eq!(idx, vec![BinIndex::Span(2..7), BinIndex::Bin(1)]);
        assert_eq!(sliced, vec![BinIndex::Span(0..4), BinIndex::Bin(4)]);
        assert_eq!(sliced[1].as_range(), 4..5);
        let stepped = grid.index(&[Coord::Slice { start: 0.0, stop: 4.0, step: Some(1.0) }, Coord::Value(1.0)]);
        assert_eq!(stepped.unwrap_err().root(), &BinningError::UnsupportedStep { step: 1.0 });
    }

    #[test]
    // Purpose
    // -------
    // Grid equality is reflexive, symmetric, transitive, and sensitive to
    // every axis field.
    fn equals_is_an_equivalence_sensitive_to_every_axis() {
        // Arrange
        let a = mixed_grid();
        let b = mixed_grid();
        let c = mixed_grid();

        // Assert
        assert!(a.equals(&a));
        assert!(a.equals(&b) && b.equals(&a));
        assert!(a.equals(&b) && b.equals(&c) && a.equals(&c));

        let variants = [
            Grid::from_triples(&[(1.0, 25.0, 3), (1.0, 25.0, 3)], &[Spacing::Linear, Spacing::Linear]),
            Grid::from_triples(&[(0.0, 25.0, 3), (1.0, 25.0, 3)], &[Spacing::Linear, Spacing::Logarithmic]),
            Grid::from_triples(&[(1.0, 26.0, 3), (1.0, 25.0, 3)], &[Spacing::Linear, Spacing::Logarithmic]),
            Grid::from_triples(&[(1.0, 25.0, 4), (1.0, 25.0, 3)], &[Spacing::Linear, Spacing::Logarithmic]),
            Grid::from_triples(&[(1.0, 25.0, 3)], &[Spacing::Linear]),
        ];
        for other in variants {
            let other = other.unwrap();
            assert!(!a.equals(&other) && !other.equals(&a), "grids should differ: {other:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Constructor guards: empty grids, spacing-count mismatch, and tagged axis errors.
    fn construction_rejects_empty_mismatched_and_invalid_axes() {
        assert_eq!(Grid::new(vec![]).unwrap_err(), BinningError::EmptyGrid);
        assert_eq!(
            Grid::from_triples(&[(0.0, 1.0, 2)], &[Spacing::Linear, Spacing::Linear]).unwrap_err(),
            BinningError::SpacingCountMismatch { axes: 1, spacings: 2 }
        );
        let err = Grid::from_triples(&[(0.0, 1.0, 2), (0.0, 1.0, 2)], &[Spacing::Linear, Spacing::Logarithmic])
            .unwrap_err();
        assert_eq!(err.dimension(), Some(1));
        assert_eq!(err.root(), &BinningError::NonPositiveLogMin { min: 0.0 });
    }

    #[test]
    // Purpose
    // -------
    // Centres are returned per dimension, not as a product.
    fn centres_returns_one_array_per_dimension() {
        let centres = mixed_grid().centres();

        assert_eq!(centres.len(), 2);
        assert_relative_eq!(centres[0][1], 13.0, epsilon = 1e-12);
        assert_relative_eq!(centres[1][1], 5.0, epsilon = 1e-9);
    }
}
