//! smoothing — window functions and boundary-aware convolution.
//!
//! Purpose
//! -------
//! Turn binned counts into smooth density or rate estimates by convolving
//! them with a normalized window. This module owns both halves of that
//! operation: generating the window ([`window`]) and applying it
//! ([`filter`]).
//!
//! Key behaviors
//! -------------
//! - Windows (Gaussian, top-hat; 1-D and 2-D) are integral-preserving and
//!   sized in bin units.
//! - [`filter_array`] convolves in place with zero-padded
//!   ([`Boundary::Bounded`]) or periodic ([`Boundary::Cyclic`]) edges.
//! - Value and dimension failures are reported through [`SmoothingError`].
//!
//! Conventions
//! -----------
//! - Arrays are `ndarray` arrays of `f64`; filtering takes dynamic-rank
//!   arrays (`ArrayD`) so that accumulators of any grid can be passed in,
//!   and rejects ranks other than 1 and 2 at run time.
//! - The numeric kernels are pure: no allocation beyond the output buffer,
//!   no global state. Only [`filter_array`] emits a `trace` event.

pub mod errors;
pub mod filter;
pub mod window;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{SmoothingError, SmoothingResult};
pub use self::filter::{Boundary, filter_array};
pub use self::window::{
    WindowKind, gaussian_window, gaussian_window_2d, tophat_window, tophat_window_2d,
};
