//! Small dense matrix type used to hold datasets.
//!
//! `Array2` stores samples row-major so that a sample is a contiguous slice,
//! which keeps the nearest-neighbor inner loop cache friendly. It is kept
//! dependency-free on purpose; the crate never needs linear algebra.
pub mod matrix;

pub use matrix::{Array2, ShapeError};
