// src/tensor/mod.rs

//! Dense 2-D matrix helpers backing every graph node.
//!
//! The engine does not implement its own buffer: node values are
//! `ndarray::Array2<f64>` in standard (row-major) layout. This module only adds
//! the handful of creation, shape and broadcasting helpers the operators share.

use ndarray::Array2;

pub mod broadcast_utils;
pub mod create;

pub use broadcast_utils::{broadcast_shapes, reduce_to_shape};
pub use create::{from_vec, full, ones, randn, scalar, zeros};

/// The value type stored in every node: a dense `f64` matrix.
pub type Matrix = Array2<f64>;

/// `(rows, cols)` of a matrix.
pub type Shape = (usize, usize);

/// Returns the `(rows, cols)` shape of a matrix.
pub fn shape_of(m: &Matrix) -> Shape {
    m.dim()
}

/// Copies the elements of `m` out in row-major order, whatever its memory layout.
pub fn to_row_major_vec(m: &Matrix) -> Vec<f64> {
    m.iter().copied().collect()
}
