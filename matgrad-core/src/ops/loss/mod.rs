// src/ops/loss/mod.rs

//! # Fused loss nodes
//!
//! Each loss is a single graph node with one input (the prediction) and a
//! hand-derived backward rule. Labels and targets are plain values captured in
//! the backward record, never graph nodes.
//!
//! - [`cross_entropy_op`]: row-wise softmax followed by mean negative
//!   log-likelihood, with the closed-form `(p - y) / N` gradient.
//! - [`mse_op`]: mean of squared element-wise differences.

pub mod cross_entropy;
pub mod mse;
pub mod softmax;

pub use cross_entropy::{cross_entropy_op, PROBABILITY_EPSILON};
pub use mse::mse_op;
pub use softmax::softmax;
