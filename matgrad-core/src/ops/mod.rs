//! # Graph operators (`ops`)
//!
//! Each submodule holds the forward `xxx_op` function for an operator and the
//! matching `xxx_backward` rule that [`BackwardOp`](crate::autograd::BackwardOp)
//! dispatches to. The forward functions validate their operand handles, compute
//! the value eagerly and push a tape node tagged with the rule to replay.
//!
//! The same operators are exposed as methods on [`Graph`] for convenience.
//!
//! Derived operators (`sub`, `neg`, `div` and the scalar forms) are composed
//! from primitives and have no backward rule of their own.
//!
//! ## Submodules
//!
//! - [`arithmetic`]: broadcasting add and mul, power, and the derived forms.
//! - [`linalg`]: matrix product and transpose.
//! - [`activation`]: ReLU and sigmoid.
//! - [`view`]: row-major flatten.
//! - [`loss`]: fused cross-entropy and mean-squared-error nodes, plus `softmax`.

use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::{Matrix, Shape};
use ndarray::ArrayView2;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod view;

/// Broadcasts `m` to `shape` as a read-only view.
pub(crate) fn broadcast_to(m: &Matrix, shape: Shape) -> Result<ArrayView2<'_, f64>, MatGradError> {
    m.broadcast(shape).ok_or(MatGradError::BroadcastError {
        shape1: m.dim(),
        shape2: shape,
    })
}

impl Graph {
    pub fn add(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
        arithmetic::add_op(self, a, b)
    }

    pub fn sub(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
        arithmetic::sub_op(self, a, b)
    }

    pub fn mul(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
        arithmetic::mul_op(self, a, b)
    }

    pub fn div(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
        arithmetic::div_op(self, a, b)
    }

    pub fn neg(&mut self, a: NodeId) -> Result<NodeId, MatGradError> {
        arithmetic::neg_op(self, a)
    }

    pub fn pow(&mut self, a: NodeId, exponent: f64) -> Result<NodeId, MatGradError> {
        arithmetic::pow_op(self, a, exponent)
    }

    pub fn add_scalar(&mut self, a: NodeId, scalar: f64) -> Result<NodeId, MatGradError> {
        arithmetic::add_scalar_op(self, a, scalar)
    }

    pub fn sub_scalar(&mut self, a: NodeId, scalar: f64) -> Result<NodeId, MatGradError> {
        arithmetic::sub_scalar_op(self, a, scalar)
    }

    pub fn mul_scalar(&mut self, a: NodeId, scalar: f64) -> Result<NodeId, MatGradError> {
        arithmetic::mul_scalar_op(self, a, scalar)
    }

    pub fn div_scalar(&mut self, a: NodeId, scalar: f64) -> Result<NodeId, MatGradError> {
        arithmetic::div_scalar_op(self, a, scalar)
    }

    pub fn matmul(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
        linalg::matmul_op(self, a, b)
    }

    pub fn transpose(&mut self, a: NodeId) -> Result<NodeId, MatGradError> {
        linalg::transpose_op(self, a)
    }

    pub fn relu(&mut self, a: NodeId) -> Result<NodeId, MatGradError> {
        activation::relu_op(self, a)
    }

    pub fn sigmoid(&mut self, a: NodeId) -> Result<NodeId, MatGradError> {
        activation::sigmoid_op(self, a)
    }

    pub fn flatten(&mut self, a: NodeId) -> Result<NodeId, MatGradError> {
        view::flatten_op(self, a)
    }

    /// Mean softmax cross-entropy of `logits` (N x K) against integer labels.
    pub fn cross_entropy(&mut self, logits: NodeId, labels: &[usize]) -> Result<NodeId, MatGradError> {
        loss::cross_entropy_op(self, logits, labels)
    }

    /// Mean squared error of `prediction` against a constant target.
    pub fn mse(&mut self, prediction: NodeId, target: &Matrix) -> Result<NodeId, MatGradError> {
        loss::mse_op(self, prediction, target)
    }
}
