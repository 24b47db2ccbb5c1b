// matgrad-core/src/ops/arithmetic/scalar.rs

//! Node-with-scalar arithmetic. The scalar becomes a `1 x 1` constant on the
//! tape and is broadcast by the underlying node-with-node operator.

use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::tensor;

pub fn add_scalar_op(graph: &mut Graph, a: NodeId, scalar: f64) -> Result<NodeId, MatGradError> {
    graph.validate(a)?;
    let c = graph.constant(tensor::scalar(scalar));
    add_op(graph, a, c)
}

pub fn sub_scalar_op(graph: &mut Graph, a: NodeId, scalar: f64) -> Result<NodeId, MatGradError> {
    add_scalar_op(graph, a, -scalar)
}

pub fn mul_scalar_op(graph: &mut Graph, a: NodeId, scalar: f64) -> Result<NodeId, MatGradError> {
    graph.validate(a)?;
    let c = graph.constant(tensor::scalar(scalar));
    mul_op(graph, a, c)
}

/// Division by `0.0` multiplies by an infinite constant.
pub fn div_scalar_op(graph: &mut Graph, a: NodeId, scalar: f64) -> Result<NodeId, MatGradError> {
    mul_scalar_op(graph, a, 1.0 / scalar)
}

#[cfg(test)]
#[path = "scalar_test.rs"]
mod tests;
