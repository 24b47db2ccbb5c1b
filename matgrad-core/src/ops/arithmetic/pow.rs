// matgrad-core/src/ops/arithmetic/pow.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::Matrix;

/// Raises every element of `a` to a constant power.
///
/// Non-integer exponents of negative elements yield NaN, and negative
/// exponents of zero yield infinities. Neither is trapped.
pub fn pow_op(graph: &mut Graph, a: NodeId, exponent: f64) -> Result<NodeId, MatGradError> {
    let value = graph.data(a)?.mapv(|x| x.powf(exponent));
    Ok(graph.push(value, vec![a], BackwardOp::Pow { exponent }))
}

/// `d_a = p * a^(p - 1) ⊙ g`
pub(crate) fn pow_backward(
    a: &Matrix,
    exponent: f64,
    grad_output: &Matrix,
) -> Result<Vec<Matrix>, MatGradError> {
    let local = a.mapv(|x| exponent * x.powf(exponent - 1.0));
    Ok(vec![local * grad_output])
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
