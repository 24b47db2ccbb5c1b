// matgrad-core/src/ops/arithmetic/mul.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::broadcast_to;
use crate::tensor::{broadcast_shapes, reduce_to_shape, Matrix};

/// Element-wise (Hadamard) product `a ⊙ b` with broadcasting.
pub fn mul_op(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
    let value = {
        let lhs = graph.data(a)?;
        let rhs = graph.data(b)?;
        let shape = broadcast_shapes(lhs.dim(), rhs.dim())?;
        &broadcast_to(lhs, shape)? * &broadcast_to(rhs, shape)?
    };
    Ok(graph.push(value, vec![a, b], BackwardOp::Mul))
}

/// `d_a = b ⊙ g` and `d_b = a ⊙ g`, each reduced to its operand's shape.
pub(crate) fn mul_backward(
    a: &Matrix,
    b: &Matrix,
    grad_output: &Matrix,
) -> Result<Vec<Matrix>, MatGradError> {
    let shape = grad_output.dim();
    let grad_a = &broadcast_to(b, shape)? * grad_output;
    let grad_b = &broadcast_to(a, shape)? * grad_output;
    Ok(vec![
        reduce_to_shape(&grad_a, a.nrows(), a.ncols())?,
        reduce_to_shape(&grad_b, b.nrows(), b.ncols())?,
    ])
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
