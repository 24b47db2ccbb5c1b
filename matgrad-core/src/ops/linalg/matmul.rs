// matgrad-core/src/ops/linalg/matmul.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::Matrix;

/// Matrix product `a · b`.
///
/// `a` is `M x K`, `b` is `K x N`, and the result is `M x N`.
///
/// # Errors
/// `IncompatibleShapes` when the inner dimensions differ.
pub fn matmul_op(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
    let value = {
        let lhs = graph.data(a)?;
        let rhs = graph.data(b)?;
        if lhs.ncols() != rhs.nrows() {
            return Err(MatGradError::IncompatibleShapes {
                shape1: lhs.dim(),
                shape2: rhs.dim(),
                operation: "matmul".to_string(),
            });
        }
        lhs.dot(rhs)
    };
    Ok(graph.push(value, vec![a, b], BackwardOp::MatMul))
}

/// `d_a = g · bᵗ` and `d_b = aᵗ · g`.
pub(crate) fn matmul_backward(
    a: &Matrix,
    b: &Matrix,
    grad_output: &Matrix,
) -> Result<Vec<Matrix>, MatGradError> {
    Ok(vec![grad_output.dot(&b.t()), a.t().dot(grad_output)])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
