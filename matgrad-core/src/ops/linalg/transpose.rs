// matgrad-core/src/ops/linalg/transpose.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::Matrix;

/// `aᵗ`, materialised in standard layout.
pub fn transpose_op(graph: &mut Graph, a: NodeId) -> Result<NodeId, MatGradError> {
    let value = transposed(graph.data(a)?);
    Ok(graph.push(value, vec![a], BackwardOp::Transpose))
}

pub(crate) fn transpose_backward(grad_output: &Matrix) -> Result<Vec<Matrix>, MatGradError> {
    Ok(vec![transposed(grad_output)])
}

fn transposed(m: &Matrix) -> Matrix {
    m.t().as_standard_layout().into_owned()
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
