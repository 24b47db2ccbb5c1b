// matgrad-core/src/ops/arithmetic/add.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::broadcast_to;
use crate::tensor::{broadcast_shapes, reduce_to_shape, Matrix};

/// Element-wise `a + b` with broadcasting.
///
/// Either operand may be a `1 x C` row, an `R x 1` column or a `1 x 1` scalar
/// stretched to the other's shape.
///
/// # Errors
/// `BroadcastError` for incompatible shapes, or a graph-identity error for an
/// invalid handle.
pub fn add_op(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
    let value = {
        let lhs = graph.data(a)?;
        let rhs = graph.data(b)?;
        let shape = broadcast_shapes(lhs.dim(), rhs.dim())?;
        &broadcast_to(lhs, shape)? + &broadcast_to(rhs, shape)?
    };
    Ok(graph.push(value, vec![a, b], BackwardOp::Add))
}

/// Both inputs receive the output gradient, summed down to their own shape.
pub(crate) fn add_backward(
    a: &Matrix,
    b: &Matrix,
    grad_output: &Matrix,
) -> Result<Vec<Matrix>, MatGradError> {
    Ok(vec![
        reduce_to_shape(grad_output, a.nrows(), a.ncols())?,
        reduce_to_shape(grad_output, b.nrows(), b.ncols())?,
    ])
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
