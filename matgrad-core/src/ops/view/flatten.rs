// matgrad-core/src/ops/view/flatten.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::{self, Matrix};

/// Flattens an `R x C` node into a single `1 x (R*C)` row.
///
/// Elements are taken in row-major order regardless of the memory layout of
/// the input. A node that already has one row or one column is returned as is
/// and no new node is created.
pub fn flatten_op(graph: &mut Graph, a: NodeId) -> Result<NodeId, MatGradError> {
    let (rows, cols) = graph.shape(a)?;
    if rows <= 1 || cols <= 1 {
        return Ok(a);
    }
    let value = tensor::from_vec(tensor::to_row_major_vec(graph.data(a)?), 1, rows * cols)?;
    Ok(graph.push(value, vec![a], BackwardOp::Flatten { rows, cols }))
}

/// Folds the `1 x (R*C)` gradient back into `R x C`, row-major.
pub(crate) fn flatten_backward(
    rows: usize,
    cols: usize,
    grad_output: &Matrix,
) -> Result<Vec<Matrix>, MatGradError> {
    Ok(vec![tensor::from_vec(
        tensor::to_row_major_vec(grad_output),
        rows,
        cols,
    )?])
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod tests;
