// matgrad-core/src/ops/loss/mse.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::{self, Matrix};

/// Mean of `(prediction - target)^2` over every element, as a `1 x 1` node.
///
/// # Errors
/// `ShapeMismatch` unless `target` has exactly the prediction's shape, and
/// `EmptyTensor` for an empty prediction.
pub fn mse_op(graph: &mut Graph, prediction: NodeId, target: &Matrix) -> Result<NodeId, MatGradError> {
    let loss = {
        let values = graph.data(prediction)?;
        if values.dim() != target.dim() {
            return Err(MatGradError::ShapeMismatch {
                expected: target.dim(),
                actual: values.dim(),
                operation: "mse".to_string(),
            });
        }
        if values.is_empty() {
            return Err(MatGradError::EmptyTensor {
                operation: "mse".to_string(),
            });
        }
        (values - target).mapv(|d| d * d).sum() / values.len() as f64
    };
    Ok(graph.push(
        tensor::scalar(loss),
        vec![prediction],
        BackwardOp::MeanSquaredError {
            target: target.clone(),
        },
    ))
}

/// `d_pred = 2 (pred - target) / size · g`
pub(crate) fn mse_backward(
    prediction: &Matrix,
    target: &Matrix,
    grad_output: &Matrix,
) -> Result<Vec<Matrix>, MatGradError> {
    let scale = 2.0 * grad_output[[0, 0]] / prediction.len() as f64;
    Ok(vec![(prediction - target) * scale])
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
