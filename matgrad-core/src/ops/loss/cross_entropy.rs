// matgrad-core/src/ops/loss/cross_entropy.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::loss::softmax;
use crate::tensor::{self, Matrix};

/// Probabilities are clamped to `[ε, 1 - ε]` before taking the logarithm.
pub const PROBABILITY_EPSILON: f64 = 1e-12;

/// Mean softmax cross-entropy of `logits` (`N x K`) against class indices.
///
/// Produces a `1 x 1` node whose only input is `logits`. The softmax and the
/// one-hot encoding of `labels` are cached for the backward rule.
///
/// # Errors
/// - `EmptyTensor` if the batch has no rows.
/// - `LabelCountMismatch` if `labels.len()` differs from `N`.
/// - `LabelOutOfRange` if a label is not below `K`.
pub fn cross_entropy_op(graph: &mut Graph, logits: NodeId, labels: &[usize]) -> Result<NodeId, MatGradError> {
    let (probs, one_hot) = {
        let values = graph.data(logits)?;
        let (rows, classes) = values.dim();
        if rows == 0 {
            return Err(MatGradError::EmptyTensor {
                operation: "cross_entropy".to_string(),
            });
        }
        if labels.len() != rows {
            return Err(MatGradError::LabelCountMismatch {
                labels: labels.len(),
                rows,
            });
        }
        if let Some(&label) = labels.iter().find(|&&label| label >= classes) {
            return Err(MatGradError::LabelOutOfRange { label, classes });
        }

        let probs = softmax(values).mapv(|p| p.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON));
        let mut one_hot = tensor::zeros(rows, classes);
        for (row, &label) in labels.iter().enumerate() {
            one_hot[[row, label]] = 1.0;
        }
        (probs, one_hot)
    };

    let rows = probs.nrows() as f64;
    let loss = -(&one_hot * &probs.mapv(f64::ln)).sum() / rows;
    Ok(graph.push(
        tensor::scalar(loss),
        vec![logits],
        BackwardOp::CrossEntropy { probs, one_hot },
    ))
}

/// `d_logits = (p - y) / N · g`, with `g` the scalar upstream gradient.
pub(crate) fn cross_entropy_backward(
    probs: &Matrix,
    one_hot: &Matrix,
    grad_output: &Matrix,
) -> Result<Vec<Matrix>, MatGradError> {
    let scale = grad_output[[0, 0]] / probs.nrows() as f64;
    Ok(vec![(probs - one_hot) * scale])
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
