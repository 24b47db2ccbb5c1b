// matgrad-core/src/ops/activation/sigmoid.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::Matrix;
use ndarray::Zip;

/// Logistic function `1 / (1 + e^-a)` element-wise.
///
/// The output is cached in the backward record.
pub fn sigmoid_op(graph: &mut Graph, a: NodeId) -> Result<NodeId, MatGradError> {
    let value = graph.data(a)?.mapv(|x| 1.0 / (1.0 + (-x).exp()));
    let op = BackwardOp::Sigmoid {
        output: value.clone(),
    };
    Ok(graph.push(value, vec![a], op))
}

/// `d_a = s (1 - s) ⊙ g`
pub(crate) fn sigmoid_backward(output: &Matrix, grad_output: &Matrix) -> Result<Vec<Matrix>, MatGradError> {
    let grad = Zip::from(output)
        .and(grad_output)
        .map_collect(|&s, &g| s * (1.0 - s) * g);
    Ok(vec![grad])
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
