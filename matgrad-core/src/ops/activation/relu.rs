// matgrad-core/src/ops/activation/relu.rs

use crate::autograd::{BackwardOp, Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::Matrix;
use ndarray::Zip;

/// `max(a, 0)` element-wise.
pub fn relu_op(graph: &mut Graph, a: NodeId) -> Result<NodeId, MatGradError> {
    let value = graph.data(a)?.mapv(|x| x.max(0.0));
    Ok(graph.push(value, vec![a], BackwardOp::Relu))
}

/// Passes the gradient where the output is strictly positive.
pub(crate) fn relu_backward(output: &Matrix, grad_output: &Matrix) -> Result<Vec<Matrix>, MatGradError> {
    let grad = Zip::from(output)
        .and(grad_output)
        .map_collect(|&out, &g| if out > 0.0 { g } else { 0.0 });
    Ok(vec![grad])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
