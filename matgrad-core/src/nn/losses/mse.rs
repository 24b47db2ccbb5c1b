// matgrad-core/src/nn/losses/mse.rs

use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::loss::mse_op;
use crate::tensor::Matrix;

/// Mean squared error against a constant target.
#[derive(Debug, Clone, Copy, Default)]
pub struct MSELoss;

impl MSELoss {
    pub fn new() -> Self {
        MSELoss
    }

    /// Returns a `1 x 1` loss node. `target` must match the prediction's shape.
    pub fn calculate(&self, graph: &mut Graph, prediction: NodeId, target: &Matrix) -> Result<NodeId, MatGradError> {
        mse_op(graph, prediction, target)
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
