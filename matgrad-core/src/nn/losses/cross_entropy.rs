// matgrad-core/src/nn/losses/cross_entropy.rs

use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::loss::cross_entropy_op;

/// Softmax cross-entropy over integer class labels, averaged over the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    pub fn new() -> Self {
        CrossEntropyLoss
    }

    /// Returns a `1 x 1` loss node for `logits` (`N x K`) and `N` labels.
    pub fn calculate(&self, graph: &mut Graph, logits: NodeId, labels: &[usize]) -> Result<NodeId, MatGradError> {
        cross_entropy_op(graph, logits, labels)
    }
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
