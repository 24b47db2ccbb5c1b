use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;

/// The base trait for network components (layers, stacks of layers, ...).
///
/// Implementors register their parameters in a [`Graph`] at construction and
/// keep the handles. Every forward pass is rebuilt on the graph's tape.
pub trait Module: std::fmt::Debug {
    /// Builds the forward computation for `input` and returns its output node.
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, MatGradError>;

    /// Learnable parameters, in a stable order.
    ///
    /// Persistence relies on this order: two modules of identical architecture
    /// must list matching parameters at matching positions.
    fn parameters(&self) -> Vec<NodeId>;

    /// Zeroes the gradient of every parameter.
    fn zero_grad(&self, graph: &mut Graph) -> Result<(), MatGradError> {
        for param in self.parameters() {
            graph.zero_grad(param)?;
        }
        Ok(())
    }

    /// Total number of scalar weights across all parameters.
    fn num_weights(&self, graph: &Graph) -> Result<usize, MatGradError> {
        self.parameters().into_iter().try_fold(0, |acc, param| {
            let (rows, cols) = graph.shape(param)?;
            Ok(acc + rows * cols)
        })
    }
}
