use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;

/// Common interface for all optimizers.
pub trait Optimizer {
    /// Applies one update to every managed parameter using its current gradient.
    ///
    /// All handles are validated before any parameter is touched.
    fn step(&mut self, graph: &mut Graph) -> Result<(), MatGradError>;

    /// The parameters this optimizer updates, in construction order.
    fn parameters(&self) -> &[NodeId];

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, lr: f64);

    /// Zeroes the gradients of the managed parameters.
    fn zero_grad(&self, graph: &mut Graph) -> Result<(), MatGradError> {
        for &param in self.parameters() {
            graph.zero_grad(param)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_all(graph: &Graph, params: &[NodeId]) -> Result<(), MatGradError> {
    params.iter().try_for_each(|&param| graph.validate(param))
}
