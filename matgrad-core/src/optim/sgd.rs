use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::optim::optimizer_trait::{validate_all, Optimizer};
use log::trace;

/// Plain stochastic gradient descent: `data -= lr * grad`.
#[derive(Debug, Clone)]
pub struct SgdOptimizer {
    params: Vec<NodeId>,
    lr: f64,
}

impl SgdOptimizer {
    pub fn new(params: impl IntoIterator<Item = NodeId>, lr: f64) -> Self {
        SgdOptimizer {
            params: params.into_iter().collect(),
            lr,
        }
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self, graph: &mut Graph) -> Result<(), MatGradError> {
        validate_all(graph, &self.params)?;
        let lr = self.lr;
        for &param in &self.params {
            graph.update_data(param, |mut data, grad| data.scaled_add(-lr, &grad))?;
        }
        trace!("sgd: updated {} parameters (lr = {})", self.params.len(), lr);
        Ok(())
    }

    fn parameters(&self) -> &[NodeId] {
        &self.params
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f64) {
        self.lr = lr;
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
