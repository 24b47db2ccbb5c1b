use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::optim::optimizer_trait::{validate_all, Optimizer};
use crate::tensor::{self, Matrix};
use log::trace;

/// SGD with Nesterov momentum.
///
/// Keeps one velocity buffer per parameter, zero at construction. Each step:
///
/// ```text
/// v_prev = v
/// v      = μ·v − lr·grad
/// data  += −μ·v_prev + (1 + μ)·v
/// ```
#[derive(Debug, Clone)]
pub struct NesterovOptimizer {
    params: Vec<NodeId>,
    velocities: Vec<Matrix>,
    lr: f64,
    momentum: f64,
}

impl NesterovOptimizer {
    /// Creates the optimizer, sizing each velocity after its parameter.
    ///
    /// # Errors
    /// Any graph-identity error for a handle `graph` does not own.
    pub fn new(
        graph: &Graph,
        params: impl IntoIterator<Item = NodeId>,
        lr: f64,
        momentum: f64,
    ) -> Result<Self, MatGradError> {
        let params: Vec<NodeId> = params.into_iter().collect();
        let velocities = params
            .iter()
            .map(|&param| {
                let (rows, cols) = graph.shape(param)?;
                Ok(tensor::zeros(rows, cols))
            })
            .collect::<Result<Vec<_>, MatGradError>>()?;
        Ok(NesterovOptimizer {
            params,
            velocities,
            lr,
            momentum,
        })
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Velocity buffers, one per parameter in construction order.
    pub fn velocities(&self) -> &[Matrix] {
        &self.velocities
    }
}

impl Optimizer for NesterovOptimizer {
    fn step(&mut self, graph: &mut Graph) -> Result<(), MatGradError> {
        validate_all(graph, &self.params)?;
        for (&param, velocity) in self.params.iter().zip(self.velocities.iter()) {
            let grad_shape = graph.grad(param)?.dim();
            if grad_shape != velocity.dim() {
                return Err(MatGradError::ShapeMismatch {
                    expected: velocity.dim(),
                    actual: grad_shape,
                    operation: "nesterov step".to_string(),
                });
            }
        }

        let (lr, mu) = (self.lr, self.momentum);
        for (&param, velocity) in self.params.iter().zip(self.velocities.iter_mut()) {
            graph.update_data(param, |mut data, grad| {
                let previous = velocity.clone();
                *velocity *= mu;
                velocity.scaled_add(-lr, &grad);
                data.scaled_add(-mu, &previous);
                data.scaled_add(1.0 + mu, velocity);
            })?;
        }
        trace!(
            "nesterov: updated {} parameters (lr = {}, momentum = {})",
            self.params.len(),
            lr,
            mu
        );
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
#[path = "nesterov_test.rs"]
mod tests;
