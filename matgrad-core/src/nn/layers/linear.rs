use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::nn::init::he_normal;
use crate::nn::module::Module;
use crate::tensor;
use rand::Rng;

/// Fully connected layer: `y = x · W + b`, optionally followed by ReLU.
///
/// `W` is `in_features x out_features` and `b` is a `1 x out_features` row
/// broadcast over the batch, so inputs are `N x in_features` row batches.
#[derive(Debug, Clone)]
pub struct Linear {
    weight: NodeId,
    bias: NodeId,
    in_features: usize,
    out_features: usize,
    nonlinearity: bool,
}

impl Linear {
    /// Registers a He-initialised weight and a zero bias in `graph`.
    pub fn new<R: Rng + ?Sized>(
        graph: &mut Graph,
        in_features: usize,
        out_features: usize,
        nonlinearity: bool,
        rng: &mut R,
    ) -> Result<Self, MatGradError> {
        let weight = graph.parameter(he_normal(in_features, out_features, rng)?);
        graph.set_label(weight, "weight")?;
        let bias = graph.parameter(tensor::zeros(1, out_features));
        graph.set_label(bias, "bias")?;
        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
            nonlinearity,
        })
    }

    pub fn weight(&self) -> NodeId {
        self.weight
    }

    pub fn bias(&self) -> NodeId {
        self.bias
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    /// Whether ReLU is applied after the affine map.
    pub fn nonlinearity(&self) -> bool {
        self.nonlinearity
    }
}

impl Module for Linear {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, MatGradError> {
        let projected = graph.matmul(input, self.weight)?;
        let shifted = graph.add(projected, self.bias)?;
        if self.nonlinearity {
            graph.relu(shifted)
        } else {
            Ok(shifted)
        }
    }

    fn parameters(&self) -> Vec<NodeId> {
        vec![self.weight, self.bias]
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
