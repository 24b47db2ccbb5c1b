use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::nn::layers::Linear;
use crate::nn::module::Module;
use log::debug;
use rand::Rng;

/// Multi-layer perceptron: a stack of [`Linear`] layers.
///
/// Every layer but the last applies ReLU; the last one emits raw scores.
#[derive(Debug, Clone)]
pub struct Mlp {
    layers: Vec<Linear>,
}

impl Mlp {
    /// Builds `nin -> nouts[0] -> ... -> nouts[last]`, registering all
    /// parameters in `graph`.
    pub fn new<R: Rng + ?Sized>(
        graph: &mut Graph,
        nin: usize,
        nouts: &[usize],
        rng: &mut R,
    ) -> Result<Self, MatGradError> {
        if nouts.is_empty() {
            return Err(MatGradError::InvalidConfig(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        let mut layers = Vec::with_capacity(nouts.len());
        let mut fan_in = nin;
        for (i, &fan_out) in nouts.iter().enumerate() {
            let is_last = i + 1 == nouts.len();
            let layer = Linear::new(graph, fan_in, fan_out, !is_last, rng)?;
            graph.set_label(layer.weight(), format!("layers.{}.weight", i))?;
            graph.set_label(layer.bias(), format!("layers.{}.bias", i))?;
            layers.push(layer);
            fan_in = fan_out;
        }
        debug!("mlp: {} -> {:?}", nin, nouts);
        Ok(Mlp { layers })
    }

    pub fn layers(&self) -> &[Linear] {
        &self.layers
    }

    pub fn in_features(&self) -> usize {
        self.layers.first().map_or(0, Linear::in_features)
    }

    pub fn out_features(&self) -> usize {
        self.layers.last().map_or(0, Linear::out_features)
    }
}

impl Module for Mlp {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, MatGradError> {
        self.layers
            .iter()
            .try_fold(input, |x, layer| layer.forward(graph, x))
    }

    fn parameters(&self) -> Vec<NodeId> {
        self.layers.iter().flat_map(Linear::parameters).collect()
    }
}
