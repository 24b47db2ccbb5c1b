use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::tensor::Matrix;
use thiserror::Error;

/// Failure modes of [`check_grad`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical} != numerical {numerical}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
    },
    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (f+ = {loss_plus}, f- = {loss_minus})")]
    NonFiniteNumerical {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Graph error during gradient check: {0}")]
    Graph(#[from] MatGradError),
}

/// Compares backward gradients against central finite differences.
///
/// `build` is evaluated on `graph` with `inputs` and must return the output
/// node; the checked function is the sum of that node's elements. Each element
/// of each input is perturbed by `±epsilon` in place and restored afterwards.
/// An element passes when `|analytical - numerical| <= tolerance * (1 + |numerical|)`.
///
/// Every evaluation pushes new tape nodes, so run this on a scratch graph.
pub fn check_grad<F>(
    graph: &mut Graph,
    inputs: &[NodeId],
    build: F,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, MatGradError>,
{
    let output = build(graph, inputs)?;
    graph.zero_grad_all();
    graph.backward(output)?;
    let analytical = inputs
        .iter()
        .map(|&id| graph.grad(id).cloned())
        .collect::<Result<Vec<Matrix>, _>>()?;

    for (input_index, &id) in inputs.iter().enumerate() {
        let (_, cols) = graph.shape(id)?;
        for (element_index, &analytical_value) in analytical[input_index].iter().enumerate() {
            let at = [element_index / cols, element_index % cols];
            let original = graph.data(id)?[at];

            graph.data_mut(id)?[at] = original + epsilon;
            let out = build(graph, inputs)?;
            let loss_plus = graph.data(out)?.sum();

            graph.data_mut(id)?[at] = original - epsilon;
            let out = build(graph, inputs)?;
            let loss_minus = graph.data(out)?.sum();

            graph.data_mut(id)?[at] = original;

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NonFiniteNumerical {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }
            if (analytical_value - numerical).abs() > tolerance * (1.0 + numerical.abs()) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical: analytical_value,
                    numerical,
                });
            }
        }
    }
    Ok(())
}
