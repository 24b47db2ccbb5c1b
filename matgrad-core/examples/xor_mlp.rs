//! # Training a small MLP on XOR
//!
//! Builds a 2 -> 8 -> 2 perceptron, trains it with Nesterov momentum on the four
//! XOR points using the fused cross-entropy loss, then prints the predictions.
//!
//! Run with `cargo run --example xor_mlp`, and `RUST_LOG=debug` to see the
//! graph's own logging.

use log::info;
use matgrad_core::nn::{CrossEntropyLoss, Mlp, Module};
use matgrad_core::ops::loss::softmax;
use matgrad_core::optim::{NesterovOptimizer, Optimizer};
use matgrad_core::{tensor, Graph, MatGradError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), MatGradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let inputs = tensor::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0], 4, 2)?;
    let labels = [0, 1, 1, 0];

    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(42);
    let model = Mlp::new(&mut graph, 2, &[8, 2], &mut rng)?;
    let mut optimizer = NesterovOptimizer::new(&graph, model.parameters(), 0.1, 0.9)?;
    let loss_fn = CrossEntropyLoss::new();

    for epoch in 0..300 {
        graph.reset();
        let x = graph.input(inputs.clone());
        let logits = model.forward(&mut graph, x)?;
        let loss = loss_fn.calculate(&mut graph, logits, &labels)?;

        optimizer.zero_grad(&mut graph)?;
        graph.backward(loss)?;
        optimizer.step(&mut graph)?;

        if epoch % 50 == 0 {
            info!("epoch {:>3}: loss {:.5}", epoch, graph.item(loss)?);
        }
    }

    graph.reset();
    let x = graph.input(inputs.clone());
    let logits = model.forward(&mut graph, x)?;
    let probs = softmax(graph.data(logits)?);
    for (row, &label) in labels.iter().enumerate() {
        info!(
            "{:?} -> p(1) = {:.3} (label {})",
            inputs.row(row).to_vec(),
            probs[[row, 1]],
            label
        );
    }
    Ok(())
}
