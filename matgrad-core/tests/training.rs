mod common;

use matgrad_core::nn::serialization::{load_weights, save_weights};
use matgrad_core::nn::{CrossEntropyLoss, Mlp, Module};
use matgrad_core::optim::{NesterovOptimizer, Optimizer, SgdOptimizer};
use matgrad_core::utils::testing::check_matrix_identical;
use matgrad_core::{Graph, MatGradError};

fn train_xor<O: Optimizer>(graph: &mut Graph, mlp: &Mlp, optim: &mut O, epochs: usize) -> f64 {
    let (inputs, labels) = common::xor_batch();
    let loss_fn = CrossEntropyLoss::new();
    let mut last = f64::INFINITY;
    for _ in 0..epochs {
        graph.reset();
        let x = graph.input(inputs.clone());
        let logits = mlp.forward(graph, x).unwrap();
        let loss = loss_fn.calculate(graph, logits, &labels).unwrap();
        optim.zero_grad(graph).unwrap();
        graph.backward(loss).unwrap();
        optim.step(graph).unwrap();
        last = graph.item(loss).unwrap();
    }
    last
}

fn predictions(graph: &mut Graph, mlp: &Mlp) -> Vec<usize> {
    let (inputs, _) = common::xor_batch();
    graph.reset();
    let x = graph.input(inputs);
    let logits = mlp.forward(graph, x).unwrap();
    common::argmax_rows(graph.data(logits).unwrap())
}

#[test]
fn nesterov_learns_xor() {
    common::init_logger();
    let mut graph = Graph::new();
    let mut rng = common::seeded_rng(42);
    let mlp = Mlp::new(&mut graph, 2, &[16, 2], &mut rng).unwrap();
    let mut optim = NesterovOptimizer::new(&graph, mlp.parameters(), 0.1, 0.9).unwrap();
    let loss = train_xor(&mut graph, &mlp, &mut optim, 500);
    assert!(loss < 0.2, "final loss {}", loss);
    assert_eq!(predictions(&mut graph, &mlp), common::xor_batch().1);
}

#[test]
fn sgd_reduces_loss() {
    let mut graph = Graph::new();
    let mut rng = common::seeded_rng(7);
    let mlp = Mlp::new(&mut graph, 2, &[16, 2], &mut rng).unwrap();
    let mut optim = SgdOptimizer::new(mlp.parameters(), 0.2);
    let first = train_xor(&mut graph, &mlp, &mut optim, 1);
    let last = train_xor(&mut graph, &mlp, &mut optim, 300);
    assert!(last < first, "loss went from {} to {}", first, last);
}

#[test]
fn trained_weights_survive_a_file_round_trip() {
    let path = std::env::temp_dir().join(format!("matgrad_xor_{}.bin", std::process::id()));

    let mut graph = Graph::new();
    let mut rng = common::seeded_rng(42);
    let mlp = Mlp::new(&mut graph, 2, &[16, 2], &mut rng).unwrap();
    let mut optim = NesterovOptimizer::new(&graph, mlp.parameters(), 0.1, 0.9).unwrap();
    train_xor(&mut graph, &mlp, &mut optim, 50);
    save_weights(&graph, &mlp, &path).unwrap();

    let mut fresh_graph = Graph::new();
    let mut fresh_rng = common::seeded_rng(1234);
    let fresh = Mlp::new(&mut fresh_graph, 2, &[16, 2], &mut fresh_rng).unwrap();
    load_weights(&mut fresh_graph, &fresh, &path).unwrap();
    for (&a, &b) in fresh.parameters().iter().zip(mlp.parameters().iter()) {
        check_matrix_identical(fresh_graph.data(a).unwrap(), graph.data(b).unwrap());
    }
    assert_eq!(predictions(&mut fresh_graph, &fresh), predictions(&mut graph, &mlp));

    let mut wider_graph = Graph::new();
    let wider = Mlp::new(&mut wider_graph, 2, &[8, 2], &mut fresh_rng).unwrap();
    let before: Vec<_> = wider
        .parameters()
        .iter()
        .map(|&p| wider_graph.data(p).unwrap().clone())
        .collect();
    assert!(matches!(
        load_weights(&mut wider_graph, &wider, &path),
        Err(MatGradError::ParameterShapeMismatch { index: 0, .. })
    ));
    for (&p, old) in wider.parameters().iter().zip(before.iter()) {
        check_matrix_identical(wider_graph.data(p).unwrap(), old);
    }
    std::fs::remove_file(&path).unwrap();
}
