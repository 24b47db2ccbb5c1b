use super::*;
use crate::tensor::{from_vec, scalar, zeros};
use crate::utils::testing::check_matrix_near;
use approx::assert_relative_eq;

#[test]
fn test_sgd_step_descends_gradient() {
    let mut graph = Graph::new();
    let w = graph.parameter(from_vec(vec![1.0, -2.0], 1, 2).unwrap());
    let y = graph.pow(w, 2.0).unwrap();
    graph.backward(y).unwrap();

    let mut optim = SgdOptimizer::new(vec![w], 0.1);
    optim.step(&mut graph).unwrap();
    // w - 0.1 * 2w
    check_matrix_near(graph.data(w).unwrap(), (1, 2), &[0.8, -1.6], 1e-12);
}

#[test]
fn test_sgd_zero_gradient_is_idempotent() {
    let mut graph = Graph::new();
    let w = graph.parameter(from_vec(vec![0.5, 1.5, -3.0], 3, 1).unwrap());
    let before = graph.data(w).unwrap().clone();
    let mut optim = SgdOptimizer::new(vec![w], 0.5);
    for _ in 0..3 {
        optim.step(&mut graph).unwrap();
    }
    assert_eq!(graph.data(w).unwrap(), &before);
}

#[test]
fn test_sgd_zero_grad_and_learning_rate() {
    let mut graph = Graph::new();
    let w = graph.parameter(scalar(3.0));
    let y = graph.mul_scalar(w, 2.0).unwrap();
    graph.backward(y).unwrap();

    let mut optim = SgdOptimizer::new(vec![w], 0.1);
    assert_relative_eq!(optim.learning_rate(), 0.1);
    optim.set_learning_rate(0.25);
    optim.step(&mut graph).unwrap();
    assert_relative_eq!(graph.item(w).unwrap(), 2.5);

    optim.zero_grad(&mut graph).unwrap();
    assert_eq!(graph.grad(w).unwrap(), &zeros(1, 1));
    assert_eq!(optim.parameters(), &[w]);
}

#[test]
fn test_sgd_rejects_foreign_parameter_before_updating() {
    let mut graph = Graph::new();
    let mut other = Graph::new();
    let w = graph.parameter(scalar(1.0));
    let foreign = other.parameter(scalar(1.0));
    let y = graph.mul_scalar(w, 2.0).unwrap();
    graph.backward(y).unwrap();

    let mut optim = SgdOptimizer::new(vec![w, foreign], 0.1);
    assert!(matches!(
        optim.step(&mut graph),
        Err(MatGradError::ForeignNode { .. })
    ));
    assert_relative_eq!(graph.item(w).unwrap(), 1.0);
}
