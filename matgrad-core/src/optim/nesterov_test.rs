use super::*;
use crate::tensor::{from_vec, scalar, zeros};
use approx::assert_relative_eq;

#[test]
fn test_nesterov_velocities_start_at_zero() {
    let mut graph = Graph::new();
    let w = graph.parameter(zeros(3, 2));
    let b = graph.parameter(zeros(1, 2));
    let optim = NesterovOptimizer::new(&graph, vec![w, b], 0.1, 0.9).unwrap();
    assert_eq!(optim.velocities().len(), 2);
    assert_eq!(optim.velocities()[0], zeros(3, 2));
    assert_eq!(optim.velocities()[1], zeros(1, 2));
    assert_relative_eq!(optim.momentum(), 0.9);
}

#[test]
fn test_nesterov_update_rule() {
    let (lr, mu) = (0.1, 0.9);
    let mut graph = Graph::new();
    let w = graph.parameter(scalar(1.0));
    let mut optim = NesterovOptimizer::new(&graph, vec![w], lr, mu).unwrap();

    // constant gradient of 2
    let y = graph.mul_scalar(w, 2.0).unwrap();
    graph.backward(y).unwrap();

    optim.step(&mut graph).unwrap();
    // v1 = -0.2, data = 1 + 1.9 * -0.2
    assert_relative_eq!(optim.velocities()[0][[0, 0]], -0.2, epsilon = 1e-12);
    assert_relative_eq!(graph.item(w).unwrap(), 1.0 - 0.38, epsilon = 1e-12);

    optim.step(&mut graph).unwrap();
    // v2 = 0.9 * -0.2 - 0.2 = -0.38, data += -0.9 * -0.2 + 1.9 * -0.38
    assert_relative_eq!(optim.velocities()[0][[0, 0]], -0.38, epsilon = 1e-12);
    assert_relative_eq!(
        graph.item(w).unwrap(),
        0.62 + 0.18 - 0.722,
        epsilon = 1e-12
    );
}

#[test]
fn test_nesterov_zero_gradient_with_zero_velocity_is_idempotent() {
    let mut graph = Graph::new();
    let w = graph.parameter(from_vec(vec![0.5, -1.5], 1, 2).unwrap());
    let before = graph.data(w).unwrap().clone();
    let mut optim = NesterovOptimizer::new(&graph, vec![w], 0.1, 0.9).unwrap();
    optim.step(&mut graph).unwrap();
    assert_eq!(graph.data(w).unwrap(), &before);
    assert_eq!(optim.velocities()[0], zeros(1, 2));
}

#[test]
fn test_nesterov_zero_gradient_decays_existing_velocity() {
    let mut graph = Graph::new();
    let w = graph.parameter(scalar(1.0));
    let mut optim = NesterovOptimizer::new(&graph, vec![w], 0.1, 0.5).unwrap();
    let y = graph.mul_scalar(w, 1.0).unwrap();
    graph.backward(y).unwrap();
    optim.step(&mut graph).unwrap();
    let v1 = optim.velocities()[0][[0, 0]];
    let after_first = graph.item(w).unwrap();

    optim.zero_grad(&mut graph).unwrap();
    optim.step(&mut graph).unwrap();
    let v2 = optim.velocities()[0][[0, 0]];
    assert_relative_eq!(v2, 0.5 * v1, epsilon = 1e-12);
    assert!(v2.abs() < v1.abs());
    // momentum keeps moving the parameter
    assert_relative_eq!(graph.item(w).unwrap(), after_first + 0.25 * v1, epsilon = 1e-12);
}

#[test]
fn test_nesterov_rejects_foreign_parameter() {
    let graph = Graph::new();
    let mut other = Graph::new();
    let foreign = other.parameter(scalar(1.0));
    assert!(matches!(
        NesterovOptimizer::new(&graph, vec![foreign], 0.1, 0.9),
        Err(MatGradError::ForeignNode { .. })
    ));
}
