use crate::autograd::grad_check::check_grad;
use crate::autograd::{BackwardOp, Graph};
use crate::tensor::{from_vec, scalar};
use crate::utils::testing::check_matrix_near;
use approx::assert_relative_eq;

#[test]
fn test_sigmoid_forward_caches_output() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![0.0, 2.0], 1, 2).unwrap());
    let s = graph.sigmoid(a).unwrap();
    let expected = 1.0 / (1.0 + (-2.0f64).exp());
    check_matrix_near(graph.data(s).unwrap(), (1, 2), &[0.5, expected], 1e-12);
    match graph.op(s).unwrap() {
        BackwardOp::Sigmoid { output } => assert_eq!(output, graph.data(s).unwrap()),
        other => panic!("expected sigmoid record, got {:?}", other),
    }
}

#[test]
fn test_sigmoid_backward_at_zero() {
    let mut graph = Graph::new();
    let a = graph.input(scalar(0.0));
    let s = graph.sigmoid(a).unwrap();
    graph.backward(s).unwrap();
    assert_relative_eq!(graph.grad(a).unwrap()[[0, 0]], 0.25);
}

#[test]
fn test_sigmoid_saturates_without_nan() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![-800.0, 800.0], 1, 2).unwrap());
    let s = graph.sigmoid(a).unwrap();
    graph.backward(s).unwrap();
    check_matrix_near(graph.data(s).unwrap(), (1, 2), &[0.0, 1.0], 1e-12);
    assert!(graph.grad(a).unwrap().iter().all(|g| g.is_finite()));
}

#[test]
fn test_sigmoid_grad_check() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![-2.0, -0.5, 0.0, 0.5, 1.0, 3.0], 3, 2).unwrap());
    check_grad(&mut graph, &[a], |g, x| g.sigmoid(x[0]), 1e-6, 1e-6).unwrap();
}
