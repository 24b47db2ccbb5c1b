use crate::autograd::grad_check::check_grad;
use crate::autograd::Graph;
use crate::error::MatGradError;
use crate::tensor::{from_vec, ones};
use crate::utils::testing::check_matrix_near;

#[test]
fn test_sub_forward_backward() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![5.0, 7.0, 9.0, 11.0], 2, 2).unwrap());
    let b = graph.input(from_vec(vec![1.0, 2.0], 1, 2).unwrap());
    let c = graph.sub(a, b).unwrap();
    check_matrix_near(graph.data(c).unwrap(), (2, 2), &[4.0, 5.0, 8.0, 9.0], 1e-12);
    graph.backward(c).unwrap();
    check_matrix_near(graph.grad(a).unwrap(), (2, 2), &[1.0; 4], 1e-12);
    check_matrix_near(graph.grad(b).unwrap(), (1, 2), &[-2.0, -2.0], 1e-12);
}

#[test]
fn test_sub_shape_mismatch() {
    let mut graph = Graph::new();
    let a = graph.input(ones(2, 2));
    let b = graph.input(ones(3, 3));
    assert!(matches!(graph.sub(a, b), Err(MatGradError::BroadcastError { .. })));
}

#[test]
fn test_sub_grad_check() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![0.1, 0.2, 0.3], 3, 1).unwrap());
    let b = graph.input(from_vec(vec![1.0, -1.0, 0.5], 3, 1).unwrap());
    check_grad(&mut graph, &[a, b], |g, x| g.sub(x[0], x[1]), 1e-6, 1e-6).unwrap();
}
