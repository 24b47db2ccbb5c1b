use crate::autograd::grad_check::check_grad;
use crate::autograd::Graph;
use crate::tensor::from_vec;
use crate::utils::testing::check_matrix_near;

#[test]
fn test_transpose_forward() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap());
    let t = graph.transpose(a).unwrap();
    check_matrix_near(
        graph.data(t).unwrap(),
        (3, 2),
        &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0],
        1e-12,
    );
    assert!(graph.data(t).unwrap().is_standard_layout());
}

#[test]
fn test_transpose_backward_through_product() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap());
    let weights = graph.input(from_vec(vec![1.0, 10.0, 100.0, 1000.0, 1e4, 1e5], 3, 2).unwrap());
    let t = graph.transpose(a).unwrap();
    let y = graph.mul(t, weights).unwrap();
    graph.backward(y).unwrap();
    check_matrix_near(
        graph.grad(a).unwrap(),
        (2, 3),
        &[1.0, 100.0, 1e4, 10.0, 1000.0, 1e5],
        1e-9,
    );
}

#[test]
fn test_transpose_grad_check() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![0.3, -1.2, 2.0, 0.7, 1.1, -0.4], 3, 2).unwrap());
    let w = graph.input(from_vec(vec![1.0, 2.0, 3.0], 1, 3).unwrap());
    check_grad(
        &mut graph,
        &[a, w],
        |g, x| {
            let t = g.transpose(x[0])?;
            g.mul(t, x[1])
        },
        1e-6,
        1e-6,
    )
    .unwrap();
}
