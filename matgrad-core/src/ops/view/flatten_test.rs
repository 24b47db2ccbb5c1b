use crate::autograd::grad_check::check_grad;
use crate::autograd::{BackwardOp, Graph};
use crate::tensor::{from_vec, Matrix};
use crate::utils::testing::check_matrix_near;
use ndarray::ShapeBuilder;

#[test]
fn test_flatten_is_row_major() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap());
    let f = graph.flatten(a).unwrap();
    check_matrix_near(
        graph.data(f).unwrap(),
        (1, 6),
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        1e-12,
    );
    assert_eq!(graph.op(f).unwrap(), &BackwardOp::Flatten { rows: 2, cols: 3 });
}

#[test]
fn test_flatten_ignores_memory_layout() {
    // column-major storage of the same logical matrix
    let fortran =
        Matrix::from_shape_vec((2, 3).f(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]).unwrap();
    let mut graph = Graph::new();
    let a = graph.input(fortran);
    let f = graph.flatten(a).unwrap();
    check_matrix_near(
        graph.data(f).unwrap(),
        (1, 6),
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        1e-12,
    );
}

#[test]
fn test_flatten_backward_restores_shape() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap());
    let f = graph.flatten(a).unwrap();
    let w = graph.input(from_vec(vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0], 1, 6).unwrap());
    let y = graph.mul(f, w).unwrap();
    graph.backward(y).unwrap();
    check_matrix_near(
        graph.grad(a).unwrap(),
        (3, 2),
        &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
        1e-12,
    );
}

#[test]
fn test_flatten_of_vector_is_identity() {
    let mut graph = Graph::new();
    let row = graph.input(from_vec(vec![1.0, 2.0, 3.0], 1, 3).unwrap());
    let col = graph.input(from_vec(vec![1.0, 2.0, 3.0], 3, 1).unwrap());
    let before = graph.len();
    assert_eq!(graph.flatten(row).unwrap(), row);
    assert_eq!(graph.flatten(col).unwrap(), col);
    assert_eq!(graph.len(), before);
}

#[test]
fn test_flatten_grad_check() {
    let mut graph = Graph::new();
    let a = graph.input(from_vec(vec![0.3, -1.2, 2.0, 0.7], 2, 2).unwrap());
    let w = graph.input(from_vec(vec![1.0, -2.0, 3.0, -4.0], 1, 4).unwrap());
    check_grad(
        &mut graph,
        &[a, w],
        |g, x| {
            let f = g.flatten(x[0])?;
            g.mul(f, x[1])
        },
        1e-6,
        1e-6,
    )
    .unwrap();
}
