use crate::tensor::{Matrix, Shape};

/// Checks that `actual` has `expected_shape` and that its elements, read in
/// row-major order, are within `tolerance` of `expected_data`.
///
/// Panics with the first offending index otherwise.
pub fn check_matrix_near(actual: &Matrix, expected_shape: Shape, expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.dim(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance || diff.is_nan() {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Asserts two matrices are bit-for-bit identical, shape included.
pub fn check_matrix_identical(actual: &Matrix, expected: &Matrix) {
    assert_eq!(actual.dim(), expected.dim(), "Shape mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(a.to_bits(), e.to_bits(), "Bit mismatch at index {}: {} vs {}", i, a, e);
    }
}
