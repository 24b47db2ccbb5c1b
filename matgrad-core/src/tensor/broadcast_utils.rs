use crate::error::MatGradError;
use crate::tensor::{Matrix, Shape};
use ndarray::Axis;

/// Computes the broadcast result shape of two 2-D operands.
///
/// On each axis the sizes must either agree or one of them must be 1, which
/// then stretches to the other size. A `1 x C` row against an `R x C` matrix
/// and a `1 x 1` scalar against anything are the common cases.
///
/// # Errors
/// Returns `MatGradError::BroadcastError` when an axis has two different sizes
/// neither of which is 1.
pub fn broadcast_shapes(a: Shape, b: Shape) -> Result<Shape, MatGradError> {
    let rows = broadcast_axis(a.0, b.0);
    let cols = broadcast_axis(a.1, b.1);
    match (rows, cols) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => Err(MatGradError::BroadcastError {
            shape1: a,
            shape2: b,
        }),
    }
}

fn broadcast_axis(a: usize, b: usize) -> Option<usize> {
    if a == b {
        Some(a)
    } else if a == 1 {
        Some(b)
    } else if b == 1 {
        Some(a)
    } else {
        None
    }
}

/// Sums `grad` back down to `target_rows x target_cols`.
///
/// This is the adjoint of broadcasting: rows are summed when the target has a
/// single row, then columns when it has a single column. Matching shapes pass
/// through unchanged.
///
/// # Errors
/// Returns `MatGradError::ShapeMismatch` if the gradient cannot have been
/// produced by broadcasting an operand of the target shape.
pub fn reduce_to_shape(
    grad: &Matrix,
    target_rows: usize,
    target_cols: usize,
) -> Result<Matrix, MatGradError> {
    let (rows, cols) = grad.dim();
    if (rows, cols) == (target_rows, target_cols) {
        return Ok(grad.clone());
    }

    let mut reduced = if target_rows == 1 && rows != 1 {
        grad.sum_axis(Axis(0)).insert_axis(Axis(0))
    } else {
        grad.clone()
    };
    if target_cols == 1 && cols != 1 {
        reduced = reduced.sum_axis(Axis(1)).insert_axis(Axis(1));
    }

    if reduced.dim() != (target_rows, target_cols) {
        return Err(MatGradError::ShapeMismatch {
            expected: (target_rows, target_cols),
            actual: (rows, cols),
            operation: "reduce_to_shape".to_string(),
        });
    }
    Ok(reduced)
}

#[cfg(test)]
#[path = "broadcast_utils_test.rs"]
mod tests;
