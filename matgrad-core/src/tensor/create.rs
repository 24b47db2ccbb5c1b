use crate::error::MatGradError;
use crate::tensor::{Matrix, Shape};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Creates a `rows x cols` matrix filled with zeros.
pub fn zeros(rows: usize, cols: usize) -> Matrix {
    Matrix::zeros((rows, cols))
}

/// Creates a `rows x cols` matrix filled with ones.
pub fn ones(rows: usize, cols: usize) -> Matrix {
    Matrix::ones((rows, cols))
}

/// Creates a `rows x cols` matrix filled with `value`.
pub fn full(rows: usize, cols: usize, value: f64) -> Matrix {
    Matrix::from_elem((rows, cols), value)
}

/// Creates a 1x1 matrix holding `value`.
pub fn scalar(value: f64) -> Matrix {
    full(1, 1, value)
}

/// Creates a matrix from row-major data.
///
/// # Errors
/// Returns `MatGradError::TensorCreationError` if `data.len() != rows * cols`.
pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Matrix, MatGradError> {
    let data_len = data.len();
    if data_len != rows * cols {
        return Err(MatGradError::TensorCreationError {
            data_len,
            shape: (rows, cols),
        });
    }
    Matrix::from_shape_vec((rows, cols), data).map_err(|_| MatGradError::TensorCreationError {
        data_len,
        shape: (rows, cols),
    })
}

/// Draws a `rows x cols` matrix from a normal distribution with mean 0 and
/// standard deviation `std`.
///
/// # Errors
/// Returns `MatGradError::InvalidConfig` if `std` is negative or not finite.
pub fn randn<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    std: f64,
    rng: &mut R,
) -> Result<Matrix, MatGradError> {
    if !std.is_finite() || std < 0.0 {
        return Err(MatGradError::InvalidConfig(format!(
            "standard deviation must be finite and non-negative, got {}",
            std
        )));
    }
    let normal = Normal::new(0.0, std)
        .map_err(|e| MatGradError::InvalidConfig(format!("invalid standard deviation {}: {}", std, e)))?;
    let shape: Shape = (rows, cols);
    Ok(Matrix::from_shape_fn(shape, |_| normal.sample(rng)))
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
