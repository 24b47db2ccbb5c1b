use crate::error::MatGradError;
use crate::tensor::{self, Matrix};
use rand::Rng;

/// He (Kaiming) normal initialisation for a `fan_in x fan_out` weight.
///
/// Draws from `N(0, sqrt(2 / fan_in))`, suited to layers followed by ReLU.
pub fn he_normal<R: Rng + ?Sized>(fan_in: usize, fan_out: usize, rng: &mut R) -> Result<Matrix, MatGradError> {
    if fan_in == 0 {
        return Err(MatGradError::InvalidConfig(
            "he_normal requires a non-zero fan-in".to_string(),
        ));
    }
    let std = (2.0 / fan_in as f64).sqrt();
    tensor::randn(fan_in, fan_out, std, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
