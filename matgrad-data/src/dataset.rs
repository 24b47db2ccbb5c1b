use matgrad_core::{MatGradError, Matrix};

/// Indexed collection of labelled samples.
///
/// Every sample is a `1 x features()` row paired with its class label.
pub trait Dataset {
    /// Returns the sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns `MatGradError::InvalidData` if `index` is out of bounds.
    fn get(&self, index: usize) -> Result<(Matrix, usize), MatGradError>;

    /// Total number of samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of a sample row.
    fn features(&self) -> usize;
}
