//! Mini-batch iteration over a [`Dataset`].
//!
//! ```
//! # use matgrad_core::{tensor, MatGradError, Matrix};
//! # use matgrad_data::{DataLoader, Dataset};
//! # struct Squares;
//! # impl Dataset for Squares {
//! #     fn get(&self, i: usize) -> Result<(Matrix, usize), MatGradError> {
//! #         Ok((tensor::full(1, 2, (i * i) as f64), i % 2))
//! #     }
//! #     fn len(&self) -> usize { 5 }
//! #     fn features(&self) -> usize { 2 }
//! # }
//! let loader = DataLoader::new(Squares, 2)?.with_scale(1.0);
//! assert_eq!(loader.num_batches(), 3);
//! for batch in loader.iter() {
//!     let (features, labels) = batch?;
//!     assert_eq!(features.nrows(), labels.len());
//! }
//! # Ok::<(), MatGradError>(())
//! ```

use crate::dataset::Dataset;
use crate::samplers::{Sampler, SequentialSampler};
use log::{debug, warn};
use matgrad_core::{tensor, MatGradError, Matrix};

/// Scale applied to raw feature values by default: maps `0..=255` pixels to `[0, 1]`.
pub const DEFAULT_SCALE: f64 = 1.0 / 255.0;

/// A batch: `N x F` features and the `N` matching labels.
pub type Batch = (Matrix, Vec<usize>);

/// Groups samples of a dataset into batches of `batch_size`.
///
/// The final batch of an epoch may be smaller unless `drop_last` is set.
/// Every feature value is multiplied by `scale` while the batch is assembled.
#[derive(Debug)]
pub struct DataLoader<D: Dataset, S: Sampler = SequentialSampler> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
    scale: f64,
}

impl<D: Dataset> DataLoader<D, SequentialSampler> {
    /// Creates a loader that visits the dataset in order.
    pub fn new(dataset: D, batch_size: usize) -> Result<Self, MatGradError> {
        Self::with_sampler(dataset, batch_size, SequentialSampler::new())
    }
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Creates a loader that takes its index order from `sampler`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `batch_size` is zero.
    pub fn with_sampler(dataset: D, batch_size: usize, sampler: S) -> Result<Self, MatGradError> {
        if batch_size == 0 {
            return Err(MatGradError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        if dataset.is_empty() {
            warn!("DataLoader created over an empty dataset");
        }
        Ok(DataLoader {
            dataset,
            batch_size,
            sampler,
            drop_last: false,
            scale: DEFAULT_SCALE,
        })
    }

    pub fn with_drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn drop_last(&self) -> bool {
        self.drop_last
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of batches in one epoch.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            (samples + self.batch_size - 1) / self.batch_size
        }
    }

    /// Returns batch `batch_idx` of the dataset taken in sequential order,
    /// whatever the sampler.
    ///
    /// # Errors
    ///
    /// `InvalidData` if `batch_idx` is not below the sequential batch count.
    pub fn batch(&self, batch_idx: usize) -> Result<Batch, MatGradError> {
        let len = self.dataset.len();
        let out_of_range = || {
            MatGradError::InvalidData(format!(
                "batch {} out of range for {} samples in batches of {}",
                batch_idx, len, self.batch_size
            ))
        };
        let start = batch_idx.saturating_mul(self.batch_size);
        if start >= len {
            return Err(out_of_range());
        }
        let end = (start + self.batch_size).min(len);
        if self.drop_last && end - start < self.batch_size {
            return Err(out_of_range());
        }
        let indices: Vec<usize> = (start..end).collect();
        collate(&self.dataset, &indices, self.scale)
    }

    /// Starts a new epoch, drawing the index order from the sampler.
    pub fn iter(&self) -> Batches<'_, D> {
        debug!(
            "DataLoader epoch: {} samples, {} batches of {}",
            self.dataset.len(),
            self.num_batches(),
            self.batch_size
        );
        Batches {
            dataset: &self.dataset,
            indices: self.sampler.iter(self.dataset.len()),
            batch_size: self.batch_size,
            drop_last: self.drop_last,
            scale: self.scale,
        }
    }
}

impl<'a, D: Dataset, S: Sampler> IntoIterator for &'a DataLoader<D, S> {
    type Item = Result<Batch, MatGradError>;
    type IntoIter = Batches<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One epoch of batches, created by [`DataLoader::iter`].
pub struct Batches<'a, D: Dataset> {
    dataset: &'a D,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
    batch_size: usize,
    drop_last: bool,
    scale: f64,
}

impl<D: Dataset> Iterator for Batches<'_, D> {
    type Item = Result<Batch, MatGradError>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices: Vec<usize> = self.indices.by_ref().take(self.batch_size).collect();
        if indices.is_empty() || (self.drop_last && indices.len() < self.batch_size) {
            return None;
        }
        Some(collate(self.dataset, &indices, self.scale))
    }
}

/// Stacks the samples at `indices` into one scaled feature matrix.
fn collate<D: Dataset>(dataset: &D, indices: &[usize], scale: f64) -> Result<Batch, MatGradError> {
    let features = dataset.features();
    let mut batch = tensor::zeros(indices.len(), features);
    let mut labels = Vec::with_capacity(indices.len());
    for (row, &index) in indices.iter().enumerate() {
        let (sample, label) = dataset.get(index)?;
        if sample.dim() != (1, features) {
            return Err(MatGradError::ShapeMismatch {
                expected: (1, features),
                actual: sample.dim(),
                operation: "collate".to_string(),
            });
        }
        batch.row_mut(row).assign(&sample.row(0));
        labels.push(label);
    }
    batch *= scale;
    Ok((batch, labels))
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
