//! MNIST in the IDX file format.
//!
//! Both files start with a big-endian `u32` magic number followed by `u32`
//! dimensions:
//!
//! ```text
//! images: 2051, count, rows, cols, then count * rows * cols u8 pixels
//! labels: 2049, count, then count u8 labels
//! ```
//!
//! Pixels are kept as raw `0..=255` values; scaling happens when batches are
//! assembled by the [`DataLoader`](crate::DataLoader).

use crate::dataset::Dataset;
use log::{info, warn};
use matgrad_core::{tensor, MatGradError, Matrix};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const IMAGES_MAGIC: u32 = 2051;
pub const LABELS_MAGIC: u32 = 2049;

/// Number of digit classes.
pub const CLASSES: usize = 10;

/// The two standard MNIST splits and their canonical file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn images_file(&self) -> &'static str {
        match self {
            Split::Train => "train-images-idx3-ubyte",
            Split::Test => "t10k-images-idx3-ubyte",
        }
    }

    pub fn labels_file(&self) -> &'static str {
        match self {
            Split::Train => "train-labels-idx1-ubyte",
            Split::Test => "t10k-labels-idx1-ubyte",
        }
    }
}

/// An MNIST split held in memory.
#[derive(Debug, Clone)]
pub struct Mnist {
    pixels: Vec<u8>,
    labels: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl Mnist {
    /// Parses an images stream and a labels stream.
    ///
    /// # Errors
    ///
    /// - `InvalidData` for a wrong magic number or when the two files disagree
    ///   on the number of samples.
    /// - `Io` when either stream is truncated or unreadable.
    pub fn from_readers<I: Read, L: Read>(mut images: I, mut labels: L) -> Result<Self, MatGradError> {
        let magic = read_u32(&mut images)?;
        if magic != IMAGES_MAGIC {
            return Err(MatGradError::InvalidData(format!(
                "bad images magic number {}, expected {}",
                magic, IMAGES_MAGIC
            )));
        }
        let count = read_u32(&mut images)? as usize;
        let rows = read_u32(&mut images)? as usize;
        let cols = read_u32(&mut images)? as usize;

        let magic = read_u32(&mut labels)?;
        if magic != LABELS_MAGIC {
            return Err(MatGradError::InvalidData(format!(
                "bad labels magic number {}, expected {}",
                magic, LABELS_MAGIC
            )));
        }
        let label_count = read_u32(&mut labels)? as usize;
        if label_count != count {
            return Err(MatGradError::InvalidData(format!(
                "{} images but {} labels",
                count, label_count
            )));
        }

        let total = count
            .checked_mul(rows)
            .and_then(|n| n.checked_mul(cols))
            .ok_or_else(|| {
                MatGradError::InvalidData(format!("{} x {} x {} pixels overflow", count, rows, cols))
            })?;
        let pixels = read_payload(&mut images, total, "pixel")?;
        let label_bytes = read_payload(&mut labels, count, "label")?;

        if count == 0 {
            warn!("MNIST stream holds no samples");
        }

        Ok(Mnist {
            pixels,
            labels: label_bytes,
            rows,
            cols,
        })
    }

    /// Reads an images file and a labels file from disk.
    pub fn load<P, Q>(images_path: P, labels_path: Q) -> Result<Self, MatGradError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let images_path = images_path.as_ref();
        let labels_path = labels_path.as_ref();
        let images = BufReader::new(File::open(images_path).map_err(|e| {
            MatGradError::Io(format!("{}: {}", images_path.display(), e))
        })?);
        let labels = BufReader::new(File::open(labels_path).map_err(|e| {
            MatGradError::Io(format!("{}: {}", labels_path.display(), e))
        })?);
        let dataset = Self::from_readers(images, labels)?;
        info!(
            "Loaded {} MNIST images ({}x{}) from {}",
            dataset.len(),
            dataset.rows,
            dataset.cols,
            images_path.display()
        );
        Ok(dataset)
    }

    /// Loads a split from `dir` using the canonical MNIST file names.
    pub fn load_split<P: AsRef<Path>>(dir: P, split: Split) -> Result<Self, MatGradError> {
        let dir = dir.as_ref();
        Self::load(dir.join(split.images_file()), dir.join(split.labels_file()))
    }

    /// `(rows, cols)` of a single image.
    pub fn image_shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Raw label of sample `index`.
    pub fn label(&self, index: usize) -> Option<usize> {
        self.labels.get(index).map(|&l| l as usize)
    }
}

impl Dataset for Mnist {
    fn get(&self, index: usize) -> Result<(Matrix, usize), MatGradError> {
        let label = self.label(index).ok_or_else(|| {
            MatGradError::InvalidData(format!(
                "sample index {} out of bounds for {} samples",
                index,
                self.len()
            ))
        })?;
        let features = self.features();
        let start = index * features;
        let row = self.pixels[start..start + features]
            .iter()
            .map(|&p| f64::from(p))
            .collect();
        Ok((tensor::from_vec(row, 1, features)?, label))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }

    fn features(&self) -> usize {
        self.rows * self.cols
    }
}

/// Reads exactly `len` bytes. The buffer grows with the data actually read,
/// not with the size the header announces.
fn read_payload<R: Read>(reader: &mut R, len: usize, what: &str) -> Result<Vec<u8>, MatGradError> {
    let mut bytes = Vec::new();
    let read = reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if read != len {
        return Err(MatGradError::Io(format!(
            "truncated IDX stream: header announces {} {} bytes, found {}",
            len, what, read
        )));
    }
    Ok(bytes)
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, MatGradError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

#[cfg(test)]
#[path = "mnist_test.rs"]
mod tests;
