//! Datasets and mini-batching for `matgrad`.
//!
//! A [`Dataset`] hands out single samples as `1 x F` feature rows with an
//! integer class label. A [`DataLoader`] stacks them into `N x F` batches in
//! the order chosen by a [`Sampler`](samplers::Sampler).

pub mod dataloader;
pub mod dataset;
pub mod datasets;
pub mod samplers;

pub use dataloader::DataLoader;
pub use dataset::Dataset;
pub use datasets::Mnist;
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
