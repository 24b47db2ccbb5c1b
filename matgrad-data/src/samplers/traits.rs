use std::fmt::Debug;

/// Decides the order in which a `DataLoader` visits a dataset.
pub trait Sampler: Debug + Send + Sync {
    /// Returns one epoch worth of indices into a dataset of `dataset_len` samples.
    ///
    /// Each call starts a new epoch; a random sampler yields a fresh order.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices `iter` yields for a dataset of `dataset_len` samples.
    fn len(&self, dataset_len: usize) -> usize;
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        (**self).iter(dataset_len)
    }

    fn len(&self, dataset_len: usize) -> usize {
        (**self).len(dataset_len)
    }
}
