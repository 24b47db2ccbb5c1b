use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Visits every index once per epoch, in a shuffled order.
///
/// The order of epoch `k` is drawn from a `StdRng` seeded with `seed + k`, so
/// a run is reproducible from its seed while each epoch still differs.
#[derive(Debug)]
pub struct RandomSampler {
    seed: u64,
    epoch: AtomicU64,
}

impl RandomSampler {
    pub fn new(seed: u64) -> Self {
        RandomSampler {
            seed,
            epoch: AtomicU64::new(0),
        }
    }

    /// Seeds the sampler from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of epochs drawn so far.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Relaxed)
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        let epoch = self.epoch.fetch_add(1, Ordering::Relaxed);
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(epoch));
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(&mut rng);
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
