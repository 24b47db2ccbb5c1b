use matgrad_core::tensor::{self, Matrix};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Shared by several integration test crates; not every crate uses every helper.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The four XOR points and their class labels.
#[allow(dead_code)]
pub fn xor_batch() -> (Matrix, Vec<usize>) {
    let inputs = tensor::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0], 4, 2)
        .expect("xor inputs");
    (inputs, vec![0, 1, 1, 0])
}

#[allow(dead_code)]
pub fn argmax_rows(m: &Matrix) -> Vec<usize> {
    m.rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |(best, max), (i, &v)| {
                    if v > max {
                        (i, v)
                    } else {
                        (best, max)
                    }
                })
                .0
        })
        .collect()
}
