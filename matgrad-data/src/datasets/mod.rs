pub mod mnist;

pub use crate::dataset::Dataset;
pub use mnist::{Mnist, Split};
