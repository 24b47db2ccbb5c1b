//! Parameter-free loss modules wrapping the fused loss nodes.

pub mod cross_entropy;
pub mod mse;

pub use cross_entropy::CrossEntropyLoss;
pub use mse::MSELoss;
