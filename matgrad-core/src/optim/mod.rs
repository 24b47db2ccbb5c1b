//! Gradient-based parameter updates.
//!
//! Optimizers capture parameter handles at construction and, on each
//! [`Optimizer::step`], read the accumulated gradients from the graph and
//! update the values in place.

pub mod nesterov;
pub mod optimizer_trait;
pub mod sgd;

pub use nesterov::NesterovOptimizer;
pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;
