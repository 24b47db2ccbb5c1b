//! Shape-changing operators.

pub mod flatten;

pub use flatten::flatten_op;
