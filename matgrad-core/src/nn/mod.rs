// src/nn/mod.rs

//! Neural-network building blocks on top of the autodiff graph.
//!
//! Modules own no tensors: they hold [`NodeId`](crate::autograd::NodeId)
//! handles to parameters registered in a [`Graph`](crate::autograd::Graph) and
//! build their forward pass as graph operations.

pub mod init;
pub mod layers;
pub mod losses;
pub mod mlp;
pub mod module;
pub mod serialization;

pub use layers::linear::Linear;
pub use losses::{CrossEntropyLoss, MSELoss};
pub use mlp::Mlp;
pub use module::Module;
