//! # Reverse-mode automatic differentiation
//!
//! A [`Graph`] is an arena that owns every node of a computation. Callers hold
//! [`NodeId`] handles, which are cheap to copy and validated on every access.
//!
//! The arena has two regions:
//! - the **parameter region**, for persistent nodes created with
//!   [`Graph::parameter`] that survive [`Graph::reset`];
//! - the **tape region**, for inputs, constants and operator results. Each
//!   `reset` clears it and starts a new epoch, so handles into an old tape are
//!   rejected with `StaleNode`.
//!
//! Operators (see [`crate::ops`]) push result nodes tagged with a
//! [`BackwardOp`] record. [`Graph::backward`] topologically sorts the ancestors
//! of a terminal node and replays those records in reverse.

pub mod backward_op;
pub mod grad_check;
pub mod graph;
pub mod node;

pub use backward_op::BackwardOp;
pub use graph::{Graph, NodeId};
pub use node::Node;
