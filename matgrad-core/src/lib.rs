//! # matgrad-core
//!
//! A small reverse-mode automatic differentiation engine over dense 2-D `f64`
//! matrices, with just enough neural-network machinery on top to train a
//! multi-layer perceptron.
//!
//! - [`autograd`]: the [`Graph`] arena, [`NodeId`] handles and the backward driver.
//! - [`ops`]: differentiable operators, also available as `Graph` methods.
//! - [`nn`]: the [`nn::Module`] trait, layers, loss wrappers and weight files.
//! - [`optim`]: SGD and Nesterov-momentum optimizers.
//! - [`tensor`]: matrix creation and broadcasting helpers.
//!
//! ```
//! use matgrad_core::{tensor, Graph};
//!
//! let mut graph = Graph::new();
//! let a = graph.input(tensor::scalar(2.0));
//! let b = graph.input(tensor::scalar(3.0));
//! let ab = graph.mul(a, b)?;
//! let a2 = graph.pow(a, 2.0)?;
//! let c = graph.add(ab, a2)?;
//! graph.backward(c)?;
//! assert_eq!(graph.grad(a)?[[0, 0]], 7.0);
//! assert_eq!(graph.grad(b)?[[0, 0]], 2.0);
//! # Ok::<(), matgrad_core::MatGradError>(())
//! ```

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod utils;

pub use autograd::{BackwardOp, Graph, NodeId};
pub use error::MatGradError;
pub use tensor::Matrix;
