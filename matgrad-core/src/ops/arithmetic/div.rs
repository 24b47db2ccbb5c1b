// matgrad-core/src/ops/arithmetic/div.rs

use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::arithmetic::{mul_op, pow_op};

/// `a / b` with broadcasting, built as `a ⊙ b^-1`.
///
/// Zero elements in `b` produce infinities or NaN; they are not trapped.
pub fn div_op(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
    graph.validate(a)?;
    let reciprocal = pow_op(graph, b, -1.0)?;
    mul_op(graph, a, reciprocal)
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
