// matgrad-core/src/ops/arithmetic/sub.rs

use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::arithmetic::{add_op, mul_scalar_op};

/// `a - b` with broadcasting, built as `a + (b * -1)`.
pub fn sub_op(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, MatGradError> {
    graph.validate(a)?;
    let negated = mul_scalar_op(graph, b, -1.0)?;
    add_op(graph, a, negated)
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
