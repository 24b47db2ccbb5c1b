// matgrad-core/src/ops/arithmetic/neg.rs

use crate::autograd::{Graph, NodeId};
use crate::error::MatGradError;
use crate::ops::arithmetic::mul_scalar_op;

/// `-a`, as `a * -1`.
pub fn neg_op(graph: &mut Graph, a: NodeId) -> Result<NodeId, MatGradError> {
    mul_scalar_op(graph, a, -1.0)
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
