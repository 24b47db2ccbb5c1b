use crate::autograd::{BackwardOp, NodeId};
use crate::tensor::{self, Matrix};

/// A single vertex of the computation graph.
///
/// `grad` always has the shape of `data`. It starts at zero, is accumulated by
/// backward passes, and only goes back to zero through `Graph::zero_grad`.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) data: Matrix,
    pub(crate) grad: Matrix,
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) op: BackwardOp,
    pub(crate) label: Option<String>,
}

impl Node {
    pub(crate) fn new(data: Matrix, inputs: Vec<NodeId>, op: BackwardOp) -> Self {
        let (rows, cols) = data.dim();
        Node {
            data,
            grad: tensor::zeros(rows, cols),
            inputs,
            op,
            label: None,
        }
    }

    pub fn data(&self) -> &Matrix {
        &self.data
    }

    pub fn grad(&self) -> &Matrix {
        &self.grad
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn op(&self) -> &BackwardOp {
        &self.op
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// A leaf has no inputs, so backward stops here.
    pub fn is_leaf(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}
