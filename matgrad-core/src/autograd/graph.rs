use crate::autograd::{BackwardOp, Node};
use crate::error::MatGradError;
use crate::tensor::{self, Matrix};
use log::debug;
use ndarray::{ArrayView2, ArrayViewMut2};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Parameter(usize),
    Tape { index: usize, epoch: u64 },
}

/// Handle to a node owned by a [`Graph`].
///
/// Handles are plain values: copying one never copies the node, and two
/// handles compare equal exactly when they address the same node. A handle
/// remembers which graph issued it and, for tape nodes, which epoch, so that
/// misuse is reported instead of silently reading the wrong node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    graph: u64,
    slot: Slot,
}

impl NodeId {
    /// True for persistent nodes created with [`Graph::parameter`].
    pub fn is_parameter(&self) -> bool {
        matches!(self.slot, Slot::Parameter(_))
    }

    /// Id of the graph that issued this handle.
    pub fn graph_id(&self) -> u64 {
        self.graph
    }
}

/// Arena owning the nodes of a computation.
///
/// Parameters persist for the life of the graph. Everything else lives on the
/// tape, which [`Graph::reset`] clears between forward passes.
#[derive(Debug)]
pub struct Graph {
    id: u64,
    epoch: u64,
    parameters: Vec<Node>,
    tape: Vec<Node>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            epoch: 0,
            parameters: Vec::new(),
            tape: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current tape epoch. Incremented by every [`Graph::reset`].
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // --- Node creation ---

    /// Adds a transient leaf holding `data`.
    pub fn input(&mut self, data: Matrix) -> NodeId {
        self.push(data, Vec::new(), BackwardOp::Leaf)
    }

    /// Adds a transient leaf for a fixed value.
    ///
    /// Identical to [`Graph::input`]; its gradient is still accumulated but
    /// nobody is expected to read it.
    pub fn constant(&mut self, data: Matrix) -> NodeId {
        self.push(data, Vec::new(), BackwardOp::Leaf)
    }

    /// Adds a persistent leaf that survives [`Graph::reset`].
    pub fn parameter(&mut self, data: Matrix) -> NodeId {
        let index = self.parameters.len();
        debug!(
            "graph {}: parameter #{} with shape {:?}",
            self.id,
            index,
            data.dim()
        );
        self.parameters
            .push(Node::new(data, Vec::new(), BackwardOp::Leaf));
        NodeId {
            graph: self.id,
            slot: Slot::Parameter(index),
        }
    }

    /// Pushes an operator result onto the tape.
    ///
    /// Callers have already validated `inputs` against this graph.
    pub(crate) fn push(&mut self, data: Matrix, inputs: Vec<NodeId>, op: BackwardOp) -> NodeId {
        let index = self.tape.len();
        self.tape.push(Node::new(data, inputs, op));
        NodeId {
            graph: self.id,
            slot: Slot::Tape {
                index,
                epoch: self.epoch,
            },
        }
    }

    // --- Lookup ---

    /// Resolves a handle, rejecting foreign, stale and out-of-range handles.
    pub fn node(&self, id: NodeId) -> Result<&Node, MatGradError> {
        self.check_owner(id)?;
        match id.slot {
            Slot::Parameter(index) => {
                self.parameters
                    .get(index)
                    .ok_or(MatGradError::UnknownNode {
                        index,
                        len: self.parameters.len(),
                    })
            }
            Slot::Tape { index, epoch } => {
                self.check_epoch(epoch)?;
                self.tape.get(index).ok_or(MatGradError::UnknownNode {
                    index,
                    len: self.tape.len(),
                })
            }
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, MatGradError> {
        self.check_owner(id)?;
        match id.slot {
            Slot::Parameter(index) => {
                let len = self.parameters.len();
                self.parameters
                    .get_mut(index)
                    .ok_or(MatGradError::UnknownNode { index, len })
            }
            Slot::Tape { index, epoch } => {
                self.check_epoch(epoch)?;
                let len = self.tape.len();
                self.tape
                    .get_mut(index)
                    .ok_or(MatGradError::UnknownNode { index, len })
            }
        }
    }

    fn check_owner(&self, id: NodeId) -> Result<(), MatGradError> {
        if id.graph != self.id {
            return Err(MatGradError::ForeignNode {
                node_graph: id.graph,
                graph: self.id,
            });
        }
        Ok(())
    }

    fn check_epoch(&self, epoch: u64) -> Result<(), MatGradError> {
        if epoch != self.epoch {
            return Err(MatGradError::StaleNode {
                node_epoch: epoch,
                current_epoch: self.epoch,
            });
        }
        Ok(())
    }

    /// Checks that `id` addresses a live node of this graph.
    pub fn validate(&self, id: NodeId) -> Result<(), MatGradError> {
        self.node(id).map(|_| ())
    }

    // --- Accessors ---

    pub fn data(&self, id: NodeId) -> Result<&Matrix, MatGradError> {
        Ok(&self.node(id)?.data)
    }

    pub fn grad(&self, id: NodeId) -> Result<&Matrix, MatGradError> {
        Ok(&self.node(id)?.grad)
    }

    pub fn shape(&self, id: NodeId) -> Result<(usize, usize), MatGradError> {
        Ok(self.node(id)?.data.dim())
    }

    pub fn inputs(&self, id: NodeId) -> Result<&[NodeId], MatGradError> {
        Ok(&self.node(id)?.inputs)
    }

    pub fn op(&self, id: NodeId) -> Result<&BackwardOp, MatGradError> {
        Ok(&self.node(id)?.op)
    }

    pub fn label(&self, id: NodeId) -> Result<Option<&str>, MatGradError> {
        Ok(self.node(id)?.label.as_deref())
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<(), MatGradError> {
        self.node_mut(id)?.label = Some(label.into());
        Ok(())
    }

    /// Mutable access to a node's value.
    ///
    /// Crate-internal: callers must not change the shape. Outside the crate,
    /// use [`Graph::update_data`] or [`Graph::set_data`].
    pub(crate) fn data_mut(&mut self, id: NodeId) -> Result<&mut Matrix, MatGradError> {
        Ok(&mut self.node_mut(id)?.data)
    }

    /// Runs `update` on a view of a node's value alongside its gradient.
    ///
    /// This is the in-place hook optimizers use. The value is handed out as a
    /// view, so its shape stays equal to the gradient's.
    ///
    /// ```
    /// use matgrad_core::{tensor, Graph};
    ///
    /// let mut graph = Graph::new();
    /// let w = graph.parameter(tensor::full(2, 2, 1.0));
    /// graph.update_data(w, |mut data, grad| data.scaled_add(-0.5, &grad))?;
    /// graph.update_data(w, |mut data, _| data.mapv_inplace(|v| v * 3.0))?;
    /// assert_eq!(graph.data(w)?, &tensor::full(2, 2, 3.0));
    /// # Ok::<(), matgrad_core::MatGradError>(())
    /// ```
    ///
    /// Raw mutable access is not part of the public API:
    ///
    /// ```compile_fail
    /// use matgrad_core::{tensor, Graph};
    ///
    /// let mut graph = Graph::new();
    /// let w = graph.parameter(tensor::zeros(2, 2));
    /// *graph.data_mut(w).unwrap() = tensor::zeros(3, 3);
    /// ```
    pub fn update_data<F>(&mut self, id: NodeId, update: F) -> Result<(), MatGradError>
    where
        F: FnOnce(ArrayViewMut2<'_, f64>, ArrayView2<'_, f64>),
    {
        let node = self.node_mut(id)?;
        update(node.data.view_mut(), node.grad.view());
        Ok(())
    }

    /// Replaces a node's value with one of identical shape.
    pub fn set_data(&mut self, id: NodeId, data: Matrix) -> Result<(), MatGradError> {
        let node = self.node_mut(id)?;
        if node.data.dim() != data.dim() {
            return Err(MatGradError::ShapeMismatch {
                expected: node.data.dim(),
                actual: data.dim(),
                operation: "set_data".to_string(),
            });
        }
        node.data = data;
        Ok(())
    }

    /// Reads the value of a `1 x 1` node.
    pub fn item(&self, id: NodeId) -> Result<f64, MatGradError> {
        let data = self.data(id)?;
        if data.dim() != (1, 1) {
            return Err(MatGradError::NotScalar { shape: data.dim() });
        }
        Ok(data[[0, 0]])
    }

    pub fn zero_grad(&mut self, id: NodeId) -> Result<(), MatGradError> {
        self.node_mut(id)?.grad.fill(0.0);
        Ok(())
    }

    /// Zeroes the gradient of every live node, parameters included.
    pub fn zero_grad_all(&mut self) {
        for node in self.parameters.iter_mut().chain(self.tape.iter_mut()) {
            node.grad.fill(0.0);
        }
    }

    /// Drops every tape node and starts a new epoch.
    ///
    /// Parameters, including their values and gradients, are kept.
    pub fn reset(&mut self) {
        debug!(
            "graph {}: reset epoch {} ({} tape nodes dropped)",
            self.id,
            self.epoch,
            self.tape.len()
        );
        self.tape.clear();
        self.epoch += 1;
    }

    /// Number of live nodes in both regions.
    pub fn len(&self) -> usize {
        self.parameters.len() + self.tape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn tape_len(&self) -> usize {
        self.tape.len()
    }

    // --- Backward ---

    /// Returns the ancestors of `terminal` (itself included) with every node
    /// placed after all of its inputs.
    ///
    /// Depth-first post-order over an explicit work stack, so graph depth is
    /// bounded by heap memory rather than the call stack.
    pub fn topological_order(&self, terminal: NodeId) -> Result<Vec<NodeId>, MatGradError> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        // (node, inputs already pushed)
        let mut stack = vec![(terminal, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            if !visited.insert(id) {
                continue;
            }
            stack.push((id, true));
            for &input in self.node(id)?.inputs.iter().rev() {
                if !visited.contains(&input) {
                    stack.push((input, false));
                }
            }
        }
        Ok(order)
    }

    /// Back-propagates from `terminal` through all of its ancestors.
    ///
    /// The terminal's gradient is set to ones (of its own shape, so a
    /// non-scalar terminal differentiates the sum of its elements). Every other
    /// ancestor has its gradient *accumulated*; call `zero_grad` first unless
    /// that is what you want.
    pub fn backward(&mut self, terminal: NodeId) -> Result<(), MatGradError> {
        let order = self.topological_order(terminal)?;

        let seed = self.node_mut(terminal)?;
        let (rows, cols) = seed.data.dim();
        seed.grad = tensor::ones(rows, cols);

        for &id in order.iter().rev() {
            let (inputs, grads) = {
                let node = self.node(id)?;
                if node.is_leaf() {
                    continue;
                }
                let values = node
                    .inputs
                    .iter()
                    .map(|&input| self.data(input))
                    .collect::<Result<Vec<_>, _>>()?;
                let grads = node.op.input_grads(&values, &node.data, &node.grad)?;
                (node.inputs.clone(), grads)
            };
            for (input, grad) in inputs.into_iter().zip(grads) {
                self.accumulate_grad(input, &grad)?;
            }
        }

        debug!(
            "graph {}: backward visited {} nodes",
            self.id,
            order.len()
        );
        Ok(())
    }

    fn accumulate_grad(&mut self, id: NodeId, grad: &Matrix) -> Result<(), MatGradError> {
        let node = self.node_mut(id)?;
        if node.grad.dim() != grad.dim() {
            return Err(MatGradError::ShapeMismatch {
                expected: node.grad.dim(),
                actual: grad.dim(),
                operation: format!("backward accumulate ({})", node.op.name()),
            });
        }
        node.grad += grad;
        Ok(())
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
