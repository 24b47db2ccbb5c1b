use thiserror::Error;

/// Custom error type for the matgrad engine and the crates built on it.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum MatGradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: (usize, usize),
        shape2: (usize, usize),
    },

    #[error("Incompatible shapes for operation {operation}: {shape1:?} and {shape2:?}")]
    IncompatibleShapes {
        shape1: (usize, usize),
        shape2: (usize, usize),
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError {
        data_len: usize,
        shape: (usize, usize),
    },

    #[error("Node belongs to graph {node_graph}, but was used with graph {graph}")]
    ForeignNode { node_graph: u64, graph: u64 },

    #[error("Node from tape epoch {node_epoch} used after reset (current epoch {current_epoch})")]
    StaleNode { node_epoch: u64, current_epoch: u64 },

    #[error("Unknown node index {index} (region holds {len} nodes)")]
    UnknownNode { index: usize, len: usize },

    #[error("Expected a 1x1 node, got shape {shape:?}")]
    NotScalar { shape: (usize, usize) },

    #[error("Got {labels} labels for {rows} rows of logits")]
    LabelCountMismatch { labels: usize, rows: usize },

    #[error("Label {label} is out of range for {classes} classes")]
    LabelOutOfRange { label: usize, classes: usize },

    #[error("Operation {operation} requires a non-empty input")]
    EmptyTensor { operation: String },

    #[error("Parameter count mismatch: model has {expected}, stored weights have {actual}")]
    ParameterCountMismatch { expected: usize, actual: usize },

    #[error("Shape mismatch for parameter {index}: model has {expected:?}, stored weights have {actual:?}")]
    ParameterShapeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for MatGradError {
    fn from(err: std::io::Error) -> Self {
        MatGradError::Io(err.to_string())
    }
}
