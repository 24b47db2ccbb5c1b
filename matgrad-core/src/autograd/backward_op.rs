use crate::error::MatGradError;
use crate::ops;
use crate::tensor::Matrix;

/// Tagged record describing how a node was produced.
///
/// Every operator result carries one of these. The variant names the local
/// derivative rule, and its payload holds whatever the rule needs beyond the
/// input values themselves (the exponent of a power, the cached softmax of a
/// cross-entropy, ...). Input handles live on the node, not in the record.
#[derive(Debug, Clone, PartialEq)]
pub enum BackwardOp {
    /// Inputs, constants and parameters. Backward is a no-op.
    Leaf,
    Add,
    Mul,
    MatMul,
    Pow { exponent: f64 },
    Relu,
    Sigmoid { output: Matrix },
    Transpose,
    /// Row-major flatten of an `rows x cols` input into `1 x (rows * cols)`.
    Flatten { rows: usize, cols: usize },
    /// Fused softmax + negative log-likelihood over a batch.
    CrossEntropy { probs: Matrix, one_hot: Matrix },
    MeanSquaredError { target: Matrix },
}

impl BackwardOp {
    pub fn name(&self) -> &'static str {
        match self {
            BackwardOp::Leaf => "leaf",
            BackwardOp::Add => "add",
            BackwardOp::Mul => "mul",
            BackwardOp::MatMul => "matmul",
            BackwardOp::Pow { .. } => "pow",
            BackwardOp::Relu => "relu",
            BackwardOp::Sigmoid { .. } => "sigmoid",
            BackwardOp::Transpose => "transpose",
            BackwardOp::Flatten { .. } => "flatten",
            BackwardOp::CrossEntropy { .. } => "cross_entropy",
            BackwardOp::MeanSquaredError { .. } => "mse",
        }
    }

    /// Number of inputs a node with this record has.
    pub fn arity(&self) -> usize {
        match self {
            BackwardOp::Leaf => 0,
            BackwardOp::Add | BackwardOp::Mul | BackwardOp::MatMul => 2,
            _ => 1,
        }
    }

    /// Computes the gradient flowing into each input, in input order.
    ///
    /// `inputs` are the input values, `output` the node's own value and
    /// `grad_output` its accumulated gradient. The returned gradients already
    /// have the shapes of the corresponding inputs.
    pub(crate) fn input_grads(
        &self,
        inputs: &[&Matrix],
        output: &Matrix,
        grad_output: &Matrix,
    ) -> Result<Vec<Matrix>, MatGradError> {
        if inputs.len() != self.arity() {
            return Err(MatGradError::InvalidData(format!(
                "{} node expects {} inputs, found {}",
                self.name(),
                self.arity(),
                inputs.len()
            )));
        }
        match self {
            BackwardOp::Leaf => Ok(Vec::new()),
            BackwardOp::Add => ops::arithmetic::add::add_backward(inputs[0], inputs[1], grad_output),
            BackwardOp::Mul => ops::arithmetic::mul::mul_backward(inputs[0], inputs[1], grad_output),
            BackwardOp::MatMul => {
                ops::linalg::matmul::matmul_backward(inputs[0], inputs[1], grad_output)
            }
            BackwardOp::Pow { exponent } => {
                ops::arithmetic::pow::pow_backward(inputs[0], *exponent, grad_output)
            }
            BackwardOp::Relu => ops::activation::relu::relu_backward(output, grad_output),
            BackwardOp::Sigmoid { output } => {
                ops::activation::sigmoid::sigmoid_backward(output, grad_output)
            }
            BackwardOp::Transpose => ops::linalg::transpose::transpose_backward(grad_output),
            BackwardOp::Flatten { rows, cols } => {
                ops::view::flatten::flatten_backward(*rows, *cols, grad_output)
            }
            BackwardOp::CrossEntropy { probs, one_hot } => {
                ops::loss::cross_entropy::cross_entropy_backward(probs, one_hot, grad_output)
            }
            BackwardOp::MeanSquaredError { target } => {
                ops::loss::mse::mse_backward(inputs[0], target, grad_output)
            }
        }
    }
}
