use crate::tensor::Matrix;
use ndarray::Axis;

/// Row-wise softmax of a plain matrix.
///
/// Each row has its maximum subtracted before exponentiation, so large logits
/// do not overflow. This is a value helper; it does not touch any graph.
pub fn softmax(logits: &Matrix) -> Matrix {
    let mut out = logits.to_owned();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let max = row.fold(f64::NEG_INFINITY, |m, &x| m.max(x));
        row.mapv_inplace(|x| (x - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|x| x / sum);
    }
    out
}
