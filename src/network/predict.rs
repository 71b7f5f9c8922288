use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::math::softmax::{argmax, softmax_rows};
use crate::network::network::Network;

/// Inference output for a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub logits: Matrix,
    /// Row-wise softmax of `logits`.
    pub probabilities: Matrix,
    /// Arg-max class per row.
    pub classes: Vec<usize>,
}

/// Runs one forward pass, then softmax, then arg-max per row.
pub fn predict(network: &Network, input: &Matrix) -> Result<Prediction> {
    let logits = network.forward(input)?;
    let probabilities = softmax_rows(&logits);
    let classes = probabilities.data.iter().map(|row| argmax(row)).collect();
    Ok(Prediction { logits, probabilities, classes })
}

/// Single-sample form of [`predict`]: `(logits, probabilities, class)`.
pub fn predict_one(network: &Network, sample: &[f64]) -> Result<(Vec<f64>, Vec<f64>, usize)> {
    let mut prediction = predict(network, &Matrix::row_vector(sample.to_vec()))?;
    let logits = prediction.logits.data.swap_remove(0);
    let probabilities = prediction.probabilities.data.swap_remove(0);
    Ok((logits, probabilities, prediction.classes[0]))
}
