use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::math::softmax::{log_softmax, softmax_rows};

/// Softmax cross-entropy over raw logits and integer class labels.
pub struct CrossEntropyLoss;

/// Everything one evaluation of the objective produces.
#[derive(Debug, Clone)]
pub struct LossOutput {
    /// Mean negative log-likelihood of the true classes over the batch.
    pub loss: f64,
    /// ∂loss/∂logits, shape (batch × classes), already divided by the batch size.
    pub gradient: Matrix,
    /// Softmax of the logits; reused for accuracy without a second pass.
    pub probabilities: Matrix,
}

impl CrossEntropyLoss {
    /// Computes the mean loss and its gradient with respect to the logits.
    ///
    /// Softmax and cross-entropy are fused, so the gradient for sample `i` is
    ///   (softmax(logits[i]) - one_hot(labels[i])) / batch
    ///
    /// Fails if the label count does not match the batch or a label is not a
    /// valid column index. Non-finite logits are not an error; they surface
    /// as a NaN loss.
    pub fn evaluate(logits: &Matrix, labels: &[usize]) -> Result<LossOutput> {
        if labels.len() != logits.rows {
            return Err(Error::ShapeMismatch {
                context: "CrossEntropyLoss::evaluate",
                expected: format!("{} labels", logits.rows),
                actual: format!("{} labels", labels.len()),
            });
        }
        if logits.rows == 0 {
            return Err(Error::EmptyDataset);
        }
        check_labels(labels, logits.cols)?;

        let probabilities = softmax_rows(logits);
        let batch = logits.rows as f64;

        // -log p computed through log-softmax so an underflowed p gives a
        // large finite loss instead of +inf
        let total: f64 = logits
            .data
            .iter()
            .zip(labels.iter())
            .map(|(z, &label)| -log_softmax(z)[label])
            .sum();

        let mut gradient = probabilities.clone();
        for (row, &label) in gradient.data.iter_mut().zip(labels.iter()) {
            row[label] -= 1.0;
            for g in row.iter_mut() {
                *g /= batch;
            }
        }

        Ok(LossOutput {
            loss: total / batch,
            gradient,
            probabilities,
        })
    }

    /// Mean loss only; convenient for evaluation and numerical gradient checks.
    pub fn loss(logits: &Matrix, labels: &[usize]) -> Result<f64> {
        Ok(Self::evaluate(logits, labels)?.loss)
    }
}

/// Fails on the first label that is not below `num_classes`.
pub fn check_labels(labels: &[usize], num_classes: usize) -> Result<()> {
    match labels.iter().enumerate().find(|(_, &l)| l >= num_classes) {
        Some((index, &label)) => Err(Error::LabelOutOfRange { index, label, num_classes }),
        None => Ok(()),
    }
}
