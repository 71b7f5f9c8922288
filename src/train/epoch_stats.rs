use serde::{Serialize, Deserialize};

/// Per-epoch training statistics.
///
/// One value is produced at the end of every epoch: it is appended to the
/// session history and, when a progress channel is attached, sent to it.
/// A non-finite `loss` means training diverged; it is reported as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Sample-weighted mean cross-entropy over the epoch's batches.
    pub loss: f64,
    /// Fraction of samples whose arg-max probability matched the label,
    /// measured on the forward pass before each update.
    pub accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    pub fn is_finite(&self) -> bool {
        self.loss.is_finite()
    }
}
