use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::optim::OptimizerConfig;

/// Configuration for a training run.
///
/// # Fields
/// - `epochs`     — total number of full passes over the training data
/// - `batch_size` — samples per mini-batch; use `1` for online updates
/// - `shuffle`    — reshuffle sample order every epoch (sequential otherwise)
/// - `seed`       — seed for the session's shuffling RNG
/// - `optimizer`  — update rule and its hyperparameters (Adam by default)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub shuffle: bool,
    pub seed: u64,
    pub optimizer: OptimizerConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 10,
            batch_size: 32,
            shuffle: true,
            seed: 42,
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl TrainConfig {
    /// Adam-trained config with the given loop sizes and defaults elsewhere.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            ..TrainConfig::default()
        }
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".into()));
        }
        Ok(())
    }
}
