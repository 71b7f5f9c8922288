use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

/// Architecture of the two-layer classifier plus the seed used for
/// weight initialization.
///
/// Fields:
/// - `input_features` — number of features per sample
/// - `hidden_units`   — width of the ReLU hidden layer
/// - `num_classes`    — number of output logits (at least 2)
/// - `seed`           — seed for the initialization RNG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_features: usize,
    pub hidden_units: usize,
    pub num_classes: usize,
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            input_features: 10,
            hidden_units: 128,
            num_classes: 4,
            seed: 42,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input_features == 0 {
            return Err(Error::InvalidConfig("input_features must be positive".into()));
        }
        if self.hidden_units == 0 {
            return Err(Error::InvalidConfig("hidden_units must be positive".into()));
        }
        if self.num_classes < 2 {
            return Err(Error::InvalidConfig(format!(
                "num_classes must be at least 2, got {}",
                self.num_classes
            )));
        }
        Ok(())
    }
}
