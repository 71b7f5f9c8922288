use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::network::config::NetworkConfig;
use crate::train::train_config::TrainConfig;

/// Everything needed to reproduce a run of the binary: architecture,
/// training hyperparameters and the size of the generated dataset.
///
/// Every field has a default, so a partial JSON file is valid. Trained
/// weights are never part of this file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub network: NetworkConfig,
    pub train: TrainConfig,
    /// Number of random samples to generate.
    pub samples: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            network: NetworkConfig::default(),
            train: TrainConfig::default(),
            samples: 1000,
        }
    }
}

impl ExperimentConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file and validates it.
    pub fn load_json(path: &str) -> Result<ExperimentConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: ExperimentConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.train.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::optim::OptimizerConfig;

    #[test]
    fn partial_json_fills_defaults() {
        let config: ExperimentConfig = serde_json::from_str(
            r#"{ "network": { "hidden_units": 32 }, "train": { "epochs": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.network.hidden_units, 32);
        assert_eq!(config.network.input_features, 10);
        assert_eq!(config.train.epochs, 3);
        assert_eq!(config.train.batch_size, 32);
        assert_eq!(config.train.optimizer, OptimizerConfig::default());
        assert_eq!(config.samples, 1000);
    }

    #[test]
    fn save_then_load_keeps_hyperparameters() {
        let path = std::env::temp_dir().join(format!("softmax-mlp-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let mut config = ExperimentConfig::default();
        config.train.optimizer = OptimizerConfig::Sgd { learning_rate: 0.05 };
        config.samples = 12;

        config.save_json(path).unwrap();
        let loaded = ExperimentConfig::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(loaded.network, config.network);
        assert_eq!(loaded.samples, 12);
        assert_eq!(loaded.train.epochs, config.train.epochs);
        match loaded.train.optimizer {
            OptimizerConfig::Sgd { learning_rate } => assert!((learning_rate - 0.05).abs() < 1e-15),
            other => panic!("unexpected optimizer {other:?}"),
        }
    }

    #[test]
    fn load_rejects_invalid_values_and_missing_files() {
        assert!(matches!(
            ExperimentConfig::load_json("/nonexistent/softmax-mlp.json"),
            Err(Error::Io(_))
        ));
        let bad: ExperimentConfig =
            serde_json::from_str(r#"{ "network": { "num_classes": 1 } }"#).unwrap();
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));
    }
}
