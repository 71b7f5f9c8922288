pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;
pub mod config;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use math::softmax::{argmax, softmax, softmax_rows};
pub use activation::activation::ActivationFunction;
pub use layers::dense::DenseLayer;
pub use network::network::{create_network, Network};
pub use network::config::NetworkConfig;
pub use network::predict::{predict, predict_one, Prediction};
pub use loss::cross_entropy::CrossEntropyLoss;
pub use optim::{Adam, AdamConfig, Optimizer, OptimizerConfig, Sgd};
pub use data::dataset::{Batch, Dataset};
pub use train::{train, train_with_progress, EpochStats, TrainConfig, TrainedNetwork, TrainingSession};
pub use config::ExperimentConfig;
