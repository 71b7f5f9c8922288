pub mod config;
pub mod network;
pub mod predict;

pub use config::NetworkConfig;
pub use network::{create_network, Network, NetworkCache, NetworkGradients};
pub use predict::{predict, predict_one, Prediction};
