//! Parameter update rules.
//!
//! Every optimizer sees the network's parameters through
//! [`Network::parameters_mut`], whose fixed order doubles as the parameter
//! identity for any per-parameter state.

pub mod adam;
pub mod sgd;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::network::{Network, NetworkGradients};

pub use adam::{Adam, AdamConfig};
pub use sgd::Sgd;

/// A gradient-based update rule that mutates the network in place.
pub trait Optimizer {
    /// Applies one update. Fails without touching any parameter if a
    /// gradient's shape does not match its parameter.
    fn step(&mut self, network: &mut Network, gradients: &NetworkGradients) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Serializable choice of optimizer; Adam is the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimizerConfig {
    Adam(AdamConfig),
    Sgd { learning_rate: f64 },
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig::Adam(AdamConfig::default())
    }
}

impl OptimizerConfig {
    /// Builds the optimizer, allocating any state sized to `network`.
    pub fn build(&self, network: &Network) -> Result<Box<dyn Optimizer>> {
        Ok(match self {
            OptimizerConfig::Adam(config) => Box::new(Adam::new(*config, network)?),
            OptimizerConfig::Sgd { learning_rate } => Box::new(Sgd::new(*learning_rate)?),
        })
    }

    pub fn learning_rate(&self) -> f64 {
        match self {
            OptimizerConfig::Adam(config) => config.learning_rate,
            OptimizerConfig::Sgd { learning_rate } => *learning_rate,
        }
    }
}

pub(crate) fn check_gradient_shapes(network: &Network, gradients: &[&Matrix; 4]) -> Result<()> {
    for (shape, grad) in network.parameter_shapes().iter().zip(gradients.iter()) {
        if *shape != grad.shape() {
            return Err(Error::shape("Optimizer::step", *shape, grad.shape()));
        }
    }
    Ok(())
}
