use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::network::{Network, NetworkGradients};
use crate::optim::{check_gradient_shapes, Optimizer};

/// Adam hyperparameters. Defaults: lr 0.001, β1 0.9, β2 0.999, ε 1e-8.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdamConfig {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            learning_rate: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

impl AdamConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        for (name, beta) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&beta) {
                return Err(Error::InvalidConfig(format!("{name} must be in [0, 1), got {beta}")));
            }
        }
        if !(self.epsilon > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// First and second moment accumulators for one parameter tensor.
#[derive(Debug, Clone)]
struct Moments {
    m: Matrix,
    v: Matrix,
}

/// Adam with bias-corrected moment estimates.
///
/// Moment state is allocated once from the network's parameter shapes and
/// indexed in [`Network::parameters_mut`] order. The step counter is global:
/// it advances once per `step`, not once per parameter.
#[derive(Debug, Clone)]
pub struct Adam {
    config: AdamConfig,
    moments: Vec<Moments>,
    t: u64,
}

impl Adam {
    pub fn new(config: AdamConfig, network: &Network) -> Result<Adam> {
        config.validate()?;
        let moments = network
            .parameter_shapes()
            .iter()
            .map(|&(rows, cols)| Moments {
                m: Matrix::zeros(rows, cols),
                v: Matrix::zeros(rows, cols),
            })
            .collect();
        Ok(Adam { config, moments, t: 0 })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    /// Number of updates applied so far.
    pub fn steps(&self) -> u64 {
        self.t
    }
}

impl Optimizer for Adam {
    fn step(&mut self, network: &mut Network, gradients: &NetworkGradients) -> Result<()> {
        let grads = gradients.as_array();
        check_gradient_shapes(network, &grads)?;
        if self.moments.len() != grads.len() {
            return Err(Error::InvalidConfig(
                "optimizer state was built for a different network".into(),
            ));
        }
        for (shape, state) in network.parameter_shapes().iter().zip(self.moments.iter()) {
            if *shape != state.m.shape() {
                return Err(Error::shape("Adam::step", state.m.shape(), *shape));
            }
        }

        self.t += 1;
        let AdamConfig { learning_rate, beta1, beta2, epsilon } = self.config;
        let t = self.t as f64;
        let bias1 = 1.0 - beta1.powf(t);
        let bias2 = 1.0 - beta2.powf(t);

        for ((param, grad), state) in network
            .parameters_mut()
            .into_iter()
            .zip(grads)
            .zip(self.moments.iter_mut())
        {
            for (((p, &g), m), v) in param
                .iter_mut()
                .zip(grad.iter())
                .zip(state.m.iter_mut())
                .zip(state.v.iter_mut())
            {
                *m = beta1 * *m + (1.0 - beta1) * g;
                *v = beta2 * *v + (1.0 - beta2) * g * g;
                let m_hat = *m / bias1;
                let v_hat = *v / bias2;
                *p -= learning_rate * m_hat / (v_hat.sqrt() + epsilon);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "adam"
    }
}
