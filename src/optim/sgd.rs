use crate::error::{Error, Result};
use crate::network::network::{Network, NetworkGradients};
use crate::optim::{check_gradient_shapes, Optimizer};

/// Plain gradient descent: `param -= learning_rate * grad`.
#[derive(Debug, Clone)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !(learning_rate > 0.0 && learning_rate.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive, got {learning_rate}"
            )));
        }
        Ok(Sgd { learning_rate })
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, network: &mut Network, gradients: &NetworkGradients) -> Result<()> {
        let grads = gradients.as_array();
        check_gradient_shapes(network, &grads)?;
        for (param, grad) in network.parameters_mut().into_iter().zip(grads) {
            for (p, g) in param.iter_mut().zip(grad.iter()) {
                *p -= self.learning_rate * g;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sgd"
    }
}
