use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::layers::dense::{DenseLayer, LayerCache};
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;

/// Two-layer classifier: `hidden` (ReLU) followed by `output` (Identity).
///
/// `forward` returns raw logits; normalization is left to the loss or to
/// `predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub hidden: DenseLayer,
    pub output: DenseLayer,
}

/// Per-layer caches from a training forward pass, in forward order.
#[derive(Debug, Clone)]
pub struct NetworkCache {
    hidden: LayerCache,
    output: LayerCache,
}

/// Parameter gradients for the whole network.
#[derive(Debug, Clone)]
pub struct NetworkGradients {
    pub hidden_weights: Matrix,
    pub hidden_biases: Matrix,
    pub output_weights: Matrix,
    pub output_biases: Matrix,
}

impl NetworkGradients {
    /// Gradients in the same order as [`Network::parameters_mut`].
    pub fn as_array(&self) -> [&Matrix; 4] {
        [
            &self.hidden_weights,
            &self.hidden_biases,
            &self.output_weights,
            &self.output_biases,
        ]
    }
}

/// Builds a freshly initialized network from its three sizes.
///
/// Uses the default initialization seed; see [`Network::from_config`] to
/// choose one.
pub fn create_network(input_features: usize, hidden_units: usize, num_classes: usize) -> Result<Network> {
    Network::from_config(&NetworkConfig {
        input_features,
        hidden_units,
        num_classes,
        ..NetworkConfig::default()
    })
}

impl Network {
    /// Validates the config and initializes weights from its seed.
    pub fn from_config(config: &NetworkConfig) -> Result<Network> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        Ok(Network::with_rng(config, &mut rng))
    }

    /// Initializes from a caller-supplied RNG. The config must already be valid.
    pub fn with_rng<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Network {
        let hidden = DenseLayer::new(
            config.input_features,
            config.hidden_units,
            ActivationFunction::ReLU,
            rng,
        );
        let output = DenseLayer::new(
            config.hidden_units,
            config.num_classes,
            ActivationFunction::Identity,
            rng,
        );
        Network { hidden, output }
    }

    pub fn input_features(&self) -> usize {
        self.hidden.input_size
    }

    pub fn hidden_units(&self) -> usize {
        self.hidden.size
    }

    pub fn num_classes(&self) -> usize {
        self.output.size
    }

    /// Logits for a (batch × input_features) matrix.
    pub fn forward(&self, features: &Matrix) -> Result<Matrix> {
        self.check_input(features)?;
        let hidden = self.hidden.forward(features)?;
        self.output.forward(&hidden)
    }

    /// Forward pass that keeps the intermediate values needed by `backward`.
    pub fn forward_cached(&self, features: &Matrix) -> Result<(Matrix, NetworkCache)> {
        self.check_input(features)?;
        let (hidden_out, hidden) = self.hidden.forward_cached(features)?;
        let (logits, output) = self.output.forward_cached(&hidden_out)?;
        Ok((logits, NetworkCache { hidden, output }))
    }

    /// Propagates ∂L/∂logits through the output layer, then the hidden layer.
    pub fn backward(&self, cache: &NetworkCache, logits_grad: &Matrix) -> Result<NetworkGradients> {
        let output = self.output.backward(&cache.output, logits_grad)?;
        let hidden = self.hidden.backward(&cache.hidden, &output.input)?;
        Ok(NetworkGradients {
            hidden_weights: hidden.weights,
            hidden_biases: hidden.biases,
            output_weights: output.weights,
            output_biases: output.biases,
        })
    }

    /// Mutable views of every trainable parameter, in a fixed order that
    /// optimizers use as the parameter identity.
    pub fn parameters_mut(&mut self) -> [&mut Matrix; 4] {
        [
            &mut self.hidden.weights,
            &mut self.hidden.biases,
            &mut self.output.weights,
            &mut self.output.biases,
        ]
    }

    /// Shapes of the parameters, in `parameters_mut` order.
    pub fn parameter_shapes(&self) -> [(usize, usize); 4] {
        [
            self.hidden.weights.shape(),
            self.hidden.biases.shape(),
            self.output.weights.shape(),
            self.output.biases.shape(),
        ]
    }

    fn check_input(&self, features: &Matrix) -> Result<()> {
        if features.cols != self.input_features() {
            return Err(Error::shape(
                "Network::forward",
                (features.rows, self.input_features()),
                features.shape(),
            ));
        }
        Ok(())
    }
}
