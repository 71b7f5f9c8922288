use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Fully connected layer: `activation(input @ weights + biases)`.
///
/// `weights` has shape (input_size × size) and `biases` (1 × size); both
/// shapes are fixed here and only the values change during training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
}

/// Values saved by a training forward pass and consumed by `backward`.
#[derive(Debug, Clone)]
pub struct LayerCache {
    pub input: Matrix,
    // pre-activation z = xW + b; the activation derivative is taken at z
    pub pre_activation: Matrix,
}

/// Gradients produced by one backward pass through a layer.
#[derive(Debug, Clone)]
pub struct LayerGradients {
    /// ∂L/∂input, handed to the previous layer.
    pub input: Matrix,
    pub weights: Matrix,
    pub biases: Matrix,
}

impl DenseLayer {
    /// Creates a layer with zero biases. ReLU layers use He initialization,
    /// Identity layers Xavier.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> DenseLayer {
        let weights = match activation {
            ActivationFunction::ReLU => Matrix::he(input_size, size, rng),
            ActivationFunction::Identity => Matrix::xavier(input_size, size, rng),
        };

        DenseLayer {
            size,
            input_size,
            weights,
            biases: Matrix::zeros(1, size),
            activator: activation,
        }
    }

    /// Inference forward pass over a (batch × input_size) matrix.
    pub fn forward(&self, input: &Matrix) -> Result<Matrix> {
        Ok(self.forward_cached(input)?.0)
    }

    /// Forward pass that also returns what `backward` needs.
    pub fn forward_cached(&self, input: &Matrix) -> Result<(Matrix, LayerCache)> {
        if input.cols != self.input_size {
            return Err(Error::shape(
                "DenseLayer::forward",
                (input.rows, self.input_size),
                input.shape(),
            ));
        }
        let z = input.matmul(&self.weights)?.add_row(&self.biases)?;
        let a = z.map(|x| self.activator.function(x));
        let cache = LayerCache {
            input: input.clone(),
            pre_activation: z,
        };
        Ok((a, cache))
    }

    /// Backpropagates `output_grad` (∂L/∂a, batch × size) through the layer.
    ///
    /// The incoming gradient is expected to already carry any batch-mean
    /// scaling, so parameter gradients are plain sums over the batch.
    pub fn backward(&self, cache: &LayerCache, output_grad: &Matrix) -> Result<LayerGradients> {
        if output_grad.shape() != cache.pre_activation.shape() {
            return Err(Error::shape(
                "DenseLayer::backward",
                cache.pre_activation.shape(),
                output_grad.shape(),
            ));
        }

        // δ = ∂L/∂a ⊙ σ'(z)
        let act_derivative = cache.pre_activation.map(|x| self.activator.derivative(x));
        let delta = output_grad.hadamard(&act_derivative)?;

        let weights = cache.input.transpose().matmul(&delta)?;
        let biases = delta.sum_rows();
        let input = delta.matmul(&self.weights.transpose())?;

        Ok(LayerGradients { input, weights, biases })
    }
}
