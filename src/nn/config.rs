use crate::error::{AutogradError, Result};
use crate::initializers::Initializer;

/// Nonlinearity applied at the output of a neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Relu,
    Tanh,
    /// No nonlinearity.
    Linear,
}

/// Configuration for MLP model architecture
#[derive(Debug, Clone, PartialEq)]
pub struct MlpConfig {
    /// Number of inputs of the first layer
    pub inputs: usize,
    /// Number of neurons of every layer, in order. The last entry is the output size.
    pub layer_sizes: Vec<usize>,
    /// Nonlinearity of the hidden layers. The output layer is always linear.
    pub activation: Activation,
    pub initializer: Initializer,
    /// Seed for the generator that draws the initial weights
    pub seed: u64,
}

impl MlpConfig {
    pub fn new(inputs: usize, layer_sizes: Vec<usize>) -> Self {
        Self {
            inputs,
            layer_sizes,
            activation: Activation::default(),
            initializer: Initializer::default(),
            seed: 0,
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = initializer;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.inputs == 0 {
            return Err(AutogradError::InvalidConfig(
                "an MLP needs at least one input".to_string(),
            ));
        }
        if self.layer_sizes.is_empty() {
            return Err(AutogradError::InvalidConfig(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        if let Some(index) = self.layer_sizes.iter().position(|&size| size == 0) {
            return Err(AutogradError::InvalidConfig(format!(
                "layer {} has no neurons",
                index
            )));
        }
        Ok(())
    }

    /// Sizes of every layer boundary: `[inputs, layer_sizes...]`.
    pub fn sizes(&self) -> Vec<usize> {
        std::iter::once(self.inputs)
            .chain(self.layer_sizes.iter().copied())
            .collect()
    }
}
