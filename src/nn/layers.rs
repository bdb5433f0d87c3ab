// src/nn/layers.rs
// Fully connected building blocks: a single neuron and a layer of neurons sharing the same inputs.

use rand::Rng;

use crate::error::{AutogradError, Result};
use crate::graph::{Graph, Value};
use crate::initializers::Initializer;
use crate::nn::Module;
use crate::nn::config::Activation;

/// A single unit: activation(w · x + b).
///
/// Weights are drawn from the initializer, the bias starts at zero.
#[derive(Debug, Clone)]
pub struct Neuron<'g> {
    pub weights: Vec<Value<'g>>,
    pub bias: Value<'g>,
    pub activation: Activation,
}

impl<'g> Neuron<'g> {
    pub fn new<R: Rng + ?Sized>(
        graph: &'g Graph,
        inputs: usize,
        activation: Activation,
        initializer: Initializer,
        rng: &mut R,
    ) -> Result<Self> {
        Self::with_fan_out(graph, inputs, 1, activation, initializer, rng)
    }

    // Xavier needs the width of the layer the neuron belongs to.
    pub(crate) fn with_fan_out<R: Rng + ?Sized>(
        graph: &'g Graph,
        inputs: usize,
        fan_out: usize,
        activation: Activation,
        initializer: Initializer,
        rng: &mut R,
    ) -> Result<Self> {
        let weights = initializer.sample(inputs, fan_out, inputs, rng)?;
        Ok(Self {
            weights: graph.create_values(&weights),
            bias: graph.create_value(0.0),
            activation,
        })
    }

    pub fn num_inputs(&self) -> usize {
        self.weights.len()
    }

    /// Output of the neuron for one input vector.
    pub fn activate(&self, inputs: &[Value<'g>]) -> Result<Value<'g>> {
        if inputs.len() != self.weights.len() {
            return Err(AutogradError::InputSizeMismatch {
                expected: self.weights.len(),
                actual: inputs.len(),
            });
        }

        let pre_activation = inputs
            .iter()
            .zip(&self.weights)
            .fold(self.bias, |acc, (&x, &w)| acc + x * w);

        Ok(match self.activation {
            Activation::Relu => pre_activation.relu(),
            Activation::Tanh => pre_activation.tanh(),
            Activation::Linear => pre_activation,
        })
    }
}

impl<'g> Module<'g> for Neuron<'g> {
    fn forward(&self, inputs: &[Value<'g>]) -> Result<Vec<Value<'g>>> {
        Ok(vec![self.activate(inputs)?])
    }

    fn parameters(&self) -> Vec<Value<'g>> {
        let mut parameters = self.weights.clone();
        parameters.push(self.bias);
        parameters
    }
}

impl std::fmt::Display for Neuron<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.activation {
            Activation::Relu => "ReLU",
            Activation::Tanh => "Tanh",
            Activation::Linear => "Linear",
        };
        write!(f, "{}Neuron({})", kind, self.weights.len())
    }
}

/// A layer of `outputs` neurons, each seeing the full input vector.
#[derive(Debug, Clone)]
pub struct Layer<'g> {
    pub neurons: Vec<Neuron<'g>>,
}

impl<'g> Layer<'g> {
    pub fn new<R: Rng + ?Sized>(
        graph: &'g Graph,
        inputs: usize,
        outputs: usize,
        activation: Activation,
        initializer: Initializer,
        rng: &mut R,
    ) -> Result<Self> {
        let neurons = (0..outputs)
            .map(|_| Neuron::with_fan_out(graph, inputs, outputs, activation, initializer, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { neurons })
    }

    pub fn num_inputs(&self) -> usize {
        self.neurons.first().map_or(0, Neuron::num_inputs)
    }

    pub fn num_outputs(&self) -> usize {
        self.neurons.len()
    }
}

impl<'g> Module<'g> for Layer<'g> {
    fn forward(&self, inputs: &[Value<'g>]) -> Result<Vec<Value<'g>>> {
        self.neurons
            .iter()
            .map(|neuron| neuron.activate(inputs))
            .collect()
    }

    fn parameters(&self) -> Vec<Value<'g>> {
        self.neurons
            .iter()
            .flat_map(|neuron| neuron.parameters())
            .collect()
    }
}

impl std::fmt::Display for Layer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let neurons: Vec<String> = self.neurons.iter().map(|n| n.to_string()).collect();
        write!(f, "Layer of [{}]", neurons.join(", "))
    }
}
