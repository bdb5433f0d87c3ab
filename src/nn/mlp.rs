use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::graph::{Graph, Value};
use crate::nn::Module;
use crate::nn::config::{Activation, MlpConfig};
use crate::nn::layers::Layer;

/// Multilayer perceptron: a stack of [`Layer`]s where every hidden layer applies the
/// configured nonlinearity and the output layer is linear.
///
/// ```rust
/// use ferrograd::nn::{Mlp, MlpConfig, Module};
/// use ferrograd::Graph;
///
/// let graph = Graph::new();
/// let mlp = Mlp::new(&graph, &MlpConfig::new(3, vec![4, 4, 1]).with_seed(1337))?;
/// let x = graph.create_values(&[2.0, 3.0, -1.0]);
///
/// let out = mlp.forward(&x)?;
/// out[0].backward()?;
///
/// assert_eq!(mlp.num_parameters(), 41);
/// # Ok::<(), ferrograd::AutogradError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Mlp<'g> {
    pub layers: Vec<Layer<'g>>,
}

impl<'g> Mlp<'g> {
    /// Builds the network with a generator seeded from `config.seed`.
    pub fn new(graph: &'g Graph, config: &MlpConfig) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(graph, config, &mut rng)
    }

    /// Builds the network drawing initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        graph: &'g Graph,
        config: &MlpConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let sizes = config.sizes();
        let last = sizes.len() - 2;
        let layers = sizes
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let activation = if index == last {
                    Activation::Linear
                } else {
                    config.activation
                };
                Layer::new(graph, pair[0], pair[1], activation, config.initializer, rng)
            })
            .collect::<Result<Vec<_>>>()?;

        let mlp = Self { layers };
        debug!(
            "built MLP {:?} with {} parameters",
            sizes,
            mlp.num_parameters()
        );
        Ok(mlp)
    }

    pub fn num_inputs(&self) -> usize {
        self.layers.first().map_or(0, Layer::num_inputs)
    }

    pub fn num_outputs(&self) -> usize {
        self.layers.last().map_or(0, Layer::num_outputs)
    }
}

impl<'g> Module<'g> for Mlp<'g> {
    fn forward(&self, inputs: &[Value<'g>]) -> Result<Vec<Value<'g>>> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations)?;
        }
        Ok(activations)
    }

    fn parameters(&self) -> Vec<Value<'g>> {
        self.layers
            .iter()
            .flat_map(|layer| layer.parameters())
            .collect()
    }
}

impl std::fmt::Display for Mlp<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let layers: Vec<String> = self.layers.iter().map(|l| l.to_string()).collect();
        write!(f, "MLP of [{}]", layers.join(", "))
    }
}
