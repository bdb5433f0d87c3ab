// Neural network module for ferrograd.
// Neurons, layers and multilayer perceptrons built from scalar nodes of the engine.

pub mod config;
pub mod layers;
pub mod mlp;
pub mod module;
mod tests;

pub use config::{Activation, MlpConfig};
pub use layers::{Layer, Neuron};
pub use mlp::Mlp;
pub use module::Module;

/// Neural network initialization utilities
pub mod init {
    pub use crate::initializers::*;
}
