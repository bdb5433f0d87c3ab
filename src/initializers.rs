use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{AutogradError, Result};

/// Weight initialization scheme for neuron parameters.
///
/// Initializers only build a distribution; the caller samples it with its own
/// random number generator, so a fixed seed reproduces the same weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Initializer {
    /// U(low, high)
    Uniform { low: f64, high: f64 },
    /// U(-a, a) where a = gain * sqrt(6 / (fan_in + fan_out))
    XavierUniform { gain: f64 },
    /// U(-bound, bound) where bound = sqrt(6 / fan_in). Meant for ReLU activations.
    KaimingUniform,
}

impl Default for Initializer {
    fn default() -> Self {
        Initializer::Uniform {
            low: -1.0,
            high: 1.0,
        }
    }
}

impl Initializer {
    pub fn distribution(&self, fan_in: usize, fan_out: usize) -> Result<Uniform<f64>> {
        match *self {
            Initializer::Uniform { low, high } => uniform(low, high),
            Initializer::XavierUniform { gain } => xavier_uniform(fan_in, fan_out, gain),
            Initializer::KaimingUniform => kaiming_uniform(fan_in),
        }
    }

    /// Draws `count` weights for a unit with the given fan-in/fan-out.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        fan_in: usize,
        fan_out: usize,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        let dist = self.distribution(fan_in, fan_out)?;
        Ok(dist.sample_iter(rng).take(count).collect())
    }
}

pub fn uniform(low: f64, high: f64) -> Result<Uniform<f64>> {
    Uniform::new(low, high).map_err(|e| {
        AutogradError::Initialization(format!("U({}, {}): {}", low, high, e))
    })
}

pub fn xavier_uniform(fan_in: usize, fan_out: usize, gain: f64) -> Result<Uniform<f64>> {
    let a = gain * (6.0 / (fan_in + fan_out) as f64).sqrt();
    uniform(-a, a)
}

pub fn kaiming_uniform(fan_in: usize) -> Result<Uniform<f64>> {
    let bound = (6.0 / fan_in as f64).sqrt();
    uniform(-bound, bound)
}
