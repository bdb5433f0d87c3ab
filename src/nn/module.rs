use crate::error::Result;
use crate::graph::Value;

/// The base trait for all neural network modules.
///
/// A module owns trainable parameters, which are leaf nodes of a [`Graph`](crate::Graph),
/// and builds its forward computation on top of them with the engine's operators.
/// After a backward pass the gradients are read from the parameters themselves.
///
/// # Examples
///
/// ```rust
/// use ferrograd::nn::Module;
/// use ferrograd::{Graph, Result, Value};
///
/// struct Scale<'g> {
///     factor: Value<'g>,
/// }
///
/// impl<'g> Module<'g> for Scale<'g> {
///     fn forward(&self, inputs: &[Value<'g>]) -> Result<Vec<Value<'g>>> {
///         Ok(inputs.iter().map(|&x| x * self.factor).collect())
///     }
///
///     fn parameters(&self) -> Vec<Value<'g>> {
///         vec![self.factor]
///     }
/// }
///
/// let graph = Graph::new();
/// let scale = Scale { factor: graph.create_value(3.0) };
/// let out = scale.forward(&graph.create_values(&[2.0]))?;
/// out[0].backward()?;
/// assert_eq!(scale.factor.grad(), 2.0);
///
/// scale.zero_grad();
/// assert_eq!(scale.factor.grad(), 0.0);
/// # Ok::<(), ferrograd::AutogradError>(())
/// ```
pub trait Module<'g> {
    /// Performs the forward pass of the module.
    fn forward(&self, inputs: &[Value<'g>]) -> Result<Vec<Value<'g>>>;

    /// Returns all parameters of this module, submodules included.
    fn parameters(&self) -> Vec<Value<'g>> {
        Vec::new()
    }

    /// Resets the gradient of every parameter to 0.0.
    /// Call it between independent backward passes, since gradients accumulate.
    fn zero_grad(&self) {
        for parameter in self.parameters() {
            parameter.zero_grad();
        }
    }

    /// Returns the number of scalar parameters in this module.
    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }
}
