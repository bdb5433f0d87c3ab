// op.rs
// The operator set is closed, so instead of boxing a trait object per node (or capturing a
// closure per node) every node carries one of these tags and the engine dispatches on it.
// Subtraction, negation and division are not here: they are built from Add, Mul and Pow
// in value.rs, so their gradients come for free from the primitive rules.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// Input or parameter. Nothing to propagate.
    Leaf,
    Add,
    Mul,
    /// Power with a constant exponent. The exponent is never a node.
    Pow(f64),
    Tanh,
    Relu,
}

impl Op {
    pub fn name(&self) -> &'static str {
        match self {
            Op::Leaf => "leaf",
            Op::Add => "+",
            Op::Mul => "*",
            Op::Pow(_) => "pow",
            Op::Tanh => "tanh",
            Op::Relu => "relu",
        }
    }

    // Get number of inputs this operator expects
    pub fn num_inputs(&self) -> usize {
        match self {
            Op::Leaf => 0,
            Op::Pow(_) | Op::Tanh | Op::Relu => 1,
            Op::Add | Op::Mul => 2,
        }
    }

    /// Forward value of the operator. `inputs` must hold `num_inputs()` values;
    /// the engine checks this before calling.
    pub fn compute(&self, inputs: &[f64]) -> f64 {
        match *self {
            // Leaves hold a literal; the engine never computes one.
            Op::Leaf => 0.0,
            Op::Add => inputs[0] + inputs[1],
            Op::Mul => inputs[0] * inputs[1],
            Op::Pow(k) => inputs[0].powf(k),
            Op::Tanh => inputs[0].tanh(),
            Op::Relu => {
                if inputs[0] > 0.0 {
                    inputs[0]
                } else {
                    0.0
                }
            }
        }
    }

    /// Local contributions to each operand's gradient, given the node's finalized
    /// gradient `grad_output`, the operand values and the node's own forward value.
    /// Slots past `num_inputs()` are zero.
    pub fn gradient(&self, grad_output: f64, inputs: &[f64], output: f64) -> [f64; 2] {
        match *self {
            Op::Leaf => [0.0, 0.0],
            // d(a+b)/da = d(a+b)/db = 1
            Op::Add => [grad_output, grad_output],
            // d(a*b)/da = b, d(a*b)/db = a
            Op::Mul => [inputs[1] * grad_output, inputs[0] * grad_output],
            // d(a^k)/da = k * a^(k-1)
            Op::Pow(k) => [k * inputs[0].powf(k - 1.0) * grad_output, 0.0],
            // d(tanh a)/da = 1 - tanh(a)^2, and tanh(a) is the cached output
            Op::Tanh => [(1.0 - output * output) * grad_output, 0.0],
            Op::Relu => {
                if output > 0.0 {
                    [grad_output, 0.0]
                } else {
                    [0.0, 0.0]
                }
            }
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Pow(k) => write!(f, "**{}", k),
            other => f.write_str(other.name()),
        }
    }
}
