use std::ops::{Add, Div, Mul, Neg, Sub};

use super::engine::Graph;
use super::node::NodeId;
use super::op::Op;
use crate::error::Result;

/// Handle to a scalar node of a [`Graph`].
///
/// Handles are `Copy`, so the same value can be used in several expressions, which is
/// how shared nodes (and therefore DAGs) are built:
///
/// ```rust
/// use ferrograd::Graph;
///
/// let graph = Graph::new();
/// let x = graph.create_value(3.0);
/// let y = x * x + 1.0;
/// y.backward().unwrap();
///
/// assert_eq!(y.data(), 10.0);
/// assert_eq!(x.grad(), 6.0);
/// ```
///
/// Combining handles of two different graphs is a programming error and panics.
#[derive(Clone, Copy)]
pub struct Value<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl<'g> Value<'g> {
    pub(super) fn new(graph: &'g Graph, id: NodeId) -> Self {
        Self { graph, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Forward value of this node.
    pub fn data(&self) -> f64 {
        self.graph.nodes.borrow()[self.id.0].value
    }

    /// Gradient accumulated by the backward passes run so far.
    pub fn grad(&self) -> f64 {
        self.graph.nodes.borrow()[self.id.0].grad
    }

    pub fn zero_grad(&self) {
        self.graph.nodes.borrow_mut()[self.id.0].grad = 0.0;
    }

    pub fn op(&self) -> Op {
        self.graph.nodes.borrow()[self.id.0].op
    }

    pub fn children(&self) -> Vec<Value<'g>> {
        self.graph.nodes.borrow()[self.id.0]
            .inputs
            .iter()
            .map(|&id| Value::new(self.graph, id))
            .collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.op() == Op::Leaf
    }

    /// Raises this value to a constant power.
    pub fn pow(self, exponent: f64) -> Value<'g> {
        self.unary(Op::Pow(exponent))
    }

    pub fn tanh(self) -> Value<'g> {
        self.unary(Op::Tanh)
    }

    pub fn relu(self) -> Value<'g> {
        self.unary(Op::Relu)
    }

    /// Backpropagates from this value. See [`Graph::backward`].
    pub fn backward(&self) -> Result<()> {
        self.graph.backward(self.id)
    }

    fn unary(self, op: Op) -> Value<'g> {
        Value::new(self.graph, self.graph.push_op(op, &[self.id]))
    }

    fn binary(self, op: Op, rhs: Value<'g>) -> Value<'g> {
        assert!(
            std::ptr::eq(self.graph, rhs.graph),
            "cannot combine {} and {}: they belong to different graphs",
            self.id,
            rhs.id
        );
        Value::new(self.graph, self.graph.push_op(op, &[self.id, rhs.id]))
    }

    // Literal operands become fresh leaves of this value's graph.
    fn literal(self, data: f64) -> Value<'g> {
        self.graph.create_value(data)
    }
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Value(data={}, grad={})", self.data(), self.grad())
    }
}

// Deriving Debug would dump the whole graph.
impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Value")
            .field("id", &self.id)
            .field("op", &self.op())
            .field("data", &self.data())
            .field("grad", &self.grad())
            .finish()
    }
}

impl<'g> Add for Value<'g> {
    type Output = Value<'g>;

    fn add(self, rhs: Value<'g>) -> Value<'g> {
        self.binary(Op::Add, rhs)
    }
}

impl<'g> Mul for Value<'g> {
    type Output = Value<'g>;

    fn mul(self, rhs: Value<'g>) -> Value<'g> {
        self.binary(Op::Mul, rhs)
    }
}

impl<'g> Neg for Value<'g> {
    type Output = Value<'g>;

    fn neg(self) -> Value<'g> {
        self * -1.0
    }
}

impl<'g> Sub for Value<'g> {
    type Output = Value<'g>;

    fn sub(self, rhs: Value<'g>) -> Value<'g> {
        self + (-rhs)
    }
}

impl<'g> Div for Value<'g> {
    type Output = Value<'g>;

    fn div(self, rhs: Value<'g>) -> Value<'g> {
        self * rhs.pow(-1.0)
    }
}

// value OP literal: wrap the literal and reuse the node form.
macro_rules! impl_scalar_rhs {
    ($($trait:ident::$method:ident),*) => {
        $(
            impl<'g> $trait<f64> for Value<'g> {
                type Output = Value<'g>;

                fn $method(self, rhs: f64) -> Value<'g> {
                    let rhs = self.literal(rhs);
                    $trait::$method(self, rhs)
                }
            }
        )*
    };
}

impl_scalar_rhs!(Add::add, Sub::sub, Mul::mul, Div::div);

// literal OP value: commutative ops swap operands, the others go through the
// identities a - b == -b + a and a / b == a * b**-1.
impl<'g> Add<Value<'g>> for f64 {
    type Output = Value<'g>;

    fn add(self, rhs: Value<'g>) -> Value<'g> {
        rhs + self
    }
}

impl<'g> Mul<Value<'g>> for f64 {
    type Output = Value<'g>;

    fn mul(self, rhs: Value<'g>) -> Value<'g> {
        rhs * self
    }
}

impl<'g> Sub<Value<'g>> for f64 {
    type Output = Value<'g>;

    fn sub(self, rhs: Value<'g>) -> Value<'g> {
        -rhs + self
    }
}

impl<'g> Div<Value<'g>> for f64 {
    type Output = Value<'g>;

    fn div(self, rhs: Value<'g>) -> Value<'g> {
        rhs.pow(-1.0) * self
    }
}
