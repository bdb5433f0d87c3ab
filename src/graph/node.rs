use super::op::Op;

// Id of a node in the computational graph. It is the node's index in the arena,
// so it stays valid for as long as the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

// Represents a scalar in the computational graph.
// A node is either a leaf (a literal or a trainable parameter) or the result of an operation
// over earlier nodes. The same input may feed several parents, so this is a DAG, not a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub op: Op,
    // Operands in order. Empty for leaves, one entry for unary ops, two for binary ops.
    pub inputs: Vec<NodeId>,
    // Forward result, computed eagerly when the node is created and never modified.
    pub value: f64,
    // Gradient accumulator. Only the backward pass writes to it, always with `+=`
    // except for the root, which gets seeded with 1.0.
    pub grad: f64,
}

impl Node {
    // Create a new leaf node
    pub fn new_leaf(id: NodeId, value: f64) -> Self {
        Self {
            id,
            op: Op::Leaf,
            inputs: Vec::new(),
            value,
            grad: 0.0,
        }
    }

    // Create a new node from an operation whose forward value is already computed
    pub fn from_op(id: NodeId, op: Op, inputs: Vec<NodeId>, value: f64) -> Self {
        Self {
            id,
            op,
            inputs,
            value,
            grad: 0.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.op, Op::Leaf)
    }
}
