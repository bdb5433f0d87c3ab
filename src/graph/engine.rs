use std::cell::{Ref, RefCell};

use log::{debug, trace};

use super::node::{Node, NodeId};
use super::op::Op;
use super::value::Value;
use crate::error::{AutogradError, Result};

/// DFS state of a node while building the topological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    // On the DFS stack. Reaching an active node again means the graph has a cycle.
    Active,
    Done,
}

/// Main computational graph engine.
///
/// Nodes live in an arena and are addressed by their [`NodeId`], so a node can be the
/// input of any number of parents without shared ownership. Forward values are computed
/// eagerly when a node is created; [`Graph::backward`] fills the gradients.
///
/// The arena sits behind a `RefCell` so that [`Value`] handles, which only hold a shared
/// reference to the graph, can keep appending nodes through operator overloads.
#[derive(Debug, Default)]
pub struct Graph {
    pub(super) nodes: RefCell<Vec<Node>>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
        }
    }

    /// Creates a new leaf node holding `data` and returns a handle to it.
    pub fn create_value(&self, data: f64) -> Value<'_> {
        let id = self.push_leaf(data);
        Value::new(self, id)
    }

    /// Creates one leaf per element of `data`, in order.
    pub fn create_values(&self, data: &[f64]) -> Vec<Value<'_>> {
        data.iter().map(|&x| self.create_value(x)).collect()
    }

    /// Applies `op` over existing nodes and returns the id of the new node.
    ///
    /// The forward value is computed immediately. Fails if an input is not part of
    /// this graph or if the number of inputs does not match the operator.
    pub fn apply_operation(&self, op: Op, inputs: &[NodeId]) -> Result<NodeId> {
        if op == Op::Leaf {
            return Err(AutogradError::LeafOperation);
        }
        if inputs.len() != op.num_inputs() {
            return Err(AutogradError::ArityMismatch {
                op: op.name(),
                expected: op.num_inputs(),
                actual: inputs.len(),
            });
        }
        let len = self.num_nodes();
        if let Some(&id) = inputs.iter().find(|id| id.0 >= len) {
            return Err(AutogradError::NodeNotFound { id, len });
        }
        Ok(self.push_op(op, inputs))
    }

    pub(super) fn push_leaf(&self, data: f64) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node::new_leaf(id, data));
        id
    }

    // Inputs are already known to exist and match the arity. Since they all precede
    // the new node in the arena, nodes created here can never form a cycle.
    pub(super) fn push_op(&self, op: Op, inputs: &[NodeId]) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let mut operands = [0.0; 2];
        for (slot, input) in operands.iter_mut().zip(inputs) {
            *slot = nodes[input.0].value;
        }
        let value = op.compute(&operands[..inputs.len()]);
        let id = NodeId(nodes.len());
        nodes.push(Node::from_op(id, op, inputs.to_vec(), value));
        id
    }

    pub fn get_node(&self, id: NodeId) -> Result<Ref<'_, Node>> {
        let len = self.num_nodes();
        Ref::filter_map(self.nodes.borrow(), |nodes| nodes.get(id.0))
            .map_err(|_| AutogradError::NodeNotFound { id, len })
    }

    pub fn get_data(&self, id: NodeId) -> Result<f64> {
        Ok(self.get_node(id)?.value)
    }

    pub fn get_gradient(&self, id: NodeId) -> Result<f64> {
        Ok(self.get_node(id)?.grad)
    }

    pub fn set_gradient(&self, id: NodeId, grad: f64) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let len = nodes.len();
        let node = nodes
            .get_mut(id.0)
            .ok_or(AutogradError::NodeNotFound { id, len })?;
        node.grad = grad;
        Ok(())
    }

    pub fn zero_gradient(&self, id: NodeId) -> Result<()> {
        self.set_gradient(id, 0.0)
    }

    /// Clean up gradients of every node in the graph
    pub fn zero_gradients(&self) {
        for node in self.nodes.borrow_mut().iter_mut() {
            node.grad = 0.0;
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Returns every node reachable from `root`, each exactly once, with all inputs of a
    /// node placed before the node itself. `root` is always last.
    pub fn topological_order(&self, root: NodeId) -> Result<Vec<NodeId>> {
        topological_sort(&self.nodes.borrow(), root)
    }

    /// Runs the backward pass from `root`.
    ///
    /// Seeds the gradient of `root` with 1.0 and walks the reachable nodes in reverse
    /// topological order, so every node has received the contributions of all its
    /// consumers before it forwards its own gradient. Gradients accumulate: calling this
    /// twice without [`Graph::zero_gradients`] adds the second pass on top of the first.
    /// Nodes not reachable from `root` are left untouched.
    pub fn backward(&self, root: NodeId) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let topo_order = topological_sort(&nodes, root)?;
        debug!(
            "backward from {}: {} of {} nodes reachable",
            root,
            topo_order.len(),
            nodes.len()
        );

        nodes[root.0].grad = 1.0;
        for &node_id in topo_order.iter().rev() {
            backward_node(&mut nodes, node_id);
        }
        Ok(())
    }
}

// Pushes the local gradient contributions of one node into its inputs.
fn backward_node(nodes: &mut [Node], node_id: NodeId) {
    let node = &nodes[node_id.0];
    if node.is_leaf() {
        return;
    }

    let mut operands = [0.0; 2];
    for (slot, input) in operands.iter_mut().zip(&node.inputs) {
        *slot = nodes[input.0].value;
    }
    let arity = node.inputs.len();
    let input_grads = node.op.gradient(node.grad, &operands[..arity], node.value);
    trace!(
        "{} ({}): grad {} -> {:?}",
        node_id,
        node.op,
        node.grad,
        &input_grads[..arity]
    );

    // The same input may appear twice (x * x); both contributions must land.
    for (slot, contribution) in input_grads.iter().enumerate().take(arity) {
        let input = nodes[node_id.0].inputs[slot];
        nodes[input.0].grad += contribution;
    }
}

// Iterative depth-first search with explicit (node, next input) frames, so deep graphs
// cannot exhaust the call stack.
fn topological_sort(nodes: &[Node], root: NodeId) -> Result<Vec<NodeId>> {
    let len = nodes.len();
    if root.0 >= len {
        return Err(AutogradError::NodeNotFound { id: root, len });
    }

    let mut marks = vec![Mark::Unvisited; len];
    let mut topo_order = Vec::new();
    let mut stack = vec![(root, 0usize)];
    marks[root.0] = Mark::Active;

    while let Some(frame) = stack.last_mut() {
        let (node_id, next) = *frame;
        match nodes[node_id.0].inputs.get(next) {
            Some(&input_id) => {
                frame.1 += 1;
                let mark = marks
                    .get(input_id.0)
                    .copied()
                    .ok_or(AutogradError::NodeNotFound { id: input_id, len })?;
                match mark {
                    Mark::Unvisited => {
                        marks[input_id.0] = Mark::Active;
                        stack.push((input_id, 0));
                    }
                    Mark::Active => return Err(AutogradError::CyclicGraph { id: input_id }),
                    Mark::Done => {}
                }
            }
            None => {
                marks[node_id.0] = Mark::Done;
                topo_order.push(node_id);
                stack.pop();
            }
        }
    }

    Ok(topo_order)
}
