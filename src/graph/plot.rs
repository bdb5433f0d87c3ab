use std::collections::HashSet;
use std::fmt::Write;
use std::path::Path;

use super::engine::Graph;
use super::node::{Node, NodeId};
use crate::error::Result;

/// Graph visualization for the computational graph engine.
/// Produces GraphViz DOT text; rendering it is left to the `dot` tool.
#[derive(Debug, Clone, Default)]
pub struct GraphVisualizer {
    pub config: VisualizationConfig,
}

/// Configuration for graph visualization
#[derive(Debug, Clone)]
pub struct VisualizationConfig {
    pub show_values: bool,
    pub show_gradients: bool,
    pub node_color: String,
    pub op_color: String,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            show_values: true,
            show_gradients: true,
            node_color: "#E3F2FD".to_string(),
            op_color: "#FFF3E0".to_string(),
        }
    }
}

impl GraphVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: VisualizationConfig) -> Self {
        Self { config }
    }

    /// Generate DOT format representation of everything reachable from `output_nodes`.
    pub fn to_dot(&self, graph: &Graph, output_nodes: &[NodeId]) -> Result<String> {
        let relevant_nodes = self.find_relevant_nodes(graph, output_nodes)?;
        let nodes = graph.nodes.borrow();

        let mut dot = String::new();
        writeln!(dot, "digraph ComputationalGraph {{")?;
        writeln!(dot, "    rankdir=LR;")?;
        writeln!(dot, "    node [shape=record, style=filled];")?;
        writeln!(dot, "    edge [color=gray];")?;

        for &node_id in &relevant_nodes {
            let node = &nodes[node_id.0];
            writeln!(
                dot,
                "    {} [label=\"{}\", fillcolor=\"{}\"];",
                node_id.0,
                self.create_node_label(node),
                self.get_node_color(node)
            )?;
        }

        for &node_id in &relevant_nodes {
            for input_id in &nodes[node_id.0].inputs {
                writeln!(dot, "    {} -> {};", input_id.0, node_id.0)?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }

    /// Writes the DOT text for `output_nodes` to `path`.
    pub fn save_dot(
        &self,
        graph: &Graph,
        output_nodes: &[NodeId],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let dot = self.to_dot(graph, output_nodes)?;
        std::fs::write(path, dot)?;
        Ok(())
    }

    // Union of the topological orders of every output, without duplicates.
    fn find_relevant_nodes(&self, graph: &Graph, output_nodes: &[NodeId]) -> Result<Vec<NodeId>> {
        let mut visited = HashSet::new();
        let mut relevant = Vec::new();

        for &output_id in output_nodes {
            for node_id in graph.topological_order(output_id)? {
                if visited.insert(node_id) {
                    relevant.push(node_id);
                }
            }
        }

        Ok(relevant)
    }

    fn create_node_label(&self, node: &Node) -> String {
        let mut fields = vec![format!("{} {}", node.id, node.op)];
        if self.config.show_values {
            fields.push(format!("data {:.4}", node.value));
        }
        if self.config.show_gradients {
            fields.push(format!("grad {:.4}", node.grad));
        }
        fields.join(" | ")
    }

    fn get_node_color(&self, node: &Node) -> &str {
        if node.is_leaf() {
            &self.config.node_color
        } else {
            &self.config.op_color
        }
    }
}

/// Convenience accessors on the graph itself.
pub trait EngineVisualization {
    fn to_dot(&self, output_nodes: &[NodeId]) -> Result<String>;

    fn save_graph_dot(&self, output_nodes: &[NodeId], path: impl AsRef<Path>) -> Result<()>;
}

impl EngineVisualization for Graph {
    fn to_dot(&self, output_nodes: &[NodeId]) -> Result<String> {
        GraphVisualizer::new().to_dot(self, output_nodes)
    }

    fn save_graph_dot(&self, output_nodes: &[NodeId], path: impl AsRef<Path>) -> Result<()> {
        GraphVisualizer::new().save_dot(self, output_nodes, path)
    }
}
