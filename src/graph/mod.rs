pub mod engine;
pub mod node;
pub mod op;
pub mod plot;
pub mod value;

pub use engine::Graph;
pub use node::{Node, NodeId};
pub use op::Op;
pub use plot::{EngineVisualization, GraphVisualizer, VisualizationConfig};
pub use value::Value;
