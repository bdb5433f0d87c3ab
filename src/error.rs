use crate::graph::NodeId;
use thiserror::Error;

/// Error type for the ferrograd engine and the layers built on top of it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AutogradError {
    #[error("{id} not found in a graph with {len} nodes")]
    NodeNotFound { id: NodeId, len: usize },

    #[error("Operation {op} expects {expected} inputs, got {actual}")]
    ArityMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Leaf nodes are created from literals, not applied as an operation")]
    LeafOperation,

    #[error("Cycle detected at {id} while ordering the graph")]
    CyclicGraph { id: NodeId },

    #[error("Input size mismatch: expected {expected}, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Formatting error")]
    Fmt(#[from] std::fmt::Error),

    // io::Error is neither Clone nor PartialEq, so only its message is kept.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AutogradError {
    fn from(err: std::io::Error) -> Self {
        AutogradError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AutogradError>;
