//! # Ferrograd
//!
//! Ferrograd is a small reverse-mode automatic differentiation engine over scalars,
//! with a thin neural network layer (neurons, layers, multilayer perceptrons) on top.
//!
//! ## Features
//!
//! - Eager forward evaluation, lazy construction of the computation DAG
//! - Reverse-mode differentiation in topological order, without recursion
//! - Operator overloading for `Value op Value`, `Value op f64` and `f64 op Value`
//! - Gradient accumulation over shared nodes and across backward passes
//! - Graph visualization as GraphViz DOT
//! - Seeded, reproducible parameter initialization
//! - Written 100% in safe Rust
//!
//! ```rust
//! use ferrograd::Graph;
//!
//! let graph = Graph::new();
//! let a = graph.create_value(-4.0);
//! let b = graph.create_value(2.0);
//! let c = a + b;
//! let d = a * b + b.pow(3.0);
//! let e = c - d;
//! e.backward()?;
//!
//! assert_eq!(e.data(), -2.0);
//! assert_eq!(a.grad(), -1.0);
//! assert_eq!(b.grad(), -7.0);
//! # Ok::<(), ferrograd::AutogradError>(())
//! ```
pub mod error;
pub mod graph;
pub mod initializers;
pub mod nn;

// Re-export commonly used types for convenience
pub use error::{AutogradError, Result};
pub use graph::{Graph, NodeId, Op, Value};
