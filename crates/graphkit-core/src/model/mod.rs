//! Graph data model.
//!
//! [`Graph`] is the only input type the analyzers accept. It is built once
//! (by a [`GraphBuilder`], a raw matrix, or a [`crate::loader::GraphSource`])
//! and is never mutated afterwards.

pub mod graph;
pub mod weight;

pub use graph::{Graph, GraphBuilder, GraphKind};
pub use weight::EdgeWeight;
