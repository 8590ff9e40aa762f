#![forbid(unsafe_code)]
//! graphkit-core library.
//!
//! The graph model every analyzer consumes, plus the primitives they share.
//!
//! # Conventions
//!
//! - **Errors**: Typed [`GraphError`] for model and analyzer failures;
//!   `anyhow::Result` only for configuration file loading.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`). The library
//!   never installs a subscriber.
//! - **Indices**: Algorithms work on dense vertex indices; labels appear
//!   only at the API boundary.

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod traversal;
pub mod union_find;

pub use config::{AnalysisLimits, load_limits};
pub use error::{DagViolation, ErrorCode, GraphError};
pub use loader::{GraphLibrary, GraphSource, LoadError};
pub use model::{EdgeWeight, Graph, GraphBuilder, GraphKind};
pub use union_find::UnionFind;
