//! Graph-loading interface and the JSON graph-library adapter.
//!
//! # Overview
//!
//! Analyzers only ever see a [`Graph`]. Whatever owns persistence hands
//! graphs over through [`GraphSource`]. [`GraphLibrary`] implements that
//! trait for the document format used by the desktop application:
//!
//! ```json
//! {
//!   "triangle": {
//!     "type": "undirected",
//!     "has_weights": true,
//!     "adjacency_matrix": {
//!       "A": { "A": 0, "B": 4, "C": 1 },
//!       "B": { "A": 4, "B": 0, "C": 2 },
//!       "C": { "A": 1, "B": 2, "C": 0 }
//!     }
//!   }
//! }
//! ```
//!
//! ## Ordering
//!
//! Object key order is significant: the outer keys of `adjacency_matrix`
//! become the vertex order, which drives every tie-break downstream. The
//! workspace enables `serde_json`'s `preserve_order` feature for this.
//!
//! ## Fidelity
//!
//! Matrices are loaded verbatim. Nothing is mirrored, so a document that
//! declares `"undirected"` but stores lopsided weights still loads, and
//! [`Graph::is_directed`] will report it as directed.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::config::AnalysisLimits;
use crate::error::GraphError;
use crate::model::{Graph, GraphBuilder, GraphKind};

/// Errors from reading a graph library.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read graph library {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed graph library: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no graph named {0:?} in library")]
    UnknownGraph(String),

    #[error("graph {name:?}: row {vertex:?} is not an object")]
    MalformedRow { name: String, vertex: String },

    #[error("graph {name:?}: weight {from} -> {to} is not a number")]
    NonNumericWeight {
        name: String,
        from: String,
        to: String,
    },

    #[error("graph {name:?}: {source}")]
    InvalidGraph {
        name: String,
        #[source]
        source: GraphError,
    },
}

/// Anything that can hand the engine named graphs.
pub trait GraphSource {
    /// Names of the available graphs, in stored order.
    fn graph_names(&self) -> Vec<String>;

    /// Build the named graph, refusing graphs above `limits.max_vertices`.
    ///
    /// # Errors
    ///
    /// Implementations return [`LoadError`] for unknown names and invalid
    /// graph descriptions.
    fn load_graph(&self, name: &str, limits: &AnalysisLimits) -> Result<Graph, LoadError>;
}

#[derive(Debug, Clone, Deserialize)]
struct StoredGraph {
    #[serde(rename = "type")]
    kind: GraphKind,
    #[serde(default)]
    has_weights: bool,
    adjacency_matrix: Map<String, Value>,
}

/// A parsed graph-library document.
#[derive(Debug, Clone)]
pub struct GraphLibrary {
    graphs: Vec<(String, StoredGraph)>,
}

impl GraphLibrary {
    /// Parse a library document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if the text is not a JSON object of
    /// stored graphs.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let root: Map<String, Value> = serde_json::from_str(text)?;
        let graphs = root
            .into_iter()
            .map(|(name, value)| Ok((name, serde_json::from_value::<StoredGraph>(value)?)))
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        Ok(Self { graphs })
    }

    /// Read and parse a library document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] or [`LoadError::Json`].
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json_str(&text)?;
        debug!(graphs = library.graphs.len(), "graph library loaded");
        Ok(library)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl GraphSource for GraphLibrary {
    fn graph_names(&self) -> Vec<String> {
        self.graphs.iter().map(|(name, _)| name.clone()).collect()
    }

    fn load_graph(&self, name: &str, limits: &AnalysisLimits) -> Result<Graph, LoadError> {
        let stored = self
            .graphs
            .iter()
            .find(|(stored_name, _)| stored_name == name)
            .map(|(_, stored)| stored)
            .ok_or_else(|| LoadError::UnknownGraph(name.to_string()))?;

        let vertices = stored.adjacency_matrix.len();
        if vertices > limits.max_vertices {
            return Err(LoadError::InvalidGraph {
                name: name.to_string(),
                source: GraphError::SizeLimitExceeded {
                    operation: "graph loading",
                    vertices,
                    limit: limits.max_vertices,
                },
            });
        }
        build_stored(name, stored)
    }
}

fn build_stored(name: &str, stored: &StoredGraph) -> Result<Graph, LoadError> {
    let invalid = |source: GraphError| LoadError::InvalidGraph {
        name: name.to_string(),
        source,
    };

    let mut builder = GraphBuilder::new(stored.kind, stored.has_weights);
    for vertex in stored.adjacency_matrix.keys() {
        builder.add_vertex(vertex.as_str()).map_err(invalid)?;
    }

    for (from, row) in &stored.adjacency_matrix {
        let row = row.as_object().ok_or_else(|| LoadError::MalformedRow {
            name: name.to_string(),
            vertex: from.clone(),
        })?;
        for (to, raw) in row {
            let raw = raw.as_f64().ok_or_else(|| LoadError::NonNumericWeight {
                name: name.to_string(),
                from: from.clone(),
                to: to.clone(),
            })?;
            builder.set_raw_weight(from, to, raw).map_err(invalid)?;
        }
    }

    Ok(builder.build())
}
