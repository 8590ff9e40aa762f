//! The immutable graph representation shared by every analyzer.
//!
//! # Representation
//!
//! Vertices are distinct string labels kept in insertion order. Internally
//! each label maps to a dense index and weights live in a row-major
//! `n × n` matrix of [`EdgeWeight`]. Labels only appear at the boundary;
//! algorithms work on indices.
//!
//! ## Iteration order
//!
//! [`Graph::neighbors`] yields out-neighbours in vertex insertion order.
//! Every tie-break in the analyzers follows from that order, so the same
//! graph always produces the same traversal.
//!
//! ## Two notions of "directed"
//!
//! A graph carries a *declared* [`GraphKind`], and [`Graph::is_directed`]
//! derives directedness from the weights (any `weight(u, v) != weight(v, u)`).
//! The two can disagree: a graph declared undirected whose stored weights
//! are lopsided is still "directed" to the analyzers that ask the derived
//! question.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::model::weight::EdgeWeight;

/// Declared graph type, as stored alongside the adjacency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Directed,
    Undirected,
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A weighted graph over labelled vertices.
///
/// Construct one with [`GraphBuilder`], [`Graph::from_edges`] or
/// [`Graph::from_matrix`]. Once built it is never mutated; derived graphs
/// ([`Graph::transpose`], [`Graph::symmetrized`]) are new values.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    weights: Vec<EdgeWeight>,
    kind: GraphKind,
    weighted: bool,
}

impl Graph {
    /// Build a graph from a vertex list and `(from, to, weight)` triples.
    ///
    /// Undirected graphs mirror every edge. Weights go through the same
    /// validation as [`GraphBuilder::add_edge`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] for repeated labels,
    /// [`GraphError::UnknownVertex`] when an edge names an undeclared
    /// vertex, and the weight errors of [`GraphBuilder::add_edge`].
    pub fn from_edges(
        kind: GraphKind,
        weighted: bool,
        vertices: &[&str],
        edges: &[(&str, &str, f64)],
    ) -> Result<Self, GraphError> {
        let mut builder = GraphBuilder::new(kind, weighted);
        for &vertex in vertices {
            builder.add_vertex(vertex)?;
        }
        for &(from, to, weight) in edges {
            builder.add_edge(from, to, weight)?;
        }
        Ok(builder.build())
    }

    /// Build a graph from raw matrix rows, `0` meaning "no edge".
    ///
    /// Rows are taken verbatim (no mirroring), so a matrix declared
    /// undirected may still be asymmetric.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotApplicable`] when the matrix is not
    /// `labels.len()` square, plus the errors of
    /// [`GraphBuilder::set_raw_weight`].
    pub fn from_matrix(
        kind: GraphKind,
        weighted: bool,
        labels: &[&str],
        rows: &[Vec<f64>],
    ) -> Result<Self, GraphError> {
        let n = labels.len();
        if rows.len() != n || rows.iter().any(|row| row.len() != n) {
            return Err(GraphError::not_applicable(
                "matrix construction",
                format!("expected a {n}x{n} matrix"),
            ));
        }

        let mut builder = GraphBuilder::new(kind, weighted);
        for &label in labels {
            builder.add_vertex(label)?;
        }
        for (i, row) in rows.iter().enumerate() {
            for (j, &raw) in row.iter().enumerate() {
                builder.set_raw_weight(labels[i], labels[j], raw)?;
            }
        }
        Ok(builder.build())
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Vertex labels in insertion order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of the vertex at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range. Indices only come from this graph.
    #[must_use]
    pub fn label(&self, idx: usize) -> &str {
        &self.labels[idx]
    }

    /// Look up the dense index of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if the label is absent.
    pub fn index_of(&self, label: &str) -> Result<usize, GraphError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(label.to_string()))
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// The declared graph type.
    #[must_use]
    pub const fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Whether the graph was declared to carry meaningful weights.
    #[must_use]
    pub const fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Weight of the ordered pair `(u, v)` by index.
    #[must_use]
    pub fn weight_at(&self, u: usize, v: usize) -> EdgeWeight {
        self.weights[u * self.labels.len() + v]
    }

    /// Weight of the ordered pair `(from, to)` by label.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if either label is absent.
    pub fn edge_weight(&self, from: &str, to: &str) -> Result<EdgeWeight, GraphError> {
        let u = self.index_of(from)?;
        let v = self.index_of(to)?;
        Ok(self.weight_at(u, v))
    }

    /// Out-neighbours of `u` with their weights, in vertex order.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let n = self.labels.len();
        self.weights[u * n..(u + 1) * n]
            .iter()
            .enumerate()
            .filter_map(|(v, w)| w.value().map(|w| (v, w)))
    }

    /// Out-neighbours of `label` with their weights, in vertex order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if the label is absent.
    pub fn neighbors_of<'a>(
        &'a self,
        label: &str,
    ) -> Result<impl Iterator<Item = (&'a str, f64)> + use<'a>, GraphError> {
        let u = self.index_of(label)?;
        Ok(self
            .neighbors(u)
            .map(|(v, w)| (self.labels[v].as_str(), w)))
    }

    /// Labels adjacent to `label` (nonzero outgoing entries).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if the label is absent.
    pub fn adjacent(&self, label: &str) -> Result<Vec<&str>, GraphError> {
        Ok(self.neighbors_of(label)?.map(|(v, _)| v).collect())
    }

    /// Number of nonzero entries in the row of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if the label is absent.
    pub fn degree(&self, label: &str) -> Result<usize, GraphError> {
        let u = self.index_of(label)?;
        Ok(self.out_degree(u))
    }

    #[must_use]
    pub fn out_degree(&self, u: usize) -> usize {
        self.neighbors(u).count()
    }

    #[must_use]
    pub fn in_degree(&self, v: usize) -> usize {
        (0..self.labels.len())
            .filter(|&u| self.weight_at(u, v).is_edge())
            .count()
    }

    /// Number of nonzero ordered entries in the matrix.
    ///
    /// An undirected edge stored in both directions counts twice.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.weights.iter().filter(|w| w.is_edge()).count()
    }

    /// `true` if any stored weight is negative.
    #[must_use]
    pub fn has_negative_edge(&self) -> bool {
        self.weights
            .iter()
            .any(|w| w.value().is_some_and(|w| w < 0.0))
    }

    /// Directedness derived from the weights: `true` iff some pair has
    /// `weight(u, v) != weight(v, u)`.
    ///
    /// This ignores the declared [`GraphKind`].
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.first_asymmetric_pair().is_some()
    }

    /// Check that every weight is mirrored.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AsymmetricWeights`] naming the first offending
    /// pair in vertex order.
    pub fn verify_symmetric(&self) -> Result<(), GraphError> {
        match self.first_asymmetric_pair() {
            None => Ok(()),
            Some((u, v)) => Err(GraphError::AsymmetricWeights {
                from: self.labels[u].clone(),
                to: self.labels[v].clone(),
            }),
        }
    }

    fn first_asymmetric_pair(&self) -> Option<(usize, usize)> {
        let n = self.labels.len();
        (0..n)
            .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
            .find(|&(u, v)| self.weight_at(u, v) != self.weight_at(v, u))
    }

    /// A new graph with every edge reversed.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let n = self.labels.len();
        let mut weights = vec![EdgeWeight::NoEdge; n * n];
        for u in 0..n {
            for v in 0..n {
                weights[v * n + u] = self.weight_at(u, v);
            }
        }
        Self {
            labels: self.labels.clone(),
            index: self.index.clone(),
            weights,
            kind: self.kind,
            weighted: self.weighted,
        }
    }

    /// A new undirected graph where every nonzero weight is mirrored.
    ///
    /// Pairs are written in vertex order, so when `weight(u, v)` and
    /// `weight(v, u)` are both present and differ, the pair visited last
    /// wins for both directions.
    #[must_use]
    pub fn symmetrized(&self) -> Self {
        let n = self.labels.len();
        let mut weights = vec![EdgeWeight::NoEdge; n * n];
        for u in 0..n {
            for (v, w) in self.neighbors(u) {
                weights[u * n + v] = EdgeWeight::Weight(w);
                weights[v * n + u] = EdgeWeight::Weight(w);
            }
        }
        Self {
            labels: self.labels.clone(),
            index: self.index.clone(),
            weights,
            kind: GraphKind::Undirected,
            weighted: self.weighted,
        }
    }

    /// Fail fast when the graph is larger than `limit` vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SizeLimitExceeded`].
    pub fn ensure_at_most(&self, operation: &'static str, limit: usize) -> Result<(), GraphError> {
        if self.labels.len() > limit {
            return Err(GraphError::SizeLimitExceeded {
                operation,
                vertices: self.labels.len(),
                limit,
            });
        }
        Ok(())
    }

    /// Export as a `petgraph` directed graph (one edge per nonzero entry).
    ///
    /// Node indices match this graph's vertex indices.
    #[must_use]
    pub fn to_petgraph(&self) -> DiGraph<String, f64> {
        let mut graph = DiGraph::with_capacity(self.labels.len(), self.edge_count());
        for label in &self.labels {
            graph.add_node(label.clone());
        }
        for u in 0..self.labels.len() {
            for (v, w) in self.neighbors(u) {
                graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), w);
            }
        }
        graph
    }
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Incremental constructor for [`Graph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    kind: GraphKind,
    weighted: bool,
    labels: Vec<String>,
    index: HashMap<String, usize>,
    entries: Vec<(usize, usize, EdgeWeight)>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(kind: GraphKind, weighted: bool) -> Self {
        Self {
            kind,
            weighted,
            labels: Vec::new(),
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Append a vertex and return its index.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if the label already exists.
    pub fn add_vertex(&mut self, label: impl Into<String>) -> Result<usize, GraphError> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(GraphError::DuplicateVertex(label));
        }
        let idx = self.labels.len();
        self.index.insert(label.clone(), idx);
        self.labels.push(label);
        Ok(idx)
    }

    /// Add an edge. Undirected graphs also store `to -> from`.
    ///
    /// Unweighted graphs conventionally pass `1.0`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownVertex`] if an endpoint was not added.
    /// - [`GraphError::ZeroWeight`] for `0.0`, which would read back as
    ///   "no edge".
    /// - [`GraphError::InvalidWeight`] for NaN or infinite weights.
    #[allow(clippy::float_cmp)]
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<(), GraphError> {
        if weight == 0.0 {
            return Err(GraphError::ZeroWeight {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let (u, v) = self.endpoints(from, to, weight)?;
        self.entries.push((u, v, EdgeWeight::Weight(weight)));
        if self.kind == GraphKind::Undirected && u != v {
            self.entries.push((v, u, EdgeWeight::Weight(weight)));
        }
        Ok(())
    }

    /// Store a raw matrix entry without mirroring; `0.0` clears the pair.
    ///
    /// This is the loader path: stored documents use `0` for "no edge".
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] or [`GraphError::InvalidWeight`].
    pub fn set_raw_weight(&mut self, from: &str, to: &str, raw: f64) -> Result<(), GraphError> {
        let (u, v) = self.endpoints(from, to, raw)?;
        self.entries.push((u, v, EdgeWeight::from_raw(raw)));
        Ok(())
    }

    fn endpoints(&self, from: &str, to: &str, weight: f64) -> Result<(usize, usize), GraphError> {
        let u = self
            .index
            .get(from)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(from.to_string()))?;
        let v = self
            .index
            .get(to)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(to.to_string()))?;
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            });
        }
        Ok((u, v))
    }

    /// Materialize the matrix. Later writes to the same pair win.
    #[must_use]
    pub fn build(self) -> Graph {
        let n = self.labels.len();
        let mut weights = vec![EdgeWeight::NoEdge; n * n];
        for (u, v, w) in self.entries {
            weights[u * n + v] = w;
        }
        Graph {
            labels: self.labels,
            index: self.index,
            weights,
            kind: self.kind,
            weighted: self.weighted,
        }
    }
}
