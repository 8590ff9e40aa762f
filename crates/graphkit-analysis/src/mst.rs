//! Minimum spanning forest by Kruskal's algorithm.

use graphkit_core::{Graph, GraphError, GraphKind, UnionFind};
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Accepted edges in acceptance order, with their total weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningForest {
    pub edges: Vec<SpanningEdge>,
    pub total_weight: f64,
    /// Connected components after all unions (isolated vertices included).
    pub components: usize,
}

impl SpanningForest {
    #[must_use]
    pub const fn is_spanning_tree(&self) -> bool {
        self.components <= 1
    }
}

/// Candidate edges: the upper triangle of the matrix (`u < v` by vertex
/// index), in row-major order. Self-loops never join two components, so
/// they are skipped.
fn candidate_edges(graph: &Graph) -> Vec<(usize, usize, f64)> {
    let n = graph.vertex_count();
    let mut edges = Vec::new();
    for u in 0..n {
        edges.extend(
            graph
                .neighbors(u)
                .filter(|&(v, _)| v > u)
                .map(|(v, w)| (u, v, w)),
        );
    }
    edges
}

/// Kruskal over every component.
///
/// Edges are sorted ascending by weight with a stable sort, so equal weights
/// keep their collection order. Negative weights are allowed.
///
/// # Errors
///
/// - [`GraphError::NotApplicable`] unless the graph is declared undirected
///   and weighted.
/// - [`GraphError::AsymmetricWeights`] when an undirected graph stores an
///   edge in one direction only (or with two different weights), since
///   only the upper triangle is read.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn minimum_spanning_forest(graph: &Graph) -> Result<SpanningForest, GraphError> {
    if graph.kind() != GraphKind::Undirected {
        return Err(GraphError::not_applicable(
            "minimum spanning tree",
            "graph is directed",
        ));
    }
    if !graph.is_weighted() {
        return Err(GraphError::not_applicable(
            "minimum spanning tree",
            "graph has no weights",
        ));
    }

    graph.verify_symmetric()?;

    let mut candidates = candidate_edges(graph);
    candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut sets = UnionFind::new(graph.vertex_count());
    let mut edges = Vec::new();
    let mut total_weight = 0.0;
    for (u, v, weight) in candidates {
        if sets.union(u, v) {
            total_weight += weight;
            edges.push(SpanningEdge {
                from: graph.label(u).to_string(),
                to: graph.label(v).to_string(),
                weight,
            });
        }
    }

    let components = sets.set_count();
    debug!(accepted = edges.len(), components, "kruskal complete");
    Ok(SpanningForest {
        edges,
        total_weight,
        components,
    })
}

/// Kruskal, requiring the result to span the whole graph.
///
/// # Errors
///
/// Same as [`minimum_spanning_forest`], plus [`GraphError::Disconnected`]
/// when more than one component remains.
pub fn minimum_spanning_tree(graph: &Graph) -> Result<SpanningForest, GraphError> {
    let forest = minimum_spanning_forest(graph)?;
    if !forest.is_spanning_tree() {
        return Err(GraphError::Disconnected {
            operation: "minimum spanning tree",
        });
    }
    Ok(forest)
}
