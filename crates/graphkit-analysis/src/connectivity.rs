//! Connectivity checks and strongly connected components.
//!
//! # Overview
//!
//! - [`undirected_connectivity`]: one DFS from the first vertex of a
//!   symmetric graph; connected iff every vertex is reached.
//! - [`is_weakly_connected`]: reachability ignoring direction, restricted to
//!   vertices that have at least one incident edge. This is the
//!   connectivity precondition of the Eulerian check.
//! - [`strongly_connected_components`]: Kosaraju's two-pass algorithm.
//!
//! "Symmetric" and "directed" here are the *derived* notions from
//! [`Graph::is_directed`], not the declared graph type.

use fixedbitset::FixedBitSet;
use graphkit_core::traversal::{Follow, dfs_preorder, finishing_order, reachable_from};
use graphkit_core::{Graph, GraphError};
use serde::Serialize;
use tracing::{debug, instrument};

/// Result of an undirected connectivity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    pub connected: bool,
    /// Vertices reached from the first vertex, in discovery order.
    pub reached: Vec<String>,
    /// Vertices not reached, in vertex order.
    pub unreached: Vec<String>,
}

/// DFS from the first vertex of a symmetric graph.
///
/// The empty graph is reported as connected.
///
/// # Errors
///
/// Returns [`GraphError::NotApplicable`] when the weights are asymmetric.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn undirected_connectivity(graph: &Graph) -> Result<ConnectivityReport, GraphError> {
    if graph.is_directed() {
        return Err(GraphError::not_applicable(
            "undirected connectivity",
            "graph is directed",
        ));
    }

    let n = graph.vertex_count();
    if n == 0 {
        return Ok(ConnectivityReport {
            connected: true,
            reached: Vec::new(),
            unreached: Vec::new(),
        });
    }

    let mut visited = FixedBitSet::with_capacity(n);
    let reached: Vec<String> = dfs_preorder(graph, 0, Follow::Outgoing, &mut visited)
        .into_iter()
        .map(|v| graph.label(v).to_string())
        .collect();
    let unreached: Vec<String> = (0..n)
        .filter(|&v| !visited.contains(v))
        .map(|v| graph.label(v).to_string())
        .collect();

    Ok(ConnectivityReport {
        connected: unreached.is_empty(),
        reached,
        unreached,
    })
}

/// Shorthand for [`undirected_connectivity`]`(graph)?.connected`.
///
/// # Errors
///
/// Same as [`undirected_connectivity`].
pub fn is_connected(graph: &Graph) -> Result<bool, GraphError> {
    Ok(undirected_connectivity(graph)?.connected)
}

/// Vertices with at least one incident edge (either direction, self-loops
/// included).
#[must_use]
pub fn non_isolated_vertices(graph: &Graph) -> FixedBitSet {
    let n = graph.vertex_count();
    let mut touched = FixedBitSet::with_capacity(n);
    for u in 0..n {
        for (v, _) in graph.neighbors(u) {
            touched.insert(u);
            touched.insert(v);
        }
    }
    touched
}

/// Weak connectivity over the non-isolated vertices.
///
/// Isolated vertices are ignored. A graph with no edges at all is reported
/// as *not* weakly connected, since there is nothing to traverse.
#[must_use]
pub fn is_weakly_connected(graph: &Graph) -> bool {
    let touched = non_isolated_vertices(graph);
    let Some(start) = touched.ones().next() else {
        return false;
    };
    let reached = reachable_from(graph, start, Follow::Either);
    touched.is_subset(&reached)
}

/// Strongly connected components by Kosaraju's algorithm.
///
/// The first pass records DFS finishing order; the second pass pops that
/// order and runs DFS on the transposed graph. Each second-pass tree is one
/// component, listed in discovery order.
///
/// # Errors
///
/// Returns [`GraphError::NotApplicable`] when the weights are symmetric:
/// components only carry meaning for directed graphs.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn strongly_connected_components(graph: &Graph) -> Result<Vec<Vec<String>>, GraphError> {
    if !graph.is_directed() {
        return Err(GraphError::not_applicable(
            "strongly connected components",
            "graph is not directed",
        ));
    }

    let finished = finishing_order(graph);
    let transposed = graph.transpose();

    let mut visited = FixedBitSet::with_capacity(graph.vertex_count());
    let mut components = Vec::new();
    for &root in finished.iter().rev() {
        if visited.contains(root) {
            continue;
        }
        let members = dfs_preorder(&transposed, root, Follow::Outgoing, &mut visited);
        components.push(
            members
                .into_iter()
                .map(|v| graph.label(v).to_string())
                .collect::<Vec<_>>(),
        );
    }

    debug!(components = components.len(), "kosaraju complete");
    Ok(components)
}
