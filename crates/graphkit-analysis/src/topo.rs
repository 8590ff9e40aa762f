//! Topological ordering by DFS post-order.

use graphkit_core::traversal::finishing_order;
use graphkit_core::{DagViolation, Graph, GraphError};
use tracing::{debug, instrument};

use crate::cycles::has_cycle;

/// Order the vertices so every edge's tail precedes its head.
///
/// DFS runs from every unvisited vertex in vertex order; each vertex is
/// recorded as it finishes and the finishing order is reversed.
///
/// # Errors
///
/// - [`GraphError::NotADag`] with [`DagViolation::Undirected`] when the
///   weights are symmetric. An edgeless graph is symmetric, so it lands here
///   too.
/// - [`GraphError::NotADag`] with [`DagViolation::Cyclic`] when a directed
///   cycle exists.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn topological_sort(graph: &Graph) -> Result<Vec<String>, GraphError> {
    if !graph.is_directed() {
        return Err(GraphError::NotADag(DagViolation::Undirected));
    }
    if has_cycle(graph) {
        debug!("cycle found; refusing to order");
        return Err(GraphError::NotADag(DagViolation::Cyclic));
    }

    Ok(finishing_order(graph)
        .into_iter()
        .rev()
        .map(|v| graph.label(v).to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphkit_core::GraphKind;

    fn directed(vertices: &[&str], edges: &[(&str, &str)]) -> Graph {
        let edges: Vec<(&str, &str, f64)> = edges.iter().map(|&(a, b)| (a, b, 1.0)).collect();
        Graph::from_edges(GraphKind::Directed, false, vertices, &edges).expect("valid graph")
    }

    #[test]
    fn chain_orders_in_edge_direction() {
        let g = directed(&["C", "B", "A"], &[("A", "B"), ("B", "C")]);
        assert_eq!(topological_sort(&g).expect("dag"), vec!["A", "B", "C"]);
    }

    #[test]
    fn diamond_follows_vertex_order_tie_break() {
        let g = directed(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        // Finishing order D, B, C, A.
        assert_eq!(topological_sort(&g).expect("dag"), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn disconnected_dag_includes_every_vertex() {
        let g = directed(&["A", "B", "X"], &[("A", "B")]);
        assert_eq!(topological_sort(&g).expect("dag"), vec!["X", "A", "B"]);
    }

    #[test]
    fn cyclic_graph_is_rejected() {
        let g = directed(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(
            topological_sort(&g),
            Err(GraphError::NotADag(DagViolation::Cyclic))
        );
    }

    #[test]
    fn symmetric_graph_is_rejected() {
        let g = Graph::from_edges(
            GraphKind::Undirected,
            false,
            &["A", "B"],
            &[("A", "B", 1.0)],
        )
        .expect("valid graph");
        assert_eq!(
            topological_sort(&g),
            Err(GraphError::NotADag(DagViolation::Undirected))
        );
    }

    #[test]
    fn edgeless_graph_counts_as_undirected() {
        let g = directed(&["A", "B"], &[]);
        assert_eq!(
            topological_sort(&g),
            Err(GraphError::NotADag(DagViolation::Undirected))
        );
    }
}
