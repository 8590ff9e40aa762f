//! Eulerian circuit detection and construction (Hierholzer).
//!
//! # Conditions
//!
//! A graph whose weights are asymmetric is treated as directed: it is
//! Eulerian iff every vertex has in-degree equal to out-degree and the
//! non-isolated vertices are weakly connected. A symmetric graph is treated
//! as undirected: every vertex needs even degree and the non-isolated
//! vertices must be connected. A graph with no edges has no circuit.
//!
//! An undirected self-loop contributes 2 to its vertex's degree and is
//! walked once.
//!
//! # Construction
//!
//! Hierholzer's algorithm runs over a private copy of the out-neighbour
//! lists. The walk always takes the *last* remaining neighbour. Undirected
//! edges are removed from both endpoint lists as they are used.

use std::fmt;

use graphkit_core::{Graph, GraphError};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::connectivity::is_weakly_connected;

/// A closed walk that uses every edge exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EulerianCircuit {
    /// Whether the directed rules were applied.
    pub directed: bool,
    pub start: String,
    /// Vertex sequence; first and last entries are both `start`.
    pub circuit: Vec<String>,
}

impl EulerianCircuit {
    /// Number of edges walked.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.circuit.len().saturating_sub(1)
    }
}

/// The first reason a graph fails the Eulerian conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EulerianObstruction {
    Unbalanced {
        vertex: String,
        in_degree: usize,
        out_degree: usize,
    },
    OddDegree {
        vertex: String,
        degree: usize,
    },
    NoEdges,
    Disconnected,
}

impl fmt::Display for EulerianObstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbalanced {
                vertex,
                in_degree,
                out_degree,
            } => write!(
                f,
                "vertex {vertex} has in-degree {in_degree} but out-degree {out_degree}"
            ),
            Self::OddDegree { vertex, degree } => {
                write!(f, "vertex {vertex} has odd degree {degree}")
            }
            Self::NoEdges => f.write_str("graph has no edges"),
            Self::Disconnected => f.write_str("edges span more than one component"),
        }
    }
}

impl EulerianObstruction {
    fn into_error(self) -> GraphError {
        match self {
            Self::NoEdges | Self::Disconnected => GraphError::Disconnected {
                operation: "eulerian circuit",
            },
            obstruction => GraphError::not_applicable("eulerian circuit", obstruction.to_string()),
        }
    }
}

fn undirected_degree(graph: &Graph, u: usize) -> usize {
    let loops = usize::from(graph.weight_at(u, u).is_edge());
    graph.out_degree(u) + loops
}

/// The first failed Eulerian condition, or `None` if the graph is Eulerian.
///
/// Degree conditions are checked before connectivity, vertex by vertex.
#[must_use]
pub fn eulerian_obstruction(graph: &Graph) -> Option<EulerianObstruction> {
    let n = graph.vertex_count();
    if graph.is_directed() {
        for v in 0..n {
            let (in_degree, out_degree) = (graph.in_degree(v), graph.out_degree(v));
            if in_degree != out_degree {
                return Some(EulerianObstruction::Unbalanced {
                    vertex: graph.label(v).to_string(),
                    in_degree,
                    out_degree,
                });
            }
        }
    } else {
        for v in 0..n {
            let degree = undirected_degree(graph, v);
            if degree % 2 != 0 {
                return Some(EulerianObstruction::OddDegree {
                    vertex: graph.label(v).to_string(),
                    degree,
                });
            }
        }
    }

    if graph.edge_count() == 0 {
        return Some(EulerianObstruction::NoEdges);
    }
    if !is_weakly_connected(graph) {
        return Some(EulerianObstruction::Disconnected);
    }
    None
}

#[must_use]
pub fn is_eulerian(graph: &Graph) -> bool {
    eulerian_obstruction(graph).is_none()
}

/// Build an Eulerian circuit starting from the first vertex that has an
/// outgoing edge.
///
/// # Errors
///
/// - [`GraphError::NotApplicable`] when a degree condition fails.
/// - [`GraphError::Disconnected`] when the graph has no edges or its edges
///   are not connected.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn eulerian_circuit(graph: &Graph) -> Result<EulerianCircuit, GraphError> {
    if let Some(obstruction) = eulerian_obstruction(graph) {
        debug!(%obstruction, "not eulerian");
        return Err(obstruction.into_error());
    }

    let directed = graph.is_directed();
    let n = graph.vertex_count();
    let Some(start) = (0..n).find(|&u| graph.out_degree(u) > 0) else {
        return Err(EulerianObstruction::NoEdges.into_error());
    };

    let mut remaining: Vec<Vec<usize>> = (0..n)
        .map(|u| graph.neighbors(u).map(|(v, _)| v).collect())
        .collect();

    let mut stack = Vec::new();
    let mut walk = Vec::with_capacity(graph.edge_count() + 1);
    let mut current = start;
    loop {
        match remaining[current].pop() {
            Some(next) => {
                if !directed && next != current {
                    if let Some(pos) = remaining[next].iter().position(|&v| v == current) {
                        remaining[next].remove(pos);
                    }
                }
                stack.push(current);
                current = next;
            }
            None => match stack.pop() {
                Some(previous) => {
                    walk.push(current);
                    current = previous;
                }
                None => break,
            },
        }
    }
    walk.push(current);
    walk.reverse();

    debug!(edges = walk.len() - 1, directed, "circuit built");
    Ok(EulerianCircuit {
        directed,
        start: graph.label(start).to_string(),
        circuit: walk.into_iter().map(|v| graph.label(v).to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphkit_core::GraphKind;

    fn graph(kind: GraphKind, vertices: &[&str], edges: &[(&str, &str)]) -> Graph {
        let edges: Vec<(&str, &str, f64)> = edges.iter().map(|&(a, b)| (a, b, 1.0)).collect();
        Graph::from_edges(kind, false, vertices, &edges).expect("valid graph")
    }

    #[test]
    fn directed_triangle_walks_forward() {
        let g = graph(
            GraphKind::Directed,
            &["A", "B", "C"],
            &[("A", "B"), ("B", "C"), ("C", "A")],
        );
        let circuit = eulerian_circuit(&g).expect("eulerian");
        assert!(circuit.directed);
        assert_eq!(circuit.circuit, vec!["A", "B", "C", "A"]);
        assert_eq!(circuit.edge_count(), 3);
    }

    #[test]
    fn undirected_square_takes_last_neighbour_first() {
        let g = graph(
            GraphKind::Undirected,
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        let circuit = eulerian_circuit(&g).expect("eulerian");
        assert!(!circuit.directed);
        assert_eq!(circuit.circuit, vec!["A", "D", "C", "B", "A"]);
    }

    #[test]
    fn bowtie_uses_every_edge_once() {
        let g = graph(
            GraphKind::Undirected,
            &["A", "B", "C", "D", "E"],
            &[
                ("A", "B"),
                ("B", "C"),
                ("C", "A"),
                ("C", "D"),
                ("D", "E"),
                ("E", "C"),
            ],
        );
        let circuit = eulerian_circuit(&g).expect("eulerian");
        assert_eq!(circuit.edge_count(), 6);
        assert_eq!(circuit.circuit.first(), circuit.circuit.last());

        let mut walked: Vec<(String, String)> = circuit
            .circuit
            .windows(2)
            .map(|w| {
                let (a, b) = (w[0].clone(), w[1].clone());
                if a < b { (a, b) } else { (b, a) }
            })
            .collect();
        walked.sort();
        walked.dedup();
        assert_eq!(walked.len(), 6);
    }

    #[test]
    fn self_loop_counts_twice_and_is_walked_once() {
        let g = graph(
            GraphKind::Undirected,
            &["A", "B", "C"],
            &[("A", "B"), ("B", "C"), ("C", "A"), ("A", "A")],
        );
        let circuit = eulerian_circuit(&g).expect("eulerian");
        assert_eq!(circuit.edge_count(), 4);
        assert_eq!(circuit.start, "A");
    }

    #[test]
    fn isolated_leading_vertex_is_skipped_as_start() {
        let g = graph(
            GraphKind::Directed,
            &["Lonely", "A", "B", "C"],
            &[("A", "B"), ("B", "C"), ("C", "A")],
        );
        let circuit = eulerian_circuit(&g).expect("eulerian");
        assert_eq!(circuit.start, "A");
        assert_eq!(circuit.edge_count(), 3);
    }

    #[test]
    fn unbalanced_vertex_is_reported() {
        let g = graph(GraphKind::Directed, &["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        assert_eq!(
            eulerian_obstruction(&g),
            Some(EulerianObstruction::Unbalanced {
                vertex: "A".to_string(),
                in_degree: 0,
                out_degree: 1,
            })
        );
        assert!(matches!(
            eulerian_circuit(&g),
            Err(GraphError::NotApplicable { .. })
        ));
    }

    #[test]
    fn odd_degree_is_reported() {
        let g = graph(GraphKind::Undirected, &["A", "B"], &[("A", "B")]);
        assert_eq!(
            eulerian_obstruction(&g),
            Some(EulerianObstruction::OddDegree {
                vertex: "A".to_string(),
                degree: 1,
            })
        );
    }

    #[test]
    fn two_separate_cycles_are_disconnected() {
        let g = graph(
            GraphKind::Directed,
            &["A", "B", "C", "D", "E", "F"],
            &[
                ("A", "B"),
                ("B", "C"),
                ("C", "A"),
                ("D", "E"),
                ("E", "F"),
                ("F", "D"),
            ],
        );
        assert_eq!(
            eulerian_obstruction(&g),
            Some(EulerianObstruction::Disconnected)
        );
        assert_eq!(
            eulerian_circuit(&g),
            Err(GraphError::Disconnected {
                operation: "eulerian circuit"
            })
        );
    }

    #[test]
    fn edgeless_graph_is_not_eulerian() {
        let g = graph(GraphKind::Undirected, &["A", "B"], &[]);
        assert_eq!(eulerian_obstruction(&g), Some(EulerianObstruction::NoEdges));
        assert!(!is_eulerian(&g));
    }

    #[test]
    fn input_graph_is_untouched() {
        let g = graph(
            GraphKind::Directed,
            &["A", "B"],
            &[("A", "B"), ("B", "A")],
        );
        let before = g.clone();
        eulerian_circuit(&g).expect("eulerian");
        assert_eq!(g, before);
    }
}
