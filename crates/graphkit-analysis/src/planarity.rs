//! Planarity heuristic: Euler edge bound plus a forbidden-subgraph scan.
//!
//! # Incompleteness
//!
//! This is not a planarity test. The scan only looks for K5 on exactly five
//! vertices and K3,3 on exactly six, where the six are split into the first
//! three and last three in vertex order. Subdivisions (topological minors)
//! are never found, and a K3,3 whose sides interleave in vertex order is
//! missed. A [`PlanarityVerdict::ProbablyPlanar`] answer therefore only
//! means "no witness found". A [`PlanarityVerdict::NonPlanar`] answer is
//! always correct.
//!
//! Adjacency ignores direction and self-loops: `u` and `v` are adjacent when
//! either `weight(u, v)` or `weight(v, u)` is nonzero.
//!
//! The scan enumerates every 5- and 6-subset, so it is refused above
//! [`AnalysisLimits::planarity_max_vertices`].

use graphkit_core::traversal::Follow;
use graphkit_core::{AnalysisLimits, Graph, GraphError};
use serde::Serialize;
use tracing::{debug, instrument};

/// Why a graph was rejected as non-planar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NonPlanarWitness {
    /// More edges than `3v - 6`.
    EdgeBound {
        vertices: usize,
        edges: usize,
        bound: usize,
    },
    /// Five mutually adjacent vertices.
    K5 { vertices: Vec<String> },
    /// Two triples, every cross pair adjacent and no pair within a triple.
    K33 { left: Vec<String>, right: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum PlanarityVerdict {
    ProbablyPlanar,
    NonPlanar { witness: NonPlanarWitness },
}

impl PlanarityVerdict {
    #[must_use]
    pub const fn is_non_planar(&self) -> bool {
        matches!(self, Self::NonPlanar { .. })
    }
}

fn adjacent(graph: &Graph, u: usize, v: usize) -> bool {
    u != v && Follow::Either.connects(graph, u, v)
}

/// Number of distinct unordered adjacent pairs.
#[must_use]
pub fn undirected_edge_count(graph: &Graph) -> usize {
    let n = graph.vertex_count();
    (0..n)
        .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
        .filter(|&(u, v)| adjacent(graph, u, v))
        .count()
}

/// Advance `indices` to the next `k`-combination of `0..n` in lexicographic
/// order. Returns `false` once the last combination has been passed.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let Some(i) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
        return false;
    };
    indices[i] += 1;
    for j in i + 1..k {
        indices[j] = indices[j - 1] + 1;
    }
    true
}

fn for_each_combination<T>(
    n: usize,
    k: usize,
    mut visit: impl FnMut(&[usize]) -> Option<T>,
) -> Option<T> {
    if k > n {
        return None;
    }
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        if let Some(found) = visit(&indices) {
            return Some(found);
        }
        if !next_combination(&mut indices, n) {
            return None;
        }
    }
}

fn labels(graph: &Graph, indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| graph.label(i).to_string()).collect()
}

fn find_k5(graph: &Graph) -> Option<NonPlanarWitness> {
    for_each_combination(graph.vertex_count(), 5, |subset| {
        let complete = subset
            .iter()
            .enumerate()
            .all(|(i, &u)| subset[i + 1..].iter().all(|&v| adjacent(graph, u, v)));
        complete.then(|| NonPlanarWitness::K5 {
            vertices: labels(graph, subset),
        })
    })
}

fn independent_triple(graph: &Graph, triple: &[usize]) -> bool {
    triple
        .iter()
        .enumerate()
        .all(|(i, &u)| triple[i + 1..].iter().all(|&v| !adjacent(graph, u, v)))
}

fn find_k33(graph: &Graph) -> Option<NonPlanarWitness> {
    for_each_combination(graph.vertex_count(), 6, |subset| {
        let (left, right) = subset.split_at(3);
        let bipartite = left
            .iter()
            .all(|&u| right.iter().all(|&v| adjacent(graph, u, v)))
            && independent_triple(graph, left)
            && independent_triple(graph, right);
        bipartite.then(|| NonPlanarWitness::K33 {
            left: labels(graph, left),
            right: labels(graph, right),
        })
    })
}

/// Run the planarity heuristic.
///
/// The edge bound is applied first and needs no size gate. Only graphs that
/// pass it are subject to `limits.planarity_max_vertices` before the
/// subgraph scan.
///
/// # Errors
///
/// Returns [`GraphError::SizeLimitExceeded`] when the scan would be needed
/// on a graph above the configured ceiling.
#[instrument(skip(graph, limits), fields(vertices = graph.vertex_count()))]
pub fn check_planarity(
    graph: &Graph,
    limits: &AnalysisLimits,
) -> Result<PlanarityVerdict, GraphError> {
    let vertices = graph.vertex_count();
    let edges = undirected_edge_count(graph);

    if vertices >= 3 {
        let bound = 3 * vertices - 6;
        if edges > bound {
            debug!(edges, bound, "rejected by edge bound");
            return Ok(PlanarityVerdict::NonPlanar {
                witness: NonPlanarWitness::EdgeBound {
                    vertices,
                    edges,
                    bound,
                },
            });
        }
    }

    graph.ensure_at_most("planarity scan", limits.planarity_max_vertices)?;

    match find_k5(graph).or_else(|| find_k33(graph)) {
        Some(witness) => {
            debug!(?witness, "forbidden subgraph found");
            Ok(PlanarityVerdict::NonPlanar { witness })
        }
        None => Ok(PlanarityVerdict::ProbablyPlanar),
    }
}
