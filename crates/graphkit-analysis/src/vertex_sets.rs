//! Membership checks for caller-chosen vertex sets.
//!
//! Pairwise checks walk the list in the order given and test adjacency from
//! the earlier vertex to the later one (`weight(earlier, later) != 0`), so
//! on a directed graph the answer depends on list order.

use fixedbitset::FixedBitSet;
use graphkit_core::{Graph, GraphError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum IndependenceVerdict {
    Independent,
    /// The first adjacent pair found.
    Adjacent { first: String, second: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum CliqueVerdict {
    Clique,
    /// The first non-adjacent pair found.
    MissingEdge { first: String, second: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum DominationVerdict {
    /// Some vertices are neither in the set nor an out-neighbour of it.
    NotDominating { missing: Vec<String> },
    /// Dominating, but `redundant` can be dropped and it still dominates.
    NotMinimal { redundant: String },
    MinimalDominating,
}

fn resolve(graph: &Graph, set: &[&str]) -> Result<Vec<usize>, GraphError> {
    set.iter().map(|label| graph.index_of(label)).collect()
}

fn first_pair(
    graph: &Graph,
    members: &[usize],
    mut stop: impl FnMut(usize, usize) -> bool,
) -> Option<(String, String)> {
    members.iter().enumerate().find_map(|(i, &u)| {
        members[i + 1..]
            .iter()
            .find(|&&v| stop(u, v))
            .map(|&v| (graph.label(u).to_string(), graph.label(v).to_string()))
    })
}

/// Is no pair in `set` adjacent?
///
/// # Errors
///
/// Returns [`GraphError::UnknownVertex`] for a label not in the graph.
pub fn check_independent_set(
    graph: &Graph,
    set: &[&str],
) -> Result<IndependenceVerdict, GraphError> {
    let members = resolve(graph, set)?;
    Ok(
        match first_pair(graph, &members, |u, v| graph.weight_at(u, v).is_edge()) {
            Some((first, second)) => IndependenceVerdict::Adjacent { first, second },
            None => IndependenceVerdict::Independent,
        },
    )
}

/// Is every pair in `set` adjacent?
///
/// # Errors
///
/// Returns [`GraphError::UnknownVertex`] for a label not in the graph.
pub fn check_clique(graph: &Graph, set: &[&str]) -> Result<CliqueVerdict, GraphError> {
    let members = resolve(graph, set)?;
    Ok(
        match first_pair(graph, &members, |u, v| !graph.weight_at(u, v).is_edge()) {
            Some((first, second)) => CliqueVerdict::MissingEdge { first, second },
            None => CliqueVerdict::Clique,
        },
    )
}

fn covered_by(graph: &Graph, members: impl Iterator<Item = usize>) -> FixedBitSet {
    let mut covered = FixedBitSet::with_capacity(graph.vertex_count());
    for u in members {
        covered.insert(u);
        for (v, _) in graph.neighbors(u) {
            covered.insert(v);
        }
    }
    covered
}

/// Is `set` a dominating set, and if so, a minimal one?
///
/// A vertex is covered when it is in the set or an out-neighbour of a
/// member. Duplicate labels count once. `missing` lists uncovered vertices
/// in vertex order; `redundant` is the first member, in list order, whose
/// removal leaves the set dominating.
///
/// # Errors
///
/// Returns [`GraphError::UnknownVertex`] for a label not in the graph.
pub fn check_dominating_set(
    graph: &Graph,
    set: &[&str],
) -> Result<DominationVerdict, GraphError> {
    let n = graph.vertex_count();
    let mut seen = FixedBitSet::with_capacity(n);
    let members: Vec<usize> = resolve(graph, set)?
        .into_iter()
        .filter(|&u| !seen.put(u))
        .collect();

    let covered = covered_by(graph, members.iter().copied());
    if covered.count_ones(..) < n {
        let missing = (0..n)
            .filter(|&v| !covered.contains(v))
            .map(|v| graph.label(v).to_string())
            .collect();
        return Ok(DominationVerdict::NotDominating { missing });
    }

    for &dropped in &members {
        let rest = members.iter().copied().filter(|&u| u != dropped);
        if covered_by(graph, rest).count_ones(..) == n {
            return Ok(DominationVerdict::NotMinimal {
                redundant: graph.label(dropped).to_string(),
            });
        }
    }
    Ok(DominationVerdict::MinimalDominating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphkit_core::GraphKind;

    /// Path A - B - C - D.
    fn path() -> Graph {
        Graph::from_edges(
            GraphKind::Undirected,
            false,
            &["A", "B", "C", "D"],
            &[("A", "B", 1.0), ("B", "C", 1.0), ("C", "D", 1.0)],
        )
        .expect("valid graph")
    }

    #[test]
    fn independent_set_and_first_conflict() {
        let g = path();
        assert_eq!(
            check_independent_set(&g, &["A", "C"]).expect("known"),
            IndependenceVerdict::Independent
        );
        assert_eq!(
            check_independent_set(&g, &["A", "D", "C"]).expect("known"),
            IndependenceVerdict::Adjacent {
                first: "D".to_string(),
                second: "C".to_string()
            }
        );
    }

    #[test]
    fn directed_adjacency_follows_list_order() {
        let g = Graph::from_edges(GraphKind::Directed, false, &["A", "B"], &[("B", "A", 1.0)])
            .expect("valid graph");
        assert_eq!(
            check_independent_set(&g, &["A", "B"]).expect("known"),
            IndependenceVerdict::Independent
        );
        assert!(matches!(
            check_independent_set(&g, &["B", "A"]).expect("known"),
            IndependenceVerdict::Adjacent { .. }
        ));
    }

    #[test]
    fn clique_checks() {
        let g = path();
        assert_eq!(
            check_clique(&g, &["B", "C"]).expect("known"),
            CliqueVerdict::Clique
        );
        assert_eq!(
            check_clique(&g, &["A", "B", "C"]).expect("known"),
            CliqueVerdict::MissingEdge {
                first: "A".to_string(),
                second: "C".to_string()
            }
        );
        assert_eq!(check_clique(&g, &[]).expect("empty"), CliqueVerdict::Clique);
    }

    #[test]
    fn minimal_dominating_set() {
        let g = path();
        assert_eq!(
            check_dominating_set(&g, &["B", "C"]).expect("known"),
            DominationVerdict::MinimalDominating
        );
    }

    #[test]
    fn redundant_member_is_named() {
        let g = path();
        assert_eq!(
            check_dominating_set(&g, &["A", "B", "D"]).expect("known"),
            DominationVerdict::NotMinimal {
                redundant: "A".to_string()
            }
        );
    }

    #[test]
    fn missing_vertices_are_listed_in_vertex_order() {
        let g = path();
        assert_eq!(
            check_dominating_set(&g, &["A"]).expect("known"),
            DominationVerdict::NotDominating {
                missing: vec!["C".to_string(), "D".to_string()]
            }
        );
    }

    #[test]
    fn duplicates_count_once() {
        let g = path();
        assert_eq!(
            check_dominating_set(&g, &["B", "C", "B"]).expect("known"),
            DominationVerdict::MinimalDominating
        );
    }

    #[test]
    fn unknown_label_is_an_error() {
        let g = path();
        assert_eq!(
            check_clique(&g, &["A", "Q"]),
            Err(GraphError::UnknownVertex("Q".to_string()))
        );
    }
}
