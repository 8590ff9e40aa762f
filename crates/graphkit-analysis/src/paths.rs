//! Shortest paths: BFS, Dijkstra and Bellman-Ford.
//!
//! # Selection
//!
//! [`shortest_path`] never runs Dijkstra where it could be wrong:
//!
//! 1. A Bellman-Ford probe from the source checks for a reachable negative
//!    cycle. If one exists, Bellman-Ford answers and every vertex reachable
//!    from the cycle is reported with cost `-inf` and no path.
//! 2. Otherwise, if any edge is negative, Bellman-Ford answers.
//! 3. Otherwise Dijkstra answers.
//!
//! "No path" is a result, not an error: `path` is `None` and `cost` is
//! `+inf`.
//!
//! # Tie-breaks
//!
//! Neighbours are scanned in vertex order and a predecessor is replaced only
//! on strict improvement, so the first-found route wins among equal costs.
//! Dijkstra's queue breaks cost ties by the lower vertex index.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};

use fixedbitset::FixedBitSet;
use graphkit_core::traversal::{Follow, dfs_preorder};
use graphkit_core::{Graph, GraphError};
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    Bfs,
    Dijkstra,
    BellmanFord,
}

/// A single-pair shortest-path answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub source: String,
    pub target: String,
    /// Vertices from `source` to `target` inclusive, or `None` when the
    /// target is unreachable or its cost is unbounded.
    pub path: Option<Vec<String>>,
    /// Total weight (hop count for BFS). `+inf` when unreachable, `-inf`
    /// when a negative cycle makes it unbounded.
    pub cost: f64,
    /// `vertex -> predecessor` for every vertex with a bounded tentative
    /// cost that was reached through another vertex.
    pub predecessors: BTreeMap<String, String>,
    pub algorithm: PathAlgorithm,
    /// A negative cycle is reachable from `source`.
    pub negative_cycle: bool,
}

impl PathResult {
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.path.is_some()
    }

    /// Rebuild the path from `predecessors` alone.
    #[must_use]
    pub fn reconstruct_path(&self) -> Option<Vec<String>> {
        if !self.cost.is_finite() {
            return None;
        }
        let mut path = vec![self.target.clone()];
        let mut current = self.target.as_str();
        while current != self.source {
            if path.len() > self.predecessors.len() + 1 {
                return None;
            }
            current = self.predecessors.get(current).map(String::as_str)?;
            path.push(current.to_string());
        }
        path.reverse();
        Some(path)
    }
}

/// BFS answer: the path plus the level of every discovered vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BfsResult {
    pub path: PathResult,
    pub levels: BTreeMap<String, usize>,
}

// ---------------------------------------------------------------------------
// Shared bookkeeping
// ---------------------------------------------------------------------------

struct Search {
    cost: Vec<f64>,
    predecessor: Vec<Option<usize>>,
}

impl Search {
    fn new(n: usize, source: usize) -> Self {
        let mut cost = vec![f64::INFINITY; n];
        cost[source] = 0.0;
        Self {
            cost,
            predecessor: vec![None; n],
        }
    }

    fn path_to(&self, source: usize, target: usize) -> Option<Vec<usize>> {
        if !self.cost[target].is_finite() {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while current != source {
            if path.len() > self.cost.len() {
                return None;
            }
            current = self.predecessor[current]?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    fn into_result(
        self,
        graph: &Graph,
        (source, target): (usize, usize),
        algorithm: PathAlgorithm,
        negative_cycle: bool,
    ) -> PathResult {
        let path = self.path_to(source, target).map(|path| {
            path.into_iter()
                .map(|v| graph.label(v).to_string())
                .collect()
        });
        let predecessors = self
            .predecessor
            .iter()
            .enumerate()
            .filter(|&(v, _)| self.cost[v].is_finite())
            .filter_map(|(v, p)| p.map(|p| (graph.label(v).to_string(), graph.label(p).to_string())))
            .collect();
        PathResult {
            source: graph.label(source).to_string(),
            target: graph.label(target).to_string(),
            path,
            cost: self.cost[target],
            predecessors,
            algorithm,
            negative_cycle,
        }
    }
}

fn endpoints(graph: &Graph, source: &str, target: &str) -> Result<(usize, usize), GraphError> {
    Ok((graph.index_of(source)?, graph.index_of(target)?))
}

// ---------------------------------------------------------------------------
// BFS
// ---------------------------------------------------------------------------

/// Unweighted shortest path by breadth-first search.
///
/// Weights are ignored; any nonzero entry is an edge. Vertices are marked
/// on discovery, so each keeps the first predecessor that found it. The
/// search stops as soon as `target` leaves the queue.
///
/// # Errors
///
/// Returns [`GraphError::UnknownVertex`] for an absent endpoint.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn bfs(graph: &Graph, source: &str, target: &str) -> Result<BfsResult, GraphError> {
    let (s, t) = endpoints(graph, source, target)?;
    let n = graph.vertex_count();

    let mut search = Search::new(n, s);
    let mut level = vec![None; n];
    level[s] = Some(0_usize);
    let mut queue = VecDeque::from([s]);

    while let Some(u) = queue.pop_front() {
        if u == t {
            break;
        }
        let next_level = level[u].map_or(0, |l| l + 1);
        for (v, _) in graph.neighbors(u) {
            if level[v].is_none() {
                level[v] = Some(next_level);
                search.predecessor[v] = Some(u);
                #[allow(clippy::cast_precision_loss)]
                let hops = next_level as f64;
                search.cost[v] = hops;
                queue.push_back(v);
            }
        }
    }

    let levels = level
        .iter()
        .enumerate()
        .filter_map(|(v, l)| l.map(|l| (graph.label(v).to_string(), l)))
        .collect();
    Ok(BfsResult {
        path: search.into_result(graph, (s, t), PathAlgorithm::Bfs, false),
        levels,
    })
}

// ---------------------------------------------------------------------------
// Dijkstra
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    vertex: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed for a min-heap: lowest cost, then lowest index, pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

fn dijkstra_search(graph: &Graph, s: usize, t: usize) -> Search {
    let n = graph.vertex_count();
    let mut search = Search::new(n, s);
    let mut settled = FixedBitSet::with_capacity(n);
    let mut heap = BinaryHeap::from([Frontier {
        cost: 0.0,
        vertex: s,
    }]);

    while let Some(Frontier { cost, vertex: u }) = heap.pop() {
        if settled.put(u) {
            continue;
        }
        if u == t {
            break;
        }
        for (v, w) in graph.neighbors(u) {
            if settled.contains(v) {
                continue;
            }
            let candidate = cost + w;
            if candidate < search.cost[v] {
                search.cost[v] = candidate;
                search.predecessor[v] = Some(u);
                heap.push(Frontier {
                    cost: candidate,
                    vertex: v,
                });
            }
        }
    }
    search
}

/// Dijkstra's algorithm with lazy deletion of stale queue entries.
///
/// # Errors
///
/// - [`GraphError::UnknownVertex`] for an absent endpoint.
/// - [`GraphError::NotApplicable`] if any edge weight is negative.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn dijkstra(graph: &Graph, source: &str, target: &str) -> Result<PathResult, GraphError> {
    let (s, t) = endpoints(graph, source, target)?;
    if graph.has_negative_edge() {
        return Err(GraphError::not_applicable(
            "dijkstra",
            "graph has negative edge weights",
        ));
    }
    Ok(dijkstra_search(graph, s, t).into_result(graph, (s, t), PathAlgorithm::Dijkstra, false))
}

// ---------------------------------------------------------------------------
// Bellman-Ford
// ---------------------------------------------------------------------------

/// One relaxation pass over every edge in row-major order. Returns whether
/// any cost improved.
fn relax_all(graph: &Graph, search: &mut Search) -> bool {
    let mut improved = false;
    for u in 0..graph.vertex_count() {
        let base = search.cost[u];
        if !base.is_finite() {
            continue;
        }
        for (v, w) in graph.neighbors(u) {
            if base + w < search.cost[v] {
                search.cost[v] = base + w;
                search.predecessor[v] = Some(u);
                improved = true;
            }
        }
    }
    improved
}

/// `|V| - 1` relaxation rounds, then one probing round. Returns the search
/// and the set of vertices whose cost is unbounded below.
fn bellman_ford_search(graph: &Graph, s: usize) -> (Search, FixedBitSet) {
    let n = graph.vertex_count();
    let mut search = Search::new(n, s);
    for _ in 1..n {
        if !relax_all(graph, &mut search) {
            break;
        }
    }

    let mut relaxable = FixedBitSet::with_capacity(n);
    for u in 0..n {
        let base = search.cost[u];
        if !base.is_finite() {
            continue;
        }
        for (v, w) in graph.neighbors(u) {
            if base + w < search.cost[v] {
                relaxable.insert(v);
            }
        }
    }

    let mut unbounded = FixedBitSet::with_capacity(n);
    for v in relaxable.ones() {
        dfs_preorder(graph, v, Follow::Outgoing, &mut unbounded);
    }
    for v in unbounded.ones() {
        search.cost[v] = f64::NEG_INFINITY;
        search.predecessor[v] = None;
    }
    (search, unbounded)
}

/// `true` if a negative cycle is reachable from `source`.
///
/// # Errors
///
/// Returns [`GraphError::UnknownVertex`] for an absent source.
pub fn negative_cycle_reachable(graph: &Graph, source: &str) -> Result<bool, GraphError> {
    let s = graph.index_of(source)?;
    let (_, unbounded) = bellman_ford_search(graph, s);
    Ok(unbounded.ones().next().is_some())
}

/// Bellman-Ford from `source`, reporting the path to `target`.
///
/// Targets reachable from a negative cycle get cost `-inf` and no path.
///
/// # Errors
///
/// Returns [`GraphError::UnknownVertex`] for an absent endpoint.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn bellman_ford(graph: &Graph, source: &str, target: &str) -> Result<PathResult, GraphError> {
    let (s, t) = endpoints(graph, source, target)?;
    let (search, unbounded) = bellman_ford_search(graph, s);
    let negative_cycle = unbounded.ones().next().is_some();
    Ok(search.into_result(graph, (s, t), PathAlgorithm::BellmanFord, negative_cycle))
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Weighted shortest path with automatic algorithm selection.
///
/// # Errors
///
/// - [`GraphError::UnknownVertex`] for an absent endpoint.
/// - [`GraphError::NotApplicable`] for an unweighted graph; use [`bfs`].
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn shortest_path(graph: &Graph, source: &str, target: &str) -> Result<PathResult, GraphError> {
    let (s, t) = endpoints(graph, source, target)?;
    if !graph.is_weighted() {
        return Err(GraphError::not_applicable(
            "shortest path",
            "graph has no weights",
        ));
    }

    let (search, unbounded) = bellman_ford_search(graph, s);
    if unbounded.ones().next().is_some() {
        debug!("negative cycle reachable; switching to Bellman-Ford");
        return Ok(search.into_result(graph, (s, t), PathAlgorithm::BellmanFord, true));
    }
    if graph.has_negative_edge() {
        debug!("negative edge present; using Bellman-Ford");
        return Ok(search.into_result(graph, (s, t), PathAlgorithm::BellmanFord, false));
    }

    Ok(dijkstra_search(graph, s, t).into_result(graph, (s, t), PathAlgorithm::Dijkstra, false))
}
