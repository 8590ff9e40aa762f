//! Shared depth-first traversal primitives.
//!
//! # Explicit stacks
//!
//! Every traversal here keeps its own stack of [`DfsFrame`]s instead of
//! recursing, so deep graphs cannot overflow the native call stack. A frame
//! remembers the matrix column to resume scanning from, which reproduces
//! the visit order of the equivalent recursive DFS exactly: neighbours are
//! tried in vertex order, and a vertex finishes only after all of its
//! neighbours have been tried.
//!
//! Visited sets are [`FixedBitSet`]s indexed by vertex.

use fixedbitset::FixedBitSet;

use crate::model::Graph;

/// Which edges a traversal may follow from a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Follow {
    /// `u -> v` when `weight(u, v)` is nonzero.
    Outgoing,
    /// `u - v` when either `weight(u, v)` or `weight(v, u)` is nonzero.
    Either,
}

impl Follow {
    #[must_use]
    pub fn connects(self, graph: &Graph, u: usize, v: usize) -> bool {
        match self {
            Self::Outgoing => graph.weight_at(u, v).is_edge(),
            Self::Either => graph.weight_at(u, v).is_edge() || graph.weight_at(v, u).is_edge(),
        }
    }
}

/// One activation record of an iterative DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfsFrame {
    pub vertex: usize,
    next: usize,
}

impl DfsFrame {
    #[must_use]
    pub const fn new(vertex: usize) -> Self {
        Self { vertex, next: 0 }
    }

    /// The next neighbour of `self.vertex` after the last one returned.
    pub fn advance(&mut self, graph: &Graph, follow: Follow) -> Option<usize> {
        while self.next < graph.vertex_count() {
            let candidate = self.next;
            self.next += 1;
            if follow.connects(graph, self.vertex, candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// DFS from `start`, returning vertices in discovery (pre-)order.
///
/// Vertices already set in `visited` are skipped; every vertex reached is
/// marked. Returns an empty list if `start` was already visited.
pub fn dfs_preorder(
    graph: &Graph,
    start: usize,
    follow: Follow,
    visited: &mut FixedBitSet,
) -> Vec<usize> {
    let mut order = Vec::new();
    if visited.put(start) {
        return order;
    }
    order.push(start);

    let mut stack = vec![DfsFrame::new(start)];
    while let Some(frame) = stack.last_mut() {
        match frame.advance(graph, follow) {
            Some(next) => {
                if !visited.put(next) {
                    order.push(next);
                    stack.push(DfsFrame::new(next));
                }
            }
            None => {
                stack.pop();
            }
        }
    }
    order
}

/// DFS from `start`, appending vertices to `finished` as they finish.
///
/// Shares the `visited` contract of [`dfs_preorder`].
pub fn dfs_postorder(
    graph: &Graph,
    start: usize,
    follow: Follow,
    visited: &mut FixedBitSet,
    finished: &mut Vec<usize>,
) {
    if visited.put(start) {
        return;
    }

    let mut stack = vec![DfsFrame::new(start)];
    while let Some(frame) = stack.last_mut() {
        match frame.advance(graph, follow) {
            Some(next) => {
                if !visited.put(next) {
                    stack.push(DfsFrame::new(next));
                }
            }
            None => {
                finished.push(frame.vertex);
                stack.pop();
            }
        }
    }
}

/// Finishing order of a full DFS forest, roots tried in vertex order.
#[must_use]
pub fn finishing_order(graph: &Graph) -> Vec<usize> {
    let n = graph.vertex_count();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut finished = Vec::with_capacity(n);
    for root in 0..n {
        dfs_postorder(graph, root, Follow::Outgoing, &mut visited, &mut finished);
    }
    finished
}

/// Set of vertices reachable from `start` (including `start`).
#[must_use]
pub fn reachable_from(graph: &Graph, start: usize, follow: Follow) -> FixedBitSet {
    let mut visited = FixedBitSet::with_capacity(graph.vertex_count());
    dfs_preorder(graph, start, follow, &mut visited);
    visited
}
