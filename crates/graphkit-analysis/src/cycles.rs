//! Directed-cycle detection by three-colour depth-first search.
//!
//! # Algorithm
//!
//! DFS is started from every vertex that has not been finished, in vertex
//! order. A vertex is *in progress* while it sits on the DFS stack and
//! *done* once all of its neighbours have been tried. Reaching an
//! in-progress vertex is a back edge, i.e. a cycle.
//!
//! On a back edge the traversal from that root stops and the whole DFS
//! stack unwinds. Every vertex on the stack at that moment is flagged as
//! "involved in a cycle", deepest first. That includes ancestors that lead
//! into the cycle without being on it, and it can miss cycles that a
//! stopped traversal never reached. The flag set answers "which DFS paths
//! hit a back edge".
//!
//! Unwound vertices are never finished: they stay in progress. A later root
//! that is still in progress counts as one more cycle root without being
//! flagged again, and a later traversal that reaches one of them reports a
//! back edge and flags its own path. A triangle therefore reports three
//! cycle roots.

use fixedbitset::FixedBitSet;
use graphkit_core::Graph;
use graphkit_core::traversal::{DfsFrame, Follow};
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Colour {
    Unvisited,
    InProgress,
    Done,
}

/// Outcome of a full cycle scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Number of roots that hit a back edge or were left in progress by an
    /// earlier root.
    pub cycle_roots: usize,
    /// Vertices flagged while unwinding, in flag order.
    pub cycle_vertices: Vec<String>,
    /// Vertices in the scanned graph.
    pub vertex_count: usize,
}

impl CycleReport {
    #[must_use]
    pub const fn has_cycle(&self) -> bool {
        self.cycle_roots > 0
    }
}

/// Scan the whole graph for directed cycles.
///
/// Edges are the nonzero matrix entries, so an undirected edge stored in
/// both directions is itself a two-vertex cycle.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn detect_cycles(graph: &Graph) -> CycleReport {
    let n = graph.vertex_count();
    let mut colour = vec![Colour::Unvisited; n];
    let mut flagged = FixedBitSet::with_capacity(n);
    let mut cycle_vertices = Vec::new();
    let mut cycle_roots = 0;

    for root in 0..n {
        match colour[root] {
            Colour::Done => continue,
            Colour::InProgress => {
                cycle_roots += 1;
                continue;
            }
            Colour::Unvisited => {}
        }

        colour[root] = Colour::InProgress;
        let mut stack = vec![DfsFrame::new(root)];
        let mut found = false;

        while let Some(frame) = stack.last_mut() {
            match frame.advance(graph, Follow::Outgoing) {
                Some(next) => match colour[next] {
                    Colour::InProgress => {
                        found = true;
                        break;
                    }
                    Colour::Done => {}
                    Colour::Unvisited => {
                        colour[next] = Colour::InProgress;
                        stack.push(DfsFrame::new(next));
                    }
                },
                None => {
                    colour[frame.vertex] = Colour::Done;
                    stack.pop();
                }
            }
        }

        if found {
            cycle_roots += 1;
            debug!(root = graph.label(root), depth = stack.len(), "back edge found");
            while let Some(frame) = stack.pop() {
                if !flagged.put(frame.vertex) {
                    cycle_vertices.push(graph.label(frame.vertex).to_string());
                }
            }
        }
    }

    CycleReport {
        cycle_roots,
        cycle_vertices,
        vertex_count: n,
    }
}

/// `true` if any directed cycle exists.
#[must_use]
pub fn has_cycle(graph: &Graph) -> bool {
    detect_cycles(graph).has_cycle()
}
