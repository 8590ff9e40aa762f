#![forbid(unsafe_code)]
//! graphkit-analysis library.
//!
//! Pure analyzers over a [`graphkit_core::Graph`]. Each call allocates its
//! own working state and leaves the input untouched.
//!
//! # Conventions
//!
//! - **Errors**: Typed [`graphkit_core::GraphError`]. "No path" and
//!   "negative cycle" are results, not errors.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`). Entry points are
//!   `#[instrument]`ed with the graph skipped.
//! - **Traversal**: Depth-first work goes through the explicit-stack
//!   helpers in [`graphkit_core::traversal`]; nothing here recurses on graph
//!   depth.

pub mod assignment;
pub mod connectivity;
pub mod cycles;
pub mod eulerian;
pub mod mst;
pub mod paths;
pub mod planarity;
pub mod topo;
pub mod vertex_sets;

pub use assignment::{
    Assignment, CostMatrix, CostModel, MatchedPair, MatchingResult, min_cost_assignment,
    solve_assignment,
};
pub use connectivity::{
    ConnectivityReport, is_connected, is_weakly_connected, strongly_connected_components,
    undirected_connectivity,
};
pub use cycles::{CycleReport, detect_cycles, has_cycle};
pub use eulerian::{
    EulerianCircuit, EulerianObstruction, eulerian_circuit, eulerian_obstruction, is_eulerian,
};
pub use mst::{SpanningEdge, SpanningForest, minimum_spanning_forest, minimum_spanning_tree};
pub use paths::{
    BfsResult, PathAlgorithm, PathResult, bellman_ford, bfs, dijkstra, negative_cycle_reachable,
    shortest_path,
};
pub use planarity::{NonPlanarWitness, PlanarityVerdict, check_planarity};
pub use topo::topological_sort;
pub use vertex_sets::{
    CliqueVerdict, DominationVerdict, IndependenceVerdict, check_clique, check_dominating_set,
    check_independent_set,
};
