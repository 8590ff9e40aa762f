//! Minimum-cost perfect matching (Hungarian algorithm).
//!
//! # Overview
//!
//! [`solve_assignment`] works on a square [`CostMatrix`] and returns, for
//! every row, the column it is assigned to. It is the O(n^3) potentials
//! formulation: rows are inserted one at a time and an augmenting path is
//! found with Dijkstra-like relaxation over the reduced costs.
//!
//! [`min_cost_assignment`] derives a cost matrix from a [`Graph`]:
//!
//! - **Weighted**: the symmetrized weights over all `n x n` vertex pairs,
//!   with `+inf` where there is no edge. Every vertex is a row and a column.
//! - **Unweighted**: an approximation. The vertex list is cut in half by
//!   position and the first half is matched against the second; a pair
//!   costs its weight if adjacent and 1 otherwise. This is not a real
//!   bipartition and the result says so via [`CostModel::PositionalHalves`].
//!
//! Missing entries (`+inf`) are replaced with a finite penalty larger than
//! any finite matching, so the solver always terminates; a solution that
//! still uses a penalised entry means no finite perfect matching exists.

use graphkit_core::{AnalysisLimits, Graph, GraphError};
use serde::Serialize;
use tracing::{debug, instrument};

const OPERATION: &str = "assignment";

/// A square matrix of costs. `+inf` marks a forbidden pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    dimension: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    /// # Errors
    ///
    /// Returns [`GraphError::NotApplicable`] if the rows are not all of
    /// length `rows.len()`, or if any cost is NaN or `-inf`.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, GraphError> {
        let dimension = rows.len();
        let mut costs = Vec::with_capacity(dimension * dimension);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(GraphError::not_applicable(
                    OPERATION,
                    format!("row {i} has {} entries, expected {dimension}", row.len()),
                ));
            }
            if let Some(j) = row
                .iter()
                .position(|c| c.is_nan() || (c.is_infinite() && c.is_sign_negative()))
            {
                return Err(GraphError::not_applicable(
                    OPERATION,
                    format!("cost ({i}, {j}) must be finite or +inf"),
                ));
            }
            costs.extend(row);
        }
        Ok(Self { dimension, costs })
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.costs[row * self.dimension + col]
    }
}

/// Solver output: `columns[row]` is the column assigned to `row`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub columns: Vec<usize>,
    pub total_cost: f64,
}

/// Minimum-cost perfect matching over a square cost matrix.
///
/// # Errors
///
/// Returns [`GraphError::NotApplicable`] when every perfect matching uses
/// at least one `+inf` entry, or when the finite costs are too large for
/// the reduced costs to stay finite.
pub fn solve_assignment(matrix: &CostMatrix) -> Result<Assignment, GraphError> {
    let n = matrix.dimension();
    if n == 0 {
        return Ok(Assignment {
            columns: Vec::new(),
            total_cost: 0.0,
        });
    }

    let finite_mass: f64 = matrix
        .costs
        .iter()
        .filter(|c| c.is_finite())
        .map(|c| c.abs())
        .sum();
    let penalty = 2.0f64.mul_add(finite_mass, 1.0);
    if !penalty.is_finite() && matrix.costs.iter().any(|c| c.is_infinite()) {
        return Err(GraphError::not_applicable(
            OPERATION,
            "finite costs are too large to price the forbidden entries",
        ));
    }
    let cost = |i: usize, j: usize| {
        let c = matrix.get(i, j);
        if c.is_finite() { c } else { penalty }
    };

    // Index 0 is a virtual row/column; real ones are 1..=n.
    let mut row_potential = vec![0.0; n + 1];
    let mut col_potential = vec![0.0; n + 1];
    let mut col_owner = vec![0_usize; n + 1];
    let mut way = vec![0_usize; n + 1];

    for row in 1..=n {
        col_owner[0] = row;
        let mut current = 0_usize;
        let mut slack = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[current] = true;
            let owner = col_owner[current];
            let mut delta = f64::INFINITY;
            let mut next = 0_usize;
            for col in 1..=n {
                if used[col] {
                    continue;
                }
                let reduced = cost(owner - 1, col - 1) - row_potential[owner] - col_potential[col];
                if reduced < slack[col] {
                    slack[col] = reduced;
                    way[col] = current;
                }
                if slack[col] < delta {
                    delta = slack[col];
                    next = col;
                }
            }
            if !delta.is_finite() {
                return Err(GraphError::not_applicable(
                    OPERATION,
                    format!("reduced costs overflowed while placing row {}", row - 1),
                ));
            }
            for col in 0..=n {
                if used[col] {
                    row_potential[col_owner[col]] += delta;
                    col_potential[col] -= delta;
                } else {
                    slack[col] -= delta;
                }
            }
            current = next;
            if col_owner[current] == 0 {
                break;
            }
        }

        while current != 0 {
            let previous = way[current];
            col_owner[current] = col_owner[previous];
            current = previous;
        }
    }

    let mut columns = vec![0_usize; n];
    for col in 1..=n {
        columns[col_owner[col] - 1] = col - 1;
    }

    if let Some(row) = (0..n).find(|&row| !matrix.get(row, columns[row]).is_finite()) {
        return Err(GraphError::not_applicable(
            OPERATION,
            format!("no finite perfect matching (row {row} has no usable column)"),
        ));
    }

    let total_cost = columns
        .iter()
        .enumerate()
        .map(|(row, &col)| matrix.get(row, col))
        .sum();
    Ok(Assignment {
        columns,
        total_cost,
    })
}

// ---------------------------------------------------------------------------
// Graph-level assignment
// ---------------------------------------------------------------------------

/// How the cost matrix was derived from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Symmetrized edge weights over all vertex pairs.
    EdgeWeights,
    /// First half of the vertex list against the second; approximate.
    PositionalHalves,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub left: String,
    pub right: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchingResult {
    pub pairs: Vec<MatchedPair>,
    pub total_cost: f64,
    pub cost_model: CostModel,
}

impl MatchingResult {
    #[must_use]
    pub const fn is_approximation(&self) -> bool {
        matches!(self.cost_model, CostModel::PositionalHalves)
    }
}

/// Minimum-cost assignment derived from a graph.
///
/// # Errors
///
/// - [`GraphError::SizeLimitExceeded`] above
///   `limits.assignment_max_vertices`.
/// - [`GraphError::NotApplicable`] for an unweighted graph with an odd
///   number of vertices, or when no finite perfect matching exists.
#[instrument(skip(graph, limits), fields(vertices = graph.vertex_count()))]
pub fn min_cost_assignment(
    graph: &Graph,
    limits: &AnalysisLimits,
) -> Result<MatchingResult, GraphError> {
    graph.ensure_at_most(OPERATION, limits.assignment_max_vertices)?;

    let n = graph.vertex_count();
    let symmetric = graph.symmetrized();
    let (rows, cols, cost_model): (Vec<usize>, Vec<usize>, CostModel) = if graph.is_weighted() {
        ((0..n).collect(), (0..n).collect(), CostModel::EdgeWeights)
    } else {
        if n % 2 != 0 {
            return Err(GraphError::not_applicable(
                OPERATION,
                format!("unweighted graph with {n} vertices cannot be split into equal halves"),
            ));
        }
        debug!("unweighted graph; matching first half against second half");
        let half = n / 2;
        ((0..half).collect(), (half..n).collect(), CostModel::PositionalHalves)
    };

    let missing = match cost_model {
        CostModel::EdgeWeights => f64::INFINITY,
        CostModel::PositionalHalves => 1.0,
    };
    let matrix = CostMatrix::new(
        rows.iter()
            .map(|&u| {
                cols.iter()
                    .map(|&v| symmetric.weight_at(u, v).value().unwrap_or(missing))
                    .collect()
            })
            .collect(),
    )?;

    let assignment = solve_assignment(&matrix)?;
    let pairs = assignment
        .columns
        .iter()
        .enumerate()
        .map(|(row, &col)| MatchedPair {
            left: graph.label(rows[row]).to_string(),
            right: graph.label(cols[col]).to_string(),
            cost: matrix.get(row, col),
        })
        .collect();

    Ok(MatchingResult {
        pairs,
        total_cost: assignment.total_cost,
        cost_model,
    })
}
