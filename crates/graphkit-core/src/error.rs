use std::fmt;

/// Machine-readable error codes so the reporting layer can branch without
/// matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnknownVertex,
    DuplicateVertex,
    InvalidWeight,
    ZeroWeight,
    AsymmetricWeights,
    NotApplicable,
    NotADag,
    Disconnected,
    SizeLimitExceeded,
}

impl ErrorCode {
    /// Stable code identifier (`G####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnknownVertex => "G1001",
            Self::DuplicateVertex => "G1002",
            Self::InvalidWeight => "G1003",
            Self::ZeroWeight => "G1004",
            Self::AsymmetricWeights => "G1005",
            Self::NotApplicable => "G2001",
            Self::NotADag => "G2002",
            Self::Disconnected => "G2003",
            Self::SizeLimitExceeded => "G3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::UnknownVertex => "Vertex not found",
            Self::DuplicateVertex => "Vertex declared twice",
            Self::InvalidWeight => "Edge weight is not a finite number",
            Self::ZeroWeight => "Zero-cost edges cannot be represented",
            Self::AsymmetricWeights => "Undirected graph has asymmetric weights",
            Self::NotApplicable => "Algorithm preconditions not met",
            Self::NotADag => "Graph is not a directed acyclic graph",
            Self::Disconnected => "Graph is not connected",
            Self::SizeLimitExceeded => "Graph exceeds the configured size limit",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Why a graph was refused by the topological sorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DagViolation {
    /// Every weight is mirrored, so the graph has no direction to order by.
    Undirected,
    /// A directed cycle was found.
    Cyclic,
}

impl fmt::Display for DagViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undirected => f.write_str("graph is not directed"),
            Self::Cyclic => f.write_str("graph contains a directed cycle"),
        }
    }
}

/// Failures returned by graph construction and by every analyzer.
///
/// All variants are recoverable. "No path" and "negative cycle" are not
/// errors; they are reported inside the path results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("vertex declared more than once: {0}")]
    DuplicateVertex(String),

    #[error("edge {from} -> {to} has non-finite weight {weight}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    /// Zero is the "no edge" sentinel; a zero-cost edge cannot be stored.
    #[error("edge {from} -> {to} has weight 0, which means \"no edge\"")]
    ZeroWeight { from: String, to: String },

    #[error("weight({from}, {to}) differs from weight({to}, {from})")]
    AsymmetricWeights { from: String, to: String },

    #[error("{operation} is not applicable: {reason}")]
    NotApplicable {
        operation: &'static str,
        reason: String,
    },

    #[error("not a DAG: {0}")]
    NotADag(DagViolation),

    #[error("{operation} requires a connected graph")]
    Disconnected { operation: &'static str },

    #[error("{operation} refused a graph with {vertices} vertices (limit {limit})")]
    SizeLimitExceeded {
        operation: &'static str,
        vertices: usize,
        limit: usize,
    },
}

impl GraphError {
    /// Build a [`GraphError::NotApplicable`].
    pub fn not_applicable(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::NotApplicable {
            operation,
            reason: reason.into(),
        }
    }

    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownVertex(_) => ErrorCode::UnknownVertex,
            Self::DuplicateVertex(_) => ErrorCode::DuplicateVertex,
            Self::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            Self::ZeroWeight { .. } => ErrorCode::ZeroWeight,
            Self::AsymmetricWeights { .. } => ErrorCode::AsymmetricWeights,
            Self::NotApplicable { .. } => ErrorCode::NotApplicable,
            Self::NotADag(_) => ErrorCode::NotADag,
            Self::Disconnected { .. } => ErrorCode::Disconnected,
            Self::SizeLimitExceeded { .. } => ErrorCode::SizeLimitExceeded,
        }
    }
}
