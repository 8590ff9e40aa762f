//! Edge weight sentinel.
//!
//! The adjacency matrix stores one [`EdgeWeight`] per ordered vertex pair.
//! A stored weight of exactly `0` has always meant "no edge" in the graph
//! documents this crate reads, so zero-cost edges are structurally
//! unrepresentable. Keeping the sentinel as its own variant stops a real
//! `0.0` from leaking into arithmetic as if it were an edge.

use serde::{Deserialize, Serialize};

/// Weight of one ordered vertex pair in the adjacency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum EdgeWeight {
    /// No edge between the pair.
    #[default]
    NoEdge,
    /// An edge with a nonzero, finite weight.
    Weight(f64),
}

impl EdgeWeight {
    /// Interpret a raw stored number: `0` becomes [`EdgeWeight::NoEdge`].
    ///
    /// Non-finite values are passed through; callers validate them.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_raw(raw: f64) -> Self {
        if raw == 0.0 {
            Self::NoEdge
        } else {
            Self::Weight(raw)
        }
    }

    /// The weight, if an edge is present.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::NoEdge => None,
            Self::Weight(w) => Some(w),
        }
    }

    /// The raw stored form: `0.0` for a missing edge.
    #[must_use]
    pub const fn raw(self) -> f64 {
        match self {
            Self::NoEdge => 0.0,
            Self::Weight(w) => w,
        }
    }

    #[must_use]
    pub const fn is_edge(self) -> bool {
        matches!(self, Self::Weight(_))
    }
}

impl From<Option<f64>> for EdgeWeight {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::NoEdge, Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::EdgeWeight;

    #[test]
    fn zero_is_no_edge() {
        assert_eq!(EdgeWeight::from_raw(0.0), EdgeWeight::NoEdge);
        assert_eq!(EdgeWeight::from_raw(-0.0), EdgeWeight::NoEdge);
        assert!(!EdgeWeight::from_raw(0.0).is_edge());
    }

    #[test]
    fn negative_weights_are_edges() {
        let w = EdgeWeight::from_raw(-3.0);
        assert_eq!(w.value(), Some(-3.0));
        assert!(w.is_edge());
    }

    #[test]
    fn raw_round_trips_sentinel() {
        assert!(EdgeWeight::NoEdge.raw().abs() < f64::EPSILON);
        assert!((EdgeWeight::Weight(2.5).raw() - 2.5).abs() < f64::EPSILON);
        assert_eq!(EdgeWeight::from(None), EdgeWeight::NoEdge);
        assert_eq!(EdgeWeight::from(Some(4.0)), EdgeWeight::Weight(4.0));
    }
}
