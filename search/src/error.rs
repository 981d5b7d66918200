//! Typed graph errors.
//!
//! Guard failures are never errors; they only omit an edge. These variants
//! cover lookups against a graph that is missing something it should have,
//! and budget or policy problems detected while building it.

use emplaka_kernel::carrier::value_key::ValueKey;

/// Typed failure for graph construction and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No node holds this payload.
    NotFound { payload: ValueKey },
    /// The node exists but its closure has not been computed.
    NotClosed { payload: ValueKey },
    /// Expansion did not reach a fixed point within the policy budget.
    ExpansionBudgetExceeded {
        passes: u64,
        node_count: usize,
        detail: String,
    },
    /// The policy itself is unusable.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { payload } => write!(f, "no node with payload {payload}"),
            Self::NotClosed { payload } => {
                write!(f, "closure not computed for node {payload}")
            }
            Self::ExpansionBudgetExceeded {
                passes,
                node_count,
                detail,
            } => write!(
                f,
                "expansion budget exceeded after {passes} passes ({node_count} nodes): {detail}"
            ),
            Self::InvalidPolicy { detail } => write!(f, "invalid engine policy: {detail}"),
        }
    }
}

impl std::error::Error for GraphError {}
