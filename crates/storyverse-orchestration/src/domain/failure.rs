//! The closed set of failures surfaced by command actions.
//!
//! Messages are safe to show to end users. Collaborator detail never
//! reaches them; it is logged server-side instead.

use std::time::Duration;

use thiserror::Error;

/// Why a pair selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionProblem {
    #[error("Source/target node selection is required.")]
    Missing,
    #[error("Source and target must be different nodes.")]
    SameNode,
    #[error("Selected nodes are not available in the catalog.")]
    NotInCatalog,
}

/// A terminal command failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandFailure {
    /// The query was empty or whitespace. Never retried or logged as an
    /// error.
    #[error("Query is empty. Ask to connect two story nodes.")]
    EmptyQuery,

    /// The caller-supplied pair is unusable. Rejected before any attempt.
    #[error("{0}")]
    InvalidSelection(SelectionProblem),

    /// An attempt exceeded the hard budget. Never retried.
    #[error("Command timed out after {}s. Try a shorter prompt.", .budget.as_secs_f64())]
    Timeout {
        /// The configured per-attempt budget.
        budget: Duration,
    },

    /// Every attempt failed for a reason other than a timeout.
    #[error("Command execution failed. Check collaborator configuration and retry.")]
    ExecutionFailed,
}

impl CommandFailure {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "EMPTY_QUERY",
            Self::InvalidSelection(_) => "INVALID_SELECTION",
            Self::Timeout { .. } => "TIMEOUT",
            Self::ExecutionFailed => "EXECUTION_FAILED",
        }
    }
}
