//! Error type shared by the model, the search and the session facade.

use thiserror::Error;

/// Errors reported by model construction and by solving.
///
/// Bound failures and infeasible branches never surface here: they are
/// ordinary control flow inside the search. Only the total absence of a
/// result at the end of a run is reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignError {
    /// The model or the search configuration cannot produce a full assignment.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A weight row does not have exactly one entry per slot.
    #[error("weight row has {actual} entries, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A weight is NaN or infinite.
    #[error("weight for slot {slot} is not finite: {value}")]
    InvalidWeight { slot: usize, value: f64 },

    /// The search completed without accepting any assignment.
    #[error("no feasible assignment exists")]
    NoFeasibleSolution,

    /// A stop condition fired before any assignment was accepted.
    #[error("search stopped before a feasible assignment was found")]
    Interrupted,

    /// The search tree could not grow.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
}

impl AssignError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AssignError::InvalidConfiguration(msg.into())
    }
}
