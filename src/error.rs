//! Error types.
//!
//! Validation failures are detected before any model is built and carry
//! every problem found in the input. Solver statuses are wrapped as-is.

use std::time::Duration;

use thiserror::Error;

use crate::validation::ValidationError;

/// Status reported by a solver backend when no optimal assignment is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// No non-negative integer assignment satisfies every coverage constraint.
    #[error("staffing model is infeasible")]
    Infeasible,

    /// The objective can decrease without limit.
    #[error("staffing model is unbounded")]
    Unbounded,

    /// The solve did not finish within the time budget.
    #[error("solver timed out after {0:?}")]
    TimedOut(Duration),

    /// The caller cancelled the solve.
    #[error("solve was cancelled")]
    Cancelled,

    /// The backend failed or returned something unusable.
    #[error("solver unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for rostering operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("invalid cycle configuration: {}", join_messages(.0))]
    InvalidCycleConfig(Vec<ValidationError>),

    #[error("invalid demand: {}", join_messages(.0))]
    InvalidDemand(Vec<ValidationError>),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("failed to parse planner configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type RosterResult<T> = Result<T, RosterError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
