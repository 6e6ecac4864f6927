//! Solver seam.
//!
//! The core never searches for integer solutions itself. A
//! [`StaffingSolver`] receives a built [`StaffingModel`] and returns either
//! an optimal [`StaffingSolution`] or a [`SolverError`] status. Any
//! integer-programming backend can be plugged in here without touching
//! model building or reporting.
//!
//! [`GoodLpSolver`] is the bundled backend (`good_lp` with the pure-Rust
//! `microlp` engine).

mod backend;

pub use backend::GoodLpSolver;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::SolverError;
use crate::ilp::StaffingModel;
use crate::models::Day;

/// A backend able to solve staffing models to optimality.
///
/// Implementations must return only complete, optimal integer solutions.
/// Time limits and cancellation in [`SolveOptions`] must be honored by
/// returning [`SolverError::TimedOut`] or [`SolverError::Cancelled`].
pub trait StaffingSolver: Send + Sync + Debug {
    /// Backend name (e.g., "good_lp/microlp").
    fn name(&self) -> &'static str;

    /// Solves `model`.
    fn solve(
        &self,
        model: &StaffingModel,
        options: &SolveOptions,
    ) -> Result<StaffingSolution, SolverError>;
}

/// Optimal headcount per cohort.
///
/// Entry `i` is the headcount of the cohort starting on day `i`.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingSolution {
    headcounts: Vec<u32>,
}

impl StaffingSolution {
    /// Creates a solution from per-cohort headcounts.
    pub fn new(headcounts: Vec<u32>) -> Self {
        Self { headcounts }
    }

    /// Headcount of the cohort starting on `start` (0 if out of range).
    #[inline]
    pub fn headcount(&self, start: Day) -> u32 {
        self.headcounts.get(start.index()).copied().unwrap_or(0)
    }

    /// Headcounts in start-day order.
    #[inline]
    pub fn headcounts(&self) -> &[u32] {
        &self.headcounts
    }

    /// `(start day, headcount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Day, u32)> + '_ {
        self.headcounts
            .iter()
            .enumerate()
            .map(|(i, &n)| (Day::new(i as u32), n))
    }

    /// Total headcount across all cohorts.
    pub fn total(&self) -> u64 {
        self.headcounts.iter().map(|&n| u64::from(n)).sum()
    }
}

/// Cooperative cancellation flag shared between a caller and a solve.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Per-solve options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Wall-clock budget in milliseconds. `None` = no limit.
    pub time_limit_ms: Option<u64>,
    /// Cancellation flag. Not part of serialized configuration.
    #[serde(skip)]
    pub cancel: Option<CancelToken>,
}

impl SolveOptions {
    /// Creates options with no limit and no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Time limit as a `Duration`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Whether the attached token (if any) has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_accessors() {
        let s = StaffingSolution::new(vec![3, 0, 5]);
        assert_eq!(s.headcount(Day::new(2)), 5);
        assert_eq!(s.headcount(Day::new(9)), 0);
        assert_eq!(s.total(), 8);
        let pairs: Vec<(usize, u32)> = s.iter().map(|(d, n)| (d.index(), n)).collect();
        assert_eq!(pairs, vec![(0, 3), (1, 0), (2, 5)]);
    }

    #[test]
    fn test_cancel_token_shared() {
        let token = CancelToken::new();
        let options = SolveOptions::new().with_cancel_token(token.clone());
        assert!(!options.is_cancelled());
        token.cancel();
        assert!(options.is_cancelled());
    }

    #[test]
    fn test_time_limit() {
        let options = SolveOptions::new().with_time_limit(Duration::from_millis(1500));
        assert_eq!(options.time_limit_ms, Some(1500));
        assert_eq!(options.time_limit(), Some(Duration::from_millis(1500)));
        assert_eq!(SolveOptions::new().time_limit(), None);
    }

    #[test]
    fn test_options_deserialize() {
        let options: SolveOptions = serde_json::from_str(r#"{"time_limit_ms":250}"#).unwrap();
        assert_eq!(options.time_limit_ms, Some(250));
        assert!(options.cancel.is_none());

        let empty: SolveOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.time_limit_ms, None);
    }
}
