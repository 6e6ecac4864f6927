//! Planner configuration.
//!
//! Loaded from JSON or assembled in code. Every field has a default, so
//! `{}` is a valid configuration (the canonical 5-on / 2-off week, no time
//! limit, no retry, unbounded variables).
//!
//! ```json
//! {
//!   "cycle": { "cycle_length": 7, "work_span": 5, "rest_span": 2 },
//!   "solve": { "time_limit_ms": 2000 },
//!   "retry_time_limit_ms": 10000,
//!   "bound_headcount": false
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::RosterResult;
use crate::models::CycleConfig;
use crate::solver::SolveOptions;

/// Configuration for [`crate::planner::RosterPlanner`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Work/rest rotation.
    pub cycle: CycleConfig,
    /// Options for the first solve attempt.
    pub solve: SolveOptions,
    /// Budget for a single retry after a timeout. `None` = never retry.
    pub retry_time_limit_ms: Option<u64>,
    /// Cap every cohort's headcount at total demand.
    pub bound_headcount: bool,
}

impl PlannerConfig {
    /// Parses a JSON configuration.
    pub fn from_json_str(json: &str) -> RosterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the cycle.
    pub fn with_cycle(mut self, cycle: CycleConfig) -> Self {
        self.cycle = cycle;
        self
    }

    /// Sets the solve options.
    pub fn with_solve_options(mut self, solve: SolveOptions) -> Self {
        self.solve = solve;
        self
    }

    /// Enables one retry with `limit` after a timeout.
    pub fn with_retry_time_limit(mut self, limit: Duration) -> Self {
        self.retry_time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Caps cohort headcounts at total demand.
    pub fn with_bounded_headcount(mut self) -> Self {
        self.bound_headcount = true;
        self
    }

    /// Retry budget as a `Duration`.
    pub fn retry_time_limit(&self) -> Option<Duration> {
        self.retry_time_limit_ms.map(Duration::from_millis)
    }
}
