//! `good_lp` backend.
//!
//! Translates a [`StaffingModel`] into a `good_lp` problem with integer
//! variables and solves it with the pure-Rust `microlp` engine.
//!
//! # Time Limits and Cancellation
//! `microlp` cannot be interrupted. When a time limit or cancel token is
//! set, the solve runs on a worker thread while the calling thread waits in
//! short slices, checking the deadline and the token between slices. On
//! timeout or cancellation the caller gets the status immediately; the
//! worker finishes in the background and its result is dropped.

use good_lp::{
    constraint, microlp, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{SolveOptions, StaffingSolution, StaffingSolver};
use crate::error::SolverError;
use crate::ilp::{Objective, StaffingModel};

/// Values further than this from an integer are rejected.
const INTEGRALITY_TOLERANCE: f64 = 1e-6;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Integer-programming backend built on `good_lp` + `microlp`.
#[derive(Debug, Clone, Copy)]
pub struct GoodLpSolver {
    poll_interval: Duration,
}

impl GoodLpSolver {
    /// Creates a solver with the default poll interval.
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets how often the waiting thread checks the deadline and cancel token.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    fn solve_watched(
        &self,
        model: &StaffingModel,
        options: &SolveOptions,
    ) -> Result<StaffingSolution, SolverError> {
        let owned = model.clone();
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("u-roster-solve".into())
            .spawn(move || {
                // The receiver is gone if the caller already gave up.
                let _ = tx.send(solve_model(&owned));
            })
            .map_err(|e| SolverError::Unavailable(format!("failed to spawn solver thread: {e}")))?;

        let deadline = options
            .time_limit()
            .map(|limit| (Instant::now() + limit, limit));

        loop {
            if options.is_cancelled() {
                warn!("staffing solve cancelled");
                return Err(SolverError::Cancelled);
            }

            let wait = match deadline {
                Some((at, limit)) => {
                    let now = Instant::now();
                    if now >= at {
                        warn!(limit_ms = limit.as_millis() as u64, "staffing solve timed out");
                        return Err(SolverError::TimedOut(limit));
                    }
                    (at - now).min(self.poll_interval)
                }
                None => self.poll_interval,
            };

            match rx.recv_timeout(wait) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(SolverError::Unavailable(
                        "solver thread terminated without a result".into(),
                    ))
                }
            }
        }
    }
}

impl Default for GoodLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StaffingSolver for GoodLpSolver {
    fn name(&self) -> &'static str {
        "good_lp/microlp"
    }

    fn solve(
        &self,
        model: &StaffingModel,
        options: &SolveOptions,
    ) -> Result<StaffingSolution, SolverError> {
        if options.is_cancelled() {
            return Err(SolverError::Cancelled);
        }

        debug!(
            backend = self.name(),
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            time_limit_ms = options.time_limit_ms,
            "solving staffing model"
        );

        let result = if options.time_limit_ms.is_none() && options.cancel.is_none() {
            solve_model(model)
        } else {
            self.solve_watched(model, options)
        };

        if let Ok(solution) = &result {
            info!(
                backend = self.name(),
                total_headcount = solution.total(),
                "staffing model solved"
            );
        }
        result
    }
}

/// Builds and solves the `good_lp` problem on the current thread.
fn solve_model(model: &StaffingModel) -> Result<StaffingSolution, SolverError> {
    let mut vars = variables!();
    let xs: Vec<Variable> = model
        .variables()
        .iter()
        .map(|v| {
            let mut def = variable().integer().min(f64::from(v.lower));
            if let Some(upper) = v.upper {
                def = def.max(f64::from(upper));
            }
            vars.add(def)
        })
        .collect();

    let objective: Expression = match model.objective() {
        Objective::MinimizeTotalHeadcount => xs.iter().copied().sum(),
    };

    let mut problem = vars.minimise(objective).using(microlp);
    for c in model.constraints() {
        let covered: Expression = c.cohorts.iter().map(|s| xs[s.index()]).sum();
        let required = f64::from(c.demand);
        problem = problem.with(constraint!(covered >= required));
    }

    let solved = problem.solve().map_err(|e| match e {
        ResolutionError::Infeasible => SolverError::Infeasible,
        ResolutionError::Unbounded => SolverError::Unbounded,
        other => SolverError::Unavailable(other.to_string()),
    })?;

    let mut headcounts = Vec::with_capacity(xs.len());
    for (i, &x) in xs.iter().enumerate() {
        let value = solved.value(x);
        let rounded = value.round();
        if (value - rounded).abs() > INTEGRALITY_TOLERANCE
            || rounded < 0.0
            || rounded > f64::from(u32::MAX)
        {
            return Err(SolverError::Unavailable(format!(
                "backend returned non-integral headcount {value} for cohort {i}"
            )));
        }
        headcounts.push(rounded as u32);
    }

    let solution = StaffingSolution::new(headcounts);
    if !model.is_satisfied_by(&solution) {
        return Err(SolverError::Unavailable(
            "backend returned a solution that violates coverage".into(),
        ));
    }
    Ok(solution)
}
