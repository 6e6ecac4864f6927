//! End-to-end roster planning.
//!
//! # Pipeline
//!
//! 1. Validate demand against the cycle (fail fast, before any model exists).
//! 2. Build the staffing model.
//! 3. Solve it with the configured [`StaffingSolver`].
//! 4. Project the solution into a [`ScheduleReport`] and compute KPIs.
//!
//! A solver status (infeasible, timed out, cancelled, unavailable) is
//! returned unmodified; no partial roster is ever produced. The only retry
//! is a single, caller-configured one after a timeout, with a relaxed
//! time budget.

use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::config::PlannerConfig;
use crate::error::{RosterResult, SolverError};
use crate::ilp::{StaffingModel, StaffingModelBuilder};
use crate::models::DemandVector;
use crate::report::{RosterKpi, ScheduleReport};
use crate::solver::{GoodLpSolver, StaffingSolution, StaffingSolver};

/// A solved roster.
#[derive(Debug, Clone, Serialize)]
pub struct RosterPlan {
    /// Demand the roster was planned for.
    pub demand: DemandVector,
    /// Optimal per-cohort headcounts.
    pub solution: StaffingSolution,
    /// Matrix view and coverage figures.
    pub report: ScheduleReport,
    /// Quality metrics.
    pub kpi: RosterKpi,
}

impl RosterPlan {
    /// Total headcount (equals the solver's objective value).
    pub fn total_headcount(&self) -> u64 {
        self.report.total_headcount()
    }
}

/// Runs the validate → build → solve → report pipeline.
///
/// # Example
/// ```
/// use u_roster::config::PlannerConfig;
/// use u_roster::planner::RosterPlanner;
///
/// let planner = RosterPlanner::with_default_solver(PlannerConfig::default());
/// let plan = planner.plan_raw(&[31, 45, 40, 40, 48, 30, 20]).unwrap();
/// assert_eq!(plan.total_headcount(), 51);
/// ```
#[derive(Debug)]
pub struct RosterPlanner<S: StaffingSolver> {
    solver: S,
    config: PlannerConfig,
}

impl RosterPlanner<GoodLpSolver> {
    /// Creates a planner backed by [`GoodLpSolver`].
    pub fn with_default_solver(config: PlannerConfig) -> Self {
        Self::new(GoodLpSolver::new(), config)
    }
}

impl<S: StaffingSolver> RosterPlanner<S> {
    /// Creates a planner.
    pub fn new(solver: S, config: PlannerConfig) -> Self {
        Self { solver, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Solver backend.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Validates raw demand, then plans.
    pub fn plan_raw(&self, values: &[i64]) -> RosterResult<RosterPlan> {
        let demand = DemandVector::validate(&self.config.cycle, values)?;
        self.plan(&demand)
    }

    /// Plans a roster for validated demand.
    pub fn plan(&self, demand: &DemandVector) -> RosterResult<RosterPlan> {
        let cycle = self.config.cycle;
        let _span = info_span!(
            "plan_roster",
            cycle_length = cycle.cycle_length(),
            work_span = cycle.work_span(),
            backend = self.solver.name()
        )
        .entered();

        let mut builder = StaffingModelBuilder::new(demand, cycle);
        if self.config.bound_headcount {
            builder = builder.bounded();
        }
        let model = builder.build()?;

        let solution = self.solve_with_retry(&model)?;

        let report = ScheduleReport::build(&solution, &cycle);
        let violations = report.violations(demand);
        if !violations.is_empty() {
            return Err(SolverError::Unavailable(format!(
                "{} returned a roster leaving {} day(s) understaffed",
                self.solver.name(),
                violations.len()
            ))
            .into());
        }

        let kpi = report.kpi(demand);
        info!(
            total_headcount = kpi.total_headcount,
            lower_bound = kpi.lower_bound,
            total_surplus = kpi.total_surplus,
            "roster planned"
        );

        Ok(RosterPlan {
            demand: demand.clone(),
            solution,
            report,
            kpi,
        })
    }

    /// Plans each demand scenario independently.
    ///
    /// Scenarios share no state; with the `parallel` feature they run on
    /// the rayon thread pool. Results keep input order.
    pub fn plan_scenarios(&self, demands: &[DemandVector]) -> Vec<RosterResult<RosterPlan>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            demands.par_iter().map(|d| self.plan(d)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            demands.iter().map(|d| self.plan(d)).collect()
        }
    }

    fn solve_with_retry(&self, model: &StaffingModel) -> Result<StaffingSolution, SolverError> {
        match self.solver.solve(model, &self.config.solve) {
            Err(SolverError::TimedOut(limit)) => {
                let Some(relaxed) = self.config.retry_time_limit() else {
                    return Err(SolverError::TimedOut(limit));
                };
                warn!(
                    first_limit_ms = limit.as_millis() as u64,
                    retry_limit_ms = relaxed.as_millis() as u64,
                    "solve timed out, retrying once with a relaxed budget"
                );
                let retry = self.config.solve.clone().with_time_limit(relaxed);
                self.solver.solve(model, &retry)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::models::{CycleConfig, Day};
    use crate::solver::{CancelToken, SolveOptions};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const WEEK: [i64; 7] = [31, 45, 40, 40, 48, 30, 20];

    /// Times out until it has been called `timeouts` times, then delegates.
    #[derive(Debug)]
    struct FlakySolver {
        timeouts: usize,
        calls: AtomicUsize,
        seen_limits: std::sync::Mutex<Vec<Option<u64>>>,
    }

    impl FlakySolver {
        fn new(timeouts: usize) -> Self {
            Self {
                timeouts,
                calls: AtomicUsize::new(0),
                seen_limits: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl StaffingSolver for FlakySolver {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn solve(
            &self,
            model: &StaffingModel,
            options: &SolveOptions,
        ) -> Result<StaffingSolution, SolverError> {
            self.seen_limits.lock().unwrap().push(options.time_limit_ms);
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.timeouts {
                return Err(SolverError::TimedOut(options.time_limit().unwrap_or_default()));
            }
            GoodLpSolver::new().solve(model, &SolveOptions::new())
        }
    }

    /// Always returns the same fixed (possibly wrong) solution.
    #[derive(Debug)]
    struct FixedSolver(Result<StaffingSolution, SolverError>);

    impl StaffingSolver for FixedSolver {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn solve(
            &self,
            _model: &StaffingModel,
            _options: &SolveOptions,
        ) -> Result<StaffingSolution, SolverError> {
            self.0.clone()
        }
    }

    fn assert_covers(plan: &RosterPlan) {
        let cycle = plan.report.cycle();
        for day in cycle.days() {
            let on_duty: u64 = cycle
                .cohorts()
                .filter(|c| c.on_duty_days().contains(&day))
                .map(|c| u64::from(plan.solution.headcount(c.start())))
                .sum();
            assert!(on_duty >= u64::from(plan.demand.on(day)), "day {day} uncovered");
        }
    }

    #[test]
    fn test_weekly_scenario() {
        let planner = RosterPlanner::with_default_solver(PlannerConfig::default());
        let plan = planner.plan_raw(&WEEK).unwrap();

        assert_eq!(plan.total_headcount(), 51);
        assert_eq!(plan.solution.total(), 51);
        assert_covers(&plan);

        // Tuesday and Friday are binding in every optimum.
        assert!(plan.kpi.binding_days.contains(&Day::new(1)));
        assert!(plan.kpi.binding_days.contains(&Day::new(4)));
        assert_eq!(plan.kpi.gap, 0);
    }

    #[test]
    fn test_all_zero_demand() {
        let planner = RosterPlanner::with_default_solver(PlannerConfig::default());
        let plan = planner.plan_raw(&[0; 7]).unwrap();
        assert_eq!(plan.total_headcount(), 0);
        assert!(plan.solution.headcounts().iter().all(|&n| n == 0));
    }

    #[test]
    fn test_invalid_demand_fails_before_solve() {
        let solver = FlakySolver::new(0);
        let planner = RosterPlanner::new(solver, PlannerConfig::default());

        let err = planner.plan_raw(&[1, 2, -3, 4, 5, 6, 7]).unwrap_err();
        assert!(matches!(err, RosterError::InvalidDemand(_)));
        assert_eq!(planner.solver().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_non_weekly_cycle() {
        // Four on, two off over six days.
        let cycle = CycleConfig::new(6, 4, 2).unwrap();
        let planner =
            RosterPlanner::with_default_solver(PlannerConfig::default().with_cycle(cycle));
        let plan = planner.plan_raw(&[4, 4, 4, 4, 4, 4]).unwrap();
        // 24 worker-days / 4 per worker = 6, attained by one worker per cohort.
        assert_eq!(plan.total_headcount(), 6);
        assert_covers(&plan);
    }

    #[test]
    fn test_timeout_without_retry_is_surfaced() {
        let config = PlannerConfig::default()
            .with_solve_options(SolveOptions::new().with_time_limit(Duration::from_millis(10)));
        let planner = RosterPlanner::new(FlakySolver::new(1), config);

        let err = planner.plan_raw(&WEEK).unwrap_err();
        assert!(matches!(
            err,
            RosterError::Solver(SolverError::TimedOut(limit)) if limit == Duration::from_millis(10)
        ));
        assert_eq!(planner.solver().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_single_retry_with_relaxed_budget() {
        let config = PlannerConfig::default()
            .with_solve_options(SolveOptions::new().with_time_limit(Duration::from_millis(10)))
            .with_retry_time_limit(Duration::from_secs(5));
        let planner = RosterPlanner::new(FlakySolver::new(1), config);

        let plan = planner.plan_raw(&WEEK).unwrap();
        assert_eq!(plan.total_headcount(), 51);
        assert_eq!(
            *planner.solver().seen_limits.lock().unwrap(),
            vec![Some(10), Some(5000)]
        );
    }

    #[test]
    fn test_retry_happens_only_once() {
        let config = PlannerConfig::default()
            .with_solve_options(SolveOptions::new().with_time_limit(Duration::from_millis(10)))
            .with_retry_time_limit(Duration::from_millis(20));
        let planner = RosterPlanner::new(FlakySolver::new(5), config);

        let err = planner.plan_raw(&WEEK).unwrap_err();
        assert!(matches!(
            err,
            RosterError::Solver(SolverError::TimedOut(limit)) if limit == Duration::from_millis(20)
        ));
        assert_eq!(planner.solver().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_solver_status_propagated_verbatim() {
        for status in [
            SolverError::Infeasible,
            SolverError::Cancelled,
            SolverError::Unavailable("no backend".into()),
        ] {
            let planner =
                RosterPlanner::new(FixedSolver(Err(status.clone())), PlannerConfig::default());
            match planner.plan_raw(&WEEK) {
                Err(RosterError::Solver(got)) => assert_eq!(got, status),
                other => panic!("expected solver error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_uncovering_solution_rejected() {
        let bad = StaffingSolution::new(vec![1, 0, 0, 0, 0, 0, 0]);
        let planner = RosterPlanner::new(FixedSolver(Ok(bad)), PlannerConfig::default());
        let err = planner.plan_raw(&WEEK).unwrap_err();
        assert!(matches!(err, RosterError::Solver(SolverError::Unavailable(_))));
    }

    #[test]
    fn test_cancelled_plan() {
        let token = CancelToken::new();
        token.cancel();
        let config = PlannerConfig::default()
            .with_solve_options(SolveOptions::new().with_cancel_token(token));
        let planner = RosterPlanner::with_default_solver(config);
        assert!(matches!(
            planner.plan_raw(&WEEK),
            Err(RosterError::Solver(SolverError::Cancelled))
        ));
    }

    #[test]
    fn test_bounded_planning() {
        let planner =
            RosterPlanner::with_default_solver(PlannerConfig::default().with_bounded_headcount());
        assert_eq!(planner.plan_raw(&WEEK).unwrap().total_headcount(), 51);
    }

    #[test]
    fn test_plan_scenarios_keeps_order() {
        let cycle = CycleConfig::weekly();
        let demands = vec![
            DemandVector::validate(&cycle, &WEEK).unwrap(),
            DemandVector::validate(&cycle, &[0; 7]).unwrap(),
            DemandVector::validate(&cycle, &[10; 7]).unwrap(),
        ];
        let planner = RosterPlanner::with_default_solver(PlannerConfig::default());
        let totals: Vec<u64> = planner
            .plan_scenarios(&demands)
            .into_iter()
            .map(|r| r.unwrap().total_headcount())
            .collect();
        assert_eq!(totals, vec![51, 0, 14]);
    }

    #[test]
    fn test_random_demand_coverage_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let planner = RosterPlanner::with_default_solver(PlannerConfig::default());

        for _ in 0..25 {
            let values: Vec<i64> = (0..7).map(|_| rng.random_range(0..60)).collect();
            let plan = planner.plan_raw(&values).unwrap();

            assert_covers(&plan);
            let total_demand: i64 = values.iter().sum();
            let lower = (total_demand as u64).div_ceil(5);
            let peak = *values.iter().max().unwrap() as u64;
            assert!(plan.total_headcount() >= lower);
            assert!(plan.total_headcount() >= peak);
            assert_eq!(plan.total_headcount(), plan.solution.total());

            // Matrix agrees with the solution cell by cell.
            let cycle = plan.report.cycle();
            for cohort in cycle.cohorts() {
                for day in cycle.days() {
                    let expected = if cohort.works_on(day) {
                        plan.solution.headcount(cohort.start())
                    } else {
                        0
                    };
                    assert_eq!(plan.report.matrix().cell(cohort.start(), day), expected);
                }
            }
        }
    }
}
