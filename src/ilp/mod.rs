//! Integer-programming formulation of cyclic days-off staffing.
//!
//! One non-negative integer variable per cohort (start day) holds that
//! cohort's headcount. For every calendar day, the cohorts on duty that day
//! must together meet the day's demand. The objective minimizes total
//! headcount.
//!
//! ```text
//! minimize    sum_s x_s
//! subject to  sum_{s : d in on_duty(s)} x_s >= demand[d]   for every day d
//!             x_s >= 0, integer
//! ```
//!
//! The model is backend-neutral; [`crate::solver`] translates it for a
//! concrete solver.
//!
//! # Reference
//! - Baker (1974), "Scheduling a Full-Time Workforce to Meet Cyclic Staffing Requirements"
//! - Bartholdi, Orlin & Ratliff (1980), "Cyclic Scheduling via Integer Programs
//!   with Circular Ones"

use serde::Serialize;
use tracing::debug;

use crate::error::{RosterError, RosterResult};
use crate::models::{Cohort, CycleConfig, Day, DemandVector};
use crate::solver::StaffingSolution;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Headcount variable for one cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortVariable {
    /// The cohort whose headcount this variable holds.
    pub cohort: Cohort,
    /// Lower bound (always 0).
    pub lower: u32,
    /// Upper bound. `None` = unbounded above.
    pub upper: Option<u32>,
}

/// Coverage requirement for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageConstraint {
    /// Calendar day being covered.
    pub day: Day,
    /// Start days of the cohorts on duty that day.
    pub cohorts: Vec<Day>,
    /// Required headcount (right-hand side).
    pub demand: u32,
}

/// Optimization direction and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Objective {
    /// Minimize the sum of all cohort headcounts.
    MinimizeTotalHeadcount,
}

/// A built staffing model.
///
/// Variable `i` always belongs to the cohort starting on day `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingModel {
    cycle: CycleConfig,
    variables: Vec<CohortVariable>,
    constraints: Vec<CoverageConstraint>,
    objective: Objective,
}

impl StaffingModel {
    /// Cycle the model was built for.
    pub fn cycle(&self) -> &CycleConfig {
        &self.cycle
    }

    /// Decision variables, indexed by cohort start day.
    pub fn variables(&self) -> &[CohortVariable] {
        &self.variables
    }

    /// Coverage constraints, indexed by calendar day.
    pub fn constraints(&self) -> &[CoverageConstraint] {
        &self.constraints
    }

    /// Objective.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Number of decision variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// On-duty headcount per calendar day under `solution`.
    pub fn coverage_of(&self, solution: &StaffingSolution) -> Vec<u64> {
        self.constraints
            .iter()
            .map(|c| {
                c.cohorts
                    .iter()
                    .map(|&s| u64::from(solution.headcount(s)))
                    .sum()
            })
            .collect()
    }

    /// Whether `solution` respects every bound and coverage constraint.
    pub fn is_satisfied_by(&self, solution: &StaffingSolution) -> bool {
        if solution.headcounts().len() != self.variables.len() {
            return false;
        }

        let within_bounds = self.variables.iter().all(|v| {
            let x = solution.headcount(v.cohort.start());
            x >= v.lower && v.upper.map_or(true, |ub| x <= ub)
        });

        within_bounds
            && self
                .constraints
                .iter()
                .zip(self.coverage_of(solution))
                .all(|(c, covered)| covered >= u64::from(c.demand))
    }

    /// Objective value of `solution`.
    pub fn objective_value(&self, solution: &StaffingSolution) -> u64 {
        match self.objective {
            Objective::MinimizeTotalHeadcount => solution.total(),
        }
    }
}

/// Builds a [`StaffingModel`] from demand and a cycle configuration.
///
/// # Example
/// ```
/// use u_roster::ilp::StaffingModelBuilder;
/// use u_roster::models::{CycleConfig, DemandVector};
///
/// let cycle = CycleConfig::weekly();
/// let demand = DemandVector::validate(&cycle, &[31, 45, 40, 40, 48, 30, 20]).unwrap();
/// let model = StaffingModelBuilder::new(&demand, cycle).build().unwrap();
/// assert_eq!(model.variable_count(), 7);
/// assert_eq!(model.constraint_count(), 7);
/// ```
pub struct StaffingModelBuilder<'a> {
    demand: &'a DemandVector,
    cycle: CycleConfig,
    bound_headcount: bool,
}

impl<'a> StaffingModelBuilder<'a> {
    /// Creates a new builder.
    pub fn new(demand: &'a DemandVector, cycle: CycleConfig) -> Self {
        Self {
            demand,
            cycle,
            bound_headcount: false,
        }
    }

    /// Caps every cohort at total demand.
    ///
    /// For backends that need finite bounds. No optimum is cut off: a
    /// single cohort never needs more workers than the whole cycle demands.
    pub fn bounded(mut self) -> Self {
        self.bound_headcount = true;
        self
    }

    /// Builds the model.
    ///
    /// Creates:
    /// - A headcount variable per cohort, `x_s >= 0`
    /// - A coverage constraint per calendar day
    /// - A minimize-total-headcount objective
    ///
    /// Fails with `InvalidDemand` if the demand vector does not have one
    /// entry per cycle day. Infeasibility is left for the solver to report.
    pub fn build(&self) -> RosterResult<StaffingModel> {
        let c = self.cycle.cycle_length() as usize;
        if self.demand.len() != c {
            return Err(RosterError::InvalidDemand(vec![ValidationError::new(
                ValidationErrorKind::DemandLength,
                format!(
                    "expected {c} demand entries, got {}",
                    self.demand.len()
                ),
            )]));
        }

        let upper = if self.bound_headcount {
            Some(u32::try_from(self.demand.total()).unwrap_or(u32::MAX))
        } else {
            None
        };

        let cohorts: Vec<Cohort> = self.cycle.cohorts().collect();

        let variables: Vec<CohortVariable> = cohorts
            .iter()
            .map(|&cohort| CohortVariable {
                cohort,
                lower: 0,
                upper,
            })
            .collect();

        let constraints: Vec<CoverageConstraint> = self
            .cycle
            .days()
            .map(|day| CoverageConstraint {
                day,
                cohorts: cohorts
                    .iter()
                    .filter(|cohort| cohort.works_on(day))
                    .map(Cohort::start)
                    .collect(),
                demand: self.demand.on(day),
            })
            .collect();

        debug!(
            variables = variables.len(),
            constraints = constraints.len(),
            total_demand = self.demand.total(),
            bounded = self.bound_headcount,
            "built staffing model"
        );

        Ok(StaffingModel {
            cycle: self.cycle,
            variables,
            constraints,
            objective: Objective::MinimizeTotalHeadcount,
        })
    }
}
