//! Weekly roster reports.
//!
//! Projects a solved per-cohort headcount vector onto a cohort × day
//! matrix and derives coverage figures from it.
//!
//! # Matrix
//!
//! ```text
//! matrix[s][d] = headcount[s]  if d is an on-duty day of cohort s
//!                0             otherwise
//! ```
//!
//! Rows are cohort start days, columns are calendar days. Column sums are
//! the on-duty headcount per day.

mod kpi;

pub use kpi::RosterKpi;

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::models::{CycleConfig, Day, DayLabels, DemandVector};
use crate::solver::StaffingSolution;

/// Cohort × day headcount table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleMatrix {
    cells: Vec<Vec<u32>>,
}

impl ScheduleMatrix {
    /// Builds the matrix for `solution` under `cycle`.
    pub fn from_solution(solution: &StaffingSolution, cycle: &CycleConfig) -> Self {
        let cells = cycle
            .cohorts()
            .map(|cohort| {
                let headcount = solution.headcount(cohort.start());
                cycle
                    .days()
                    .map(|day| if cohort.works_on(day) { headcount } else { 0 })
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Headcount of cohort `start` on calendar day `day` (0 if out of range).
    #[inline]
    pub fn cell(&self, start: Day, day: Day) -> u32 {
        self.cells
            .get(start.index())
            .and_then(|row| row.get(day.index()))
            .copied()
            .unwrap_or(0)
    }

    /// Row for cohort `start`.
    pub fn row(&self, start: Day) -> Option<&[u32]> {
        self.cells.get(start.index()).map(Vec::as_slice)
    }

    /// All rows in start-day order.
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// Number of rows (= number of columns = cycle length).
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// On-duty headcount on `day`.
    pub fn column_total(&self, day: Day) -> u64 {
        self.cells
            .iter()
            .filter_map(|row| row.get(day.index()))
            .map(|&n| u64::from(n))
            .sum()
    }

    /// Renders the matrix as a text table with the given labels.
    pub fn table<'a>(&'a self, labels: &'a DayLabels) -> MatrixTable<'a> {
        MatrixTable {
            matrix: self,
            labels,
            demand: None,
        }
    }
}

/// A day whose on-duty headcount falls short of demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Understaffed day.
    pub day: Day,
    /// Required headcount.
    pub required: u32,
    /// Scheduled headcount.
    pub scheduled: u64,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Workers missing on this day.
    pub fn shortfall(&self) -> u64 {
        u64::from(self.required).saturating_sub(self.scheduled)
    }
}

/// Derived view of a solved roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    cycle: CycleConfig,
    matrix: ScheduleMatrix,
    total_headcount: u64,
}

impl ScheduleReport {
    /// Builds the matrix and total headcount for `solution`.
    pub fn build(solution: &StaffingSolution, cycle: &CycleConfig) -> Self {
        Self {
            cycle: *cycle,
            matrix: ScheduleMatrix::from_solution(solution, cycle),
            total_headcount: solution.total(),
        }
    }

    /// Cycle the report was built for.
    pub fn cycle(&self) -> &CycleConfig {
        &self.cycle
    }

    /// Cohort × day matrix.
    pub fn matrix(&self) -> &ScheduleMatrix {
        &self.matrix
    }

    /// Total headcount across all cohorts.
    pub fn total_headcount(&self) -> u64 {
        self.total_headcount
    }

    /// On-duty headcount per calendar day.
    pub fn coverage(&self) -> Vec<u64> {
        self.cycle
            .days()
            .map(|d| self.matrix.column_total(d))
            .collect()
    }

    /// Coverage minus demand per day. Negative = understaffed.
    pub fn surplus(&self, demand: &DemandVector) -> Vec<i64> {
        self.cycle
            .days()
            .map(|d| self.matrix.column_total(d) as i64 - i64::from(demand.on(d)))
            .collect()
    }

    /// Days with positive demand met exactly.
    pub fn binding_days(&self, demand: &DemandVector) -> Vec<Day> {
        self.cycle
            .days()
            .filter(|&d| demand.on(d) > 0 && self.matrix.column_total(d) == u64::from(demand.on(d)))
            .collect()
    }

    /// Days where coverage falls short of demand.
    ///
    /// Empty for any solution returned by a conforming solver.
    pub fn violations(&self, demand: &DemandVector) -> Vec<Violation> {
        let violations: Vec<Violation> = self
            .cycle
            .days()
            .filter_map(|day| {
                let required = demand.on(day);
                let scheduled = self.matrix.column_total(day);
                (scheduled < u64::from(required)).then(|| Violation {
                    day,
                    required,
                    scheduled,
                    message: format!(
                        "day {day} has {scheduled} on duty but requires {required}"
                    ),
                })
            })
            .collect();

        if !violations.is_empty() {
            warn!(count = violations.len(), "roster leaves days understaffed");
        }
        violations
    }

    /// Computes KPIs against `demand`.
    pub fn kpi(&self, demand: &DemandVector) -> RosterKpi {
        RosterKpi::calculate(self, demand)
    }

    /// Text table with coverage and demand rows.
    pub fn table<'a>(&'a self, labels: &'a DayLabels, demand: &'a DemandVector) -> MatrixTable<'a> {
        MatrixTable {
            matrix: &self.matrix,
            labels,
            demand: Some(demand),
        }
    }
}

/// Display adapter for [`ScheduleMatrix`].
///
/// Rows are labelled by cohort start day, columns by calendar day. A
/// coverage row is always printed; a demand row when demand is supplied.
pub struct MatrixTable<'a> {
    matrix: &'a ScheduleMatrix,
    labels: &'a DayLabels,
    demand: Option<&'a DemandVector>,
}

impl fmt::Display for MatrixTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.matrix.size();
        let days: Vec<Day> = (0..n as u32).map(Day::new).collect();

        let coverage: Vec<u64> = days.iter().map(|&d| self.matrix.column_total(d)).collect();
        let widest_value = coverage
            .iter()
            .map(|v| v.to_string().len())
            .chain(self.demand.iter().flat_map(|d| d.as_slice().iter().map(|v| v.to_string().len())))
            .max()
            .unwrap_or(1);
        let col = self.labels.max_width().max(widest_value);
        let head = days
            .iter()
            .map(|&d| self.labels.label(d).chars().count() + "Start ".len())
            .max()
            .unwrap_or(0)
            .max("Coverage".len());

        write!(f, "{:head$}", "")?;
        for &d in &days {
            write!(f, " {:>col$}", self.labels.label(d))?;
        }
        writeln!(f)?;

        for &s in &days {
            write!(f, "{:head$}", format!("Start {}", self.labels.label(s)))?;
            for &d in &days {
                write!(f, " {:>col$}", self.matrix.cell(s, d))?;
            }
            writeln!(f)?;
        }

        write!(f, "{:head$}", "Coverage")?;
        for v in &coverage {
            write!(f, " {v:>col$}")?;
        }
        writeln!(f)?;

        if let Some(demand) = self.demand {
            write!(f, "{:head$}", "Demand")?;
            for v in demand.as_slice() {
                write!(f, " {v:>col$}")?;
            }
            writeln!(f)?;
        }

        write!(f, "Total headcount: {}", headcount_total(self.matrix))
    }
}

fn headcount_total(matrix: &ScheduleMatrix) -> u64 {
    // Each row's headcount is the value in any of its non-zero cells.
    matrix
        .rows()
        .iter()
        .map(|row| u64::from(row.iter().copied().max().unwrap_or(0)))
        .sum()
}
