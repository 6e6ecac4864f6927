//! Roster quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total headcount | Sum of cohort headcounts |
//! | Lower bound | ceil(sum(demand) / work_span) |
//! | Gap | Total headcount - lower bound |
//! | Total surplus | Sum of max(0, coverage - demand) |
//! | Utilization | Demanded worker-days / scheduled worker-days |
//! | Binding days | Days with positive demand met exactly |
//!
//! Each worker covers exactly `work_span` days per cycle, so no feasible
//! roster can go below the lower bound. It is a sanity bound, not a
//! guarantee of attainment.

use serde::Serialize;

use super::ScheduleReport;
use crate::models::{Day, DemandVector};

/// Roster performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct RosterKpi {
    /// Total headcount.
    pub total_headcount: u64,
    /// ceil(total demand / work span).
    pub lower_bound: u64,
    /// Headcount above the lower bound.
    pub gap: u64,
    /// Worker-days scheduled beyond demand.
    pub total_surplus: u64,
    /// Number of understaffed days (0 for a valid roster).
    pub understaffed_days: usize,
    /// Days with positive demand met exactly.
    pub binding_days: Vec<Day>,
    /// Demanded / scheduled worker-days (0.0..1.0, 1.0 when nothing is scheduled).
    pub utilization: f64,
}

impl RosterKpi {
    /// Computes KPIs for a report against its demand.
    pub fn calculate(report: &ScheduleReport, demand: &DemandVector) -> Self {
        let work_span = u64::from(report.cycle().work_span());
        let total_demand = demand.total();
        let lower_bound = total_demand.div_ceil(work_span);

        let coverage = report.coverage();
        let mut total_surplus: u64 = 0;
        let mut understaffed_days: usize = 0;
        let mut met_worker_days: u64 = 0;

        for (i, &covered) in coverage.iter().enumerate() {
            let required = u64::from(demand.as_slice().get(i).copied().unwrap_or(0));
            if covered >= required {
                total_surplus += covered - required;
                met_worker_days += required;
            } else {
                understaffed_days += 1;
                met_worker_days += covered;
            }
        }

        let scheduled_worker_days: u64 = coverage.iter().sum();
        let utilization = if scheduled_worker_days == 0 {
            1.0
        } else {
            met_worker_days as f64 / scheduled_worker_days as f64
        };

        let total_headcount = report.total_headcount();

        Self {
            total_headcount,
            lower_bound,
            gap: total_headcount.saturating_sub(lower_bound),
            total_surplus,
            understaffed_days,
            binding_days: report.binding_days(demand),
            utilization,
        }
    }

    /// Whether the roster is within `max_gap` of the lower bound and at
    /// least `min_utilization` utilized, with no understaffed day.
    pub fn meets_thresholds(&self, max_gap: u64, min_utilization: f64) -> bool {
        self.understaffed_days == 0 && self.gap <= max_gap && self.utilization >= min_utilization
    }
}
