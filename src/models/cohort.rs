//! Cohort rotation patterns.
//!
//! A cohort is a group of interchangeable workers who share a start day.
//! Starting on day `s`, a cohort works days `[s, s + W)` and rests on days
//! `[s + W, s + W + R)`, all modulo the cycle length.
//!
//! Cohorts hold no state beyond their start day and the cycle; duty sets
//! are recomputed on demand.

use serde::Serialize;
use std::collections::BTreeSet;

use super::{CycleConfig, Day};

/// Workers sharing one start day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cohort {
    start: Day,
    #[serde(skip)]
    cycle: CycleConfig,
}

impl Cohort {
    /// Creates the cohort starting on `start`.
    pub fn new(start: Day, cycle: CycleConfig) -> Self {
        Self { start, cycle }
    }

    /// Start day (also the cohort's identifier).
    #[inline]
    pub fn start(&self) -> Day {
        self.start
    }

    /// Days this cohort is on duty.
    pub fn on_duty_days(&self) -> BTreeSet<Day> {
        on_duty_days(self.start, &self.cycle)
    }

    /// Days this cohort is off duty.
    pub fn off_duty_days(&self) -> BTreeSet<Day> {
        off_duty_days(self.start, &self.cycle)
    }

    /// Whether the cohort is on duty on `day`.
    #[inline]
    pub fn works_on(&self, day: Day) -> bool {
        self.start.distance_to(day, &self.cycle) < self.cycle.work_span()
    }
}

/// `{ (start + k) mod C : k in [0, W) }`.
pub fn on_duty_days(start: Day, cycle: &CycleConfig) -> BTreeSet<Day> {
    (0..cycle.work_span())
        .map(|k| start.offset(k, cycle))
        .collect()
}

/// `{ (start + k) mod C : k in [W, W + R) }`.
pub fn off_duty_days(start: Day, cycle: &CycleConfig) -> BTreeSet<Day> {
    let w = cycle.work_span();
    (w..w + cycle.rest_span())
        .map(|k| start.offset(k, cycle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(indices: &[u32]) -> BTreeSet<Day> {
        indices.iter().copied().map(Day::new).collect()
    }

    #[test]
    fn test_monday_cohort() {
        let cohort = Cohort::new(Day::new(0), CycleConfig::weekly());
        assert_eq!(cohort.on_duty_days(), days(&[0, 1, 2, 3, 4]));
        assert_eq!(cohort.off_duty_days(), days(&[5, 6]));
    }

    #[test]
    fn test_wrapping_cohort() {
        // Starts Thursday: Thu..Mon on, Tue/Wed off.
        let cohort = Cohort::new(Day::new(3), CycleConfig::weekly());
        assert_eq!(cohort.on_duty_days(), days(&[3, 4, 5, 6, 0]));
        assert_eq!(cohort.off_duty_days(), days(&[1, 2]));
    }

    #[test]
    fn test_duty_sets_partition_cycle() {
        let cfg = CycleConfig::new(9, 4, 5).unwrap();
        for cohort in cfg.cohorts() {
            let on = cohort.on_duty_days();
            let off = cohort.off_duty_days();
            assert_eq!(on.len(), 4);
            assert_eq!(off.len(), 5);
            assert!(on.is_disjoint(&off));
            let all: BTreeSet<Day> = on.union(&off).copied().collect();
            assert_eq!(all, cfg.days().collect());
        }
    }

    #[test]
    fn test_works_on_matches_duty_set() {
        let cfg = CycleConfig::weekly();
        for cohort in cfg.cohorts() {
            let on = cohort.on_duty_days();
            for day in cfg.days() {
                assert_eq!(cohort.works_on(day), on.contains(&day));
            }
        }
    }

    #[test]
    fn test_each_day_covered_by_work_span_cohorts() {
        let cfg = CycleConfig::weekly();
        for day in cfg.days() {
            let covering = cfg.cohorts().filter(|c| c.works_on(day)).count();
            assert_eq!(covering, 5);
        }
    }

    #[test]
    fn test_free_functions_match_methods() {
        let cfg = CycleConfig::weekly();
        let start = Day::new(6);
        assert_eq!(on_duty_days(start, &cfg), Cohort::new(start, cfg).on_duty_days());
        assert_eq!(off_duty_days(start, &cfg), days(&[4, 5]));
    }
}
