//! Cycle configuration and day arithmetic.
//!
//! A rostering cycle is `cycle_length` days long and repeats forever.
//! Every cohort works `work_span` consecutive days and then rests for
//! `rest_span` days, so `work_span + rest_span == cycle_length`.
//!
//! # Day Model
//! Days are indices in `[0, cycle_length)`. Index 0 is the first day of
//! the cycle (Monday for the canonical week). Arithmetic wraps around.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Cohort;
use crate::error::{RosterError, RosterResult};
use crate::validation::validate_cycle;

/// Canonical weekly cycle length.
pub const DAYS_PER_WEEK: u32 = 7;

/// A day within the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(u32);

impl Day {
    /// Creates a day from its index.
    ///
    /// The index is not checked against any cycle; use
    /// [`CycleConfig::day`] for a checked constructor.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Day index within the cycle.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The day `offset` days after this one, wrapping around the cycle.
    #[inline]
    pub fn offset(self, offset: u32, cycle: &CycleConfig) -> Day {
        let c = u64::from(cycle.cycle_length);
        Day(((u64::from(self.0) + u64::from(offset)) % c) as u32)
    }

    /// Number of days from `self` forward to `later`, wrapping around the cycle.
    #[inline]
    pub fn distance_to(self, later: Day, cycle: &CycleConfig) -> u32 {
        let c = u64::from(cycle.cycle_length);
        ((u64::from(later.0) + c - u64::from(self.0) % c) % c) as u32
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Work/rest rotation shared by every cohort.
///
/// Instances are always valid: construction and deserialization both go
/// through [`validate_cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCycleConfig", into = "RawCycleConfig")]
pub struct CycleConfig {
    cycle_length: u32,
    work_span: u32,
    rest_span: u32,
}

/// Unchecked wire form of [`CycleConfig`].
///
/// Signed so that negative spans in input files reach validation instead
/// of failing as a type error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCycleConfig {
    cycle_length: i64,
    work_span: i64,
    rest_span: i64,
}

impl CycleConfig {
    /// Creates a validated cycle configuration.
    pub fn new(cycle_length: u32, work_span: u32, rest_span: u32) -> RosterResult<Self> {
        validate_cycle(
            i64::from(cycle_length),
            i64::from(work_span),
            i64::from(rest_span),
        )
        .map_err(RosterError::InvalidCycleConfig)?;

        Ok(Self {
            cycle_length,
            work_span,
            rest_span,
        })
    }

    /// The canonical week: five working days followed by two days off.
    pub const fn weekly() -> Self {
        Self {
            cycle_length: DAYS_PER_WEEK,
            work_span: 5,
            rest_span: 2,
        }
    }

    /// Days per cycle (C).
    #[inline]
    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    /// Consecutive working days per cohort (W).
    #[inline]
    pub fn work_span(&self) -> u32 {
        self.work_span
    }

    /// Consecutive rest days per cohort (R).
    #[inline]
    pub fn rest_span(&self) -> u32 {
        self.rest_span
    }

    /// Checked day constructor.
    pub fn day(&self, index: u32) -> Option<Day> {
        (index < self.cycle_length).then_some(Day(index))
    }

    /// All days of the cycle in order.
    pub fn days(&self) -> impl Iterator<Item = Day> {
        (0..self.cycle_length).map(Day)
    }

    /// One cohort per possible start day, in start-day order.
    pub fn cohorts(&self) -> impl Iterator<Item = Cohort> + '_ {
        self.days().map(move |start| Cohort::new(start, *self))
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::weekly()
    }
}

impl TryFrom<RawCycleConfig> for CycleConfig {
    type Error = RosterError;

    fn try_from(raw: RawCycleConfig) -> Result<Self, Self::Error> {
        validate_cycle(raw.cycle_length, raw.work_span, raw.rest_span)
            .map_err(RosterError::InvalidCycleConfig)?;

        // Ranges were checked above.
        Ok(Self {
            cycle_length: raw.cycle_length as u32,
            work_span: raw.work_span as u32,
            rest_span: raw.rest_span as u32,
        })
    }
}

impl From<CycleConfig> for RawCycleConfig {
    fn from(cfg: CycleConfig) -> Self {
        Self {
            cycle_length: i64::from(cfg.cycle_length),
            work_span: i64::from(cfg.work_span),
            rest_span: i64::from(cfg.rest_span),
        }
    }
}
