//! Per-day staffing demand.

use serde::Serialize;

use super::{CycleConfig, Day};
use crate::error::{RosterError, RosterResult};
use crate::validation::validate_demand;

/// Required on-duty headcount for each day of the cycle.
///
/// Always exactly `cycle_length` entries; index `i` is the demand on day `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DemandVector {
    values: Vec<u32>,
}

impl DemandVector {
    /// Validates raw (possibly negative) demand input.
    pub fn validate(cycle: &CycleConfig, values: &[i64]) -> RosterResult<Self> {
        validate_demand(cycle.cycle_length() as usize, values)
            .map_err(RosterError::InvalidDemand)?;

        // Entries were range-checked above.
        Ok(Self {
            values: values.iter().map(|&v| v as u32).collect(),
        })
    }

    /// Builds a demand vector from headcounts, checking only the length.
    pub fn from_counts(cycle: &CycleConfig, values: Vec<u32>) -> RosterResult<Self> {
        let raw: Vec<i64> = values.iter().map(|&v| i64::from(v)).collect();
        validate_demand(cycle.cycle_length() as usize, &raw).map_err(RosterError::InvalidDemand)?;
        Ok(Self { values })
    }

    /// Demand on `day`.
    ///
    /// # Panics
    /// Panics if `day` lies outside the cycle this vector was validated for.
    #[inline]
    pub fn on(&self, day: Day) -> u32 {
        self.values[day.index()]
    }

    /// Demand values in day order.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    /// Number of days.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no days (never true for a validated vector).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of demand over the cycle (worker-days).
    pub fn total(&self) -> u64 {
        self.values.iter().map(|&v| u64::from(v)).sum()
    }

    /// Largest single-day demand.
    pub fn peak(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Whether no day requires anyone.
    pub fn is_all_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0)
    }
}
