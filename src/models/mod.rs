//! Rostering domain models.
//!
//! Immutable value types describing a cyclic days-off problem: the cycle
//! and its day arithmetic, cohort rotation patterns, per-day demand, and
//! display labels.
//!
//! # Domain Mappings
//!
//! | u-roster | Retail | Hospital | Call Center |
//! |----------|--------|----------|-------------|
//! | Cohort | Shift crew | Nursing rotation | Agent team |
//! | DemandVector | Floor staff per day | Beds to cover | Forecast seats |
//! | CycleConfig | 5-on / 2-off week | 4-on / 3-off rota | 5-on / 2-off week |

mod cohort;
mod cycle;
mod demand;
mod labels;

pub use cohort::{off_duty_days, on_duty_days, Cohort};
pub use cycle::{CycleConfig, Day, DAYS_PER_WEEK};
pub use demand::DemandVector;
pub use labels::DayLabels;
