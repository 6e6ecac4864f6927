//! Cyclic workforce rostering for the U-Engine ecosystem.
//!
//! Given per-day staffing demand over a repeating cycle, finds the minimum
//! number of workers per start day such that every day is covered, where
//! each worker works a fixed block of consecutive days and then rests for
//! a fixed block (the classic 5-on / 2-off days-off scheduling problem).
//!
//! # Modules
//!
//! - **`models`**: `Day`, `CycleConfig`, `Cohort`, `DemandVector`, `DayLabels`
//! - **`validation`**: Input checks for cycles and demand vectors
//! - **`ilp`**: Integer-programming formulation (`StaffingModelBuilder`)
//! - **`solver`**: `StaffingSolver` seam and the `good_lp` backend
//! - **`report`**: Cohort × day matrix, coverage, violations, KPIs
//! - **`planner`**: End-to-end validate → build → solve → report pipeline
//! - **`config`**: JSON-loadable planner configuration
//!
//! # Example
//!
//! ```
//! use u_roster::config::PlannerConfig;
//! use u_roster::models::DayLabels;
//! use u_roster::planner::RosterPlanner;
//!
//! let planner = RosterPlanner::with_default_solver(PlannerConfig::default());
//! let plan = planner.plan_raw(&[31, 45, 40, 40, 48, 30, 20]).unwrap();
//! assert_eq!(plan.total_headcount(), 51);
//!
//! let labels = DayLabels::for_cycle(plan.report.cycle());
//! println!("{}", plan.report.table(&labels, &plan.demand));
//! ```
//!
//! # References
//!
//! - Baker (1974), "Scheduling a Full-Time Workforce to Meet Cyclic Staffing Requirements"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 13 (Workforce Scheduling)

pub mod config;
pub mod error;
pub mod ilp;
pub mod models;
pub mod planner;
pub mod report;
pub mod solver;
pub mod validation;

pub use error::{RosterError, RosterResult, SolverError};
