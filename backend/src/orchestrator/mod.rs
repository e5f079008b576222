//! Orchestrator: the day-by-day simulation driver.
//!
//! See [`engine`] for the `Engine` type and the daily loop.

pub mod engine;

pub use engine::{run_scenarios, BranchModifications, DailyMetric, Engine, SimulationError};
