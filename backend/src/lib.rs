//! Future Wallet Core
//!
//! A deterministic, day-by-day personal-finance simulator: a dependency-
//! ordered graph of financial components (salary, rent, investments, taxes,
//! credit scoring, bankruptcy, …) advances a single shared wallet state one
//! calendar day at a time, with snapshot/branch support for "what-if"
//! exploration and behavioral/risk analytics over the resulting history.
//!
//! # Architecture
//!
//! - **core**: calendar time (`SimClock`).
//! - **decimal**: exact-decimal monetary helpers; the only two float
//!   boundaries in the crate are `rng::RngManager::gauss` and `analytics`.
//! - **rng**: deterministic xorshift64* random number generation.
//! - **models**: domain types (`Asset`, `Debt`, `Transaction`, `WalletState`,
//!   `SimulationConfig`, `SimulationResult`).
//! - **dag**: the component DAG — registration, validation, topological
//!   scheduling, daily execution.
//! - **nodes**: the financial component implementations that populate a DAG.
//! - **state**: snapshot/timeline/branching state management.
//! - **orchestrator**: the day-by-day simulation driver (`Engine`).
//! - **analytics**: derived behavioral and risk metrics over a run's daily
//!   history.
//!
//! # Critical invariants
//!
//! 1. All monetary values are `rust_decimal::Decimal`, never `f64`.
//! 2. All randomness flows through `rng::RngManager`, seeded and
//!    reproducible.
//! 3. Node execution order is the insertion-tiebroken topological order,
//!    stable across runs with the same DAG construction.

pub mod analytics;
pub mod core;
pub mod dag;
pub mod decimal;
pub mod error;
pub mod models;
pub mod nodes;
pub mod orchestrator;
pub mod rng;
pub mod state;

pub use dag::{ComponentDag, DagError, ExecutionContext, FinancialNode};
pub use error::WalletError;
pub use models::{Asset, AssetType, Debt, SimulationConfig, SimulationResult, Transaction, WalletState};
pub use orchestrator::{run_scenarios, BranchModifications, DailyMetric, Engine, SimulationError};
pub use rng::RngManager;
pub use state::{Snapshot, StateError, StateManager, Timeline};
