//! Simulation driver: the day-by-day loop that advances a [`WalletState`]
//! through a [`ComponentDag`], with snapshot/branch support for what-if
//! exploration.

use crate::core::SimClock;
use crate::dag::{ComponentDag, DagError};
use crate::models::asset::Asset;
use crate::models::config::{SimulationConfig, SimulationResult};
use crate::models::debt::Debt;
use crate::models::wallet::WalletState;
use crate::nodes::BANKRUPTCY_FLAG_ID;
use crate::rng::RngManager;
use crate::state::{StateError, StateManager};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One day's recorded observation, used downstream by the analytics module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub balance: Decimal,
    pub credit_score: Decimal,
    pub total_assets: Decimal,
    pub total_debt: Decimal,
    pub net_worth: Decimal,
    pub liquid_assets: Decimal,
}

impl DailyMetric {
    fn from_state(state: &WalletState) -> Self {
        Self {
            date: state.current_date,
            balance: state.balance,
            credit_score: state.credit_score(),
            total_assets: state.total_assets(),
            total_debt: state.total_debt(),
            net_worth: state.net_worth(),
            liquid_assets: state.liquid_assets(),
        }
    }
}

/// What a branch changes relative to the snapshot it forks from.
///
/// `balance` replaces the branched balance outright; `assets` are merged
/// (inserted or overwritten by name) into the branched asset map; `debts`
/// are appended after whatever the snapshot already carried.
#[derive(Debug, Clone, Default)]
pub struct BranchModifications {
    pub balance: Option<Decimal>,
    pub assets: Vec<Asset>,
    pub debts: Vec<Debt>,
}

/// Errors the driver itself can raise, wrapping the per-module error types
/// that the DAG and state manager already define.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Dag(#[from] DagError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Owns one run: a DAG, its wallet state, an RNG, and the timeline history
/// that snapshots and branches attach to.
pub struct Engine {
    config: SimulationConfig,
    dag: ComponentDag,
    state: WalletState,
    clock: SimClock,
    rng: RngManager,
    state_manager: StateManager,
    timeline_id: String,
    daily_metrics: Vec<DailyMetric>,
    is_bankrupt: bool,
}

impl Engine {
    /// Validate `dag`, build the initial wallet state from `config`, and
    /// seed the RNG from `config.random_seed`.
    pub fn new(config: SimulationConfig, dag: ComponentDag) -> Result<Self, SimulationError> {
        dag.validate()?;

        let rng = RngManager::new(config.random_seed);
        let state = WalletState::new(
            config.start_date,
            config.initial_balance,
            config.initial_credit_score,
            rng.get_state(),
        );

        let mut state_manager = StateManager::new();
        let timeline_id = state_manager.current_timeline_id().to_string();
        state_manager.add_state(&timeline_id, state.current_date, state.clone())?;
        let clock = SimClock::new(config.start_date);

        Ok(Self {
            config,
            dag,
            state,
            clock,
            rng,
            state_manager,
            timeline_id,
            daily_metrics: Vec::new(),
            is_bankrupt: false,
        })
    }

    /// Reconstruct an engine around already-branched state (used by
    /// [`Engine::create_branch`]).
    fn from_branch(
        config: SimulationConfig,
        dag: ComponentDag,
        state: WalletState,
        state_manager: StateManager,
        timeline_id: String,
    ) -> Result<Self, SimulationError> {
        dag.validate()?;
        let mut rng = RngManager::new(config.random_seed);
        rng.import_state(state.rng_state);
        let clock = SimClock::new(state.current_date);

        Ok(Self {
            config,
            dag,
            state,
            clock,
            rng,
            state_manager,
            timeline_id,
            daily_metrics: Vec::new(),
            is_bankrupt: false,
        })
    }

    /// Run one simulated day: execute the DAG, record the daily metric and
    /// deep-copy the resulting state into the timeline. Returns `true` if
    /// the bankruptcy node flagged bankruptcy today.
    pub fn step(&mut self) -> Result<bool, SimulationError> {
        let date = self.clock.current_date();
        let outputs = self.dag.execute_daily(&mut self.state, date, &mut self.rng)?;
        self.state.rng_state = self.rng.export_state();

        self.daily_metrics.push(DailyMetric::from_state(&self.state));
        self.state_manager
            .add_state(&self.timeline_id, date, self.state.clone())?;

        let bankrupt = outputs.iter().any(|(id, v)| id == BANKRUPTCY_FLAG_ID && *v == dec!(1));
        if bankrupt {
            self.is_bankrupt = true;
            log::warn!("bankruptcy flagged on {date}, stopping simulation early");
        } else {
            self.clock.advance_day();
            self.state.current_date = self.clock.current_date();
        }

        Ok(bankrupt)
    }

    /// The date the engine is currently positioned at (the next day
    /// `step` will execute, unless bankruptcy has already stopped it).
    pub fn current_date(&self) -> NaiveDate {
        self.clock.current_date()
    }

    /// Advance from the current date through `config.end_date`, stopping
    /// early on bankruptcy, then build the terminal result.
    pub fn run(&mut self) -> Result<SimulationResult, SimulationError> {
        log::info!(
            "starting simulation {} -> {} (seed {})",
            self.config.start_date,
            self.config.end_date,
            self.config.random_seed
        );

        while self.state.current_date <= self.config.end_date {
            let bankrupt = self.step()?;
            if bankrupt {
                break;
            }
        }

        Ok(self.result())
    }

    /// Deep-copy the live state and the DAG's node bookkeeping into the
    /// active timeline's snapshot map.
    pub fn create_snapshot(&mut self, description: impl Into<String>) -> Result<String, SimulationError> {
        let description = description.into();
        log::info!("creating snapshot at {}: {description}", self.state.current_date);
        let id = self.state_manager.create_snapshot(
            &self.timeline_id,
            self.state.current_date,
            self.state.clone(),
            self.dag.clone(),
            description,
        )?;
        Ok(id)
    }

    /// Branch a new, independent [`Engine`] off `snapshot_id`, applying
    /// `modifications` to the branched wallet state before returning it.
    pub fn create_branch(&mut self, snapshot_id: &str, modifications: BranchModifications) -> Result<Engine, SimulationError> {
        log::info!("branching from snapshot {snapshot_id}");
        let (branch_timeline_id, mut branched_state, branched_dag) =
            self.state_manager.branch_from_snapshot(&self.timeline_id, snapshot_id)?;

        if let Some(balance) = modifications.balance {
            branched_state.balance = balance;
        }
        for asset in modifications.assets {
            branched_state.assets.insert(asset);
        }
        for debt in modifications.debts {
            branched_state.debts.push(debt);
        }

        let mut state_manager = StateManager::rooted_at(branch_timeline_id.clone(), Some(self.timeline_id.clone()));
        state_manager.add_state(&branch_timeline_id, branched_state.current_date, branched_state.clone())?;

        Engine::from_branch(self.config.clone(), branched_dag, branched_state, state_manager, branch_timeline_id)
    }

    pub fn daily_metrics(&self) -> &[DailyMetric] {
        &self.daily_metrics
    }

    pub fn timeline_data(&self) -> Result<&crate::state::Timeline, SimulationError> {
        Ok(self.state_manager.get_timeline(&self.timeline_id)?)
    }

    pub fn is_bankrupt(&self) -> bool {
        self.is_bankrupt
    }

    /// Build the terminal [`SimulationResult`] from the current state.
    /// Analytics fields are left `None`; callers run the analytics module
    /// over `daily_metrics()` to populate them.
    pub fn result(&self) -> SimulationResult {
        SimulationResult::new(self.config.clone(), self.state.clone(), self.timeline_id.clone())
    }
}

/// Run `count` independent scenarios, each seeded with `base_config.random_seed + i`
/// and each built from a *fresh* DAG produced by `dag_factory` — never a shared
/// instance, since most nodes carry per-engine bookkeeping.
pub fn run_scenarios<F>(base_config: &SimulationConfig, dag_factory: F, count: u64) -> Result<Vec<SimulationResult>, SimulationError>
where
    F: Fn() -> ComponentDag,
{
    let mut results = Vec::with_capacity(count as usize);
    for i in 0..count {
        let mut config = base_config.clone();
        config.random_seed = base_config.random_seed + i;
        let mut engine = Engine::new(config, dag_factory())?;
        results.push(engine.run()?);
    }
    Ok(results)
}
