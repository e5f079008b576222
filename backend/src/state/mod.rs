//! State management: snapshots, timelines, and what-if branching.
//!
//! A [`Snapshot`] freezes a [`WalletState`] together with the DAG's own
//! node bookkeeping (last-payment months, cached topological order, …) at
//! one simulated date. Branching from a snapshot clones both halves, so two
//! branches taken from the same point in time never alias each other's
//! mutable state — a missed monthly payment recorded on one branch's
//! `DebtPaymentNode` must never leak into the other.

use crate::dag::ComponentDag;
use crate::models::wallet::WalletState;
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while navigating timelines or snapshots.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("unknown snapshot id '{0}'")]
    UnknownSnapshot(String),

    #[error("unknown timeline id '{0}'")]
    UnknownTimeline(String),
}

/// A frozen point-in-time copy of both the wallet and the DAG's internal
/// bookkeeping, deep enough to resume simulating from independently.
#[derive(Clone)]
pub struct Snapshot {
    pub id: String,
    pub simulation_date: NaiveDate,
    pub wallet_state: WalletState,
    pub dag: ComponentDag,
    pub parent_snapshot_id: Option<String>,
    pub description: String,
}

impl Snapshot {
    pub fn new(
        simulation_date: NaiveDate,
        wallet_state: WalletState,
        dag: ComponentDag,
        parent_snapshot_id: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            simulation_date,
            wallet_state,
            dag,
            parent_snapshot_id,
            description: description.into(),
        }
    }
}

/// One line of simulation history: a sequence of daily wallet states plus
/// the snapshots taken along it. Timelines form a tree via
/// `parent_timeline_id` when a branch is taken mid-run.
#[derive(Clone)]
pub struct Timeline {
    pub id: String,
    pub parent_timeline_id: Option<String>,
    states: HashMap<NaiveDate, WalletState>,
    snapshots: HashMap<String, Snapshot>,
}

impl Timeline {
    pub fn new(parent_timeline_id: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), parent_timeline_id)
    }

    /// Construct a timeline under a caller-chosen id, used when a branch's
    /// id was already minted by the [`StateManager`] it branched from.
    pub fn with_id(id: String, parent_timeline_id: Option<String>) -> Self {
        Self {
            id,
            parent_timeline_id,
            states: HashMap::new(),
            snapshots: HashMap::new(),
        }
    }

    pub fn record_state(&mut self, date: NaiveDate, state: WalletState) {
        self.states.insert(date, state);
    }

    pub fn state_at(&self, date: NaiveDate) -> Option<&WalletState> {
        self.states.get(&date)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn snapshot(&self, snapshot_id: &str) -> Option<&Snapshot> {
        self.snapshots.get(snapshot_id)
    }
}

/// Owns every timeline created during a run and tracks which one is
/// "current" for callers that don't explicitly address a timeline id.
pub struct StateManager {
    timelines: HashMap<String, Timeline>,
    current_timeline_id: String,
}

impl StateManager {
    pub fn new() -> Self {
        Self::rooted_at(Uuid::new_v4().to_string(), None)
    }

    /// Construct a manager whose root timeline carries a caller-chosen id
    /// (and optional parent), for the case where that id was already
    /// minted elsewhere (e.g. a branch id handed out by another manager).
    pub fn rooted_at(timeline_id: String, parent_timeline_id: Option<String>) -> Self {
        let root = Timeline::with_id(timeline_id.clone(), parent_timeline_id);
        let mut timelines = HashMap::new();
        timelines.insert(timeline_id.clone(), root);
        Self {
            timelines,
            current_timeline_id: timeline_id,
        }
    }

    pub fn current_timeline_id(&self) -> &str {
        &self.current_timeline_id
    }

    pub fn add_state(&mut self, timeline_id: &str, date: NaiveDate, state: WalletState) -> Result<(), StateError> {
        let timeline = self
            .timelines
            .get_mut(timeline_id)
            .ok_or_else(|| StateError::UnknownTimeline(timeline_id.to_string()))?;
        timeline.record_state(date, state);
        Ok(())
    }

    /// Take a snapshot of the given state/dag pair and file it under
    /// `timeline_id`.
    pub fn create_snapshot(
        &mut self,
        timeline_id: &str,
        simulation_date: NaiveDate,
        wallet_state: WalletState,
        dag: ComponentDag,
        description: impl Into<String>,
    ) -> Result<String, StateError> {
        let timeline = self
            .timelines
            .get_mut(timeline_id)
            .ok_or_else(|| StateError::UnknownTimeline(timeline_id.to_string()))?;
        let snapshot = Snapshot::new(simulation_date, wallet_state, dag, None, description);
        let id = snapshot.id.clone();
        timeline.snapshots.insert(id.clone(), snapshot);
        Ok(id)
    }

    /// Branch a brand new timeline off an existing snapshot. The new
    /// timeline's initial state is a deep clone of the snapshot's wallet
    /// and DAG, so mutating the branch never touches the original.
    pub fn branch_from_snapshot(&mut self, timeline_id: &str, snapshot_id: &str) -> Result<(String, WalletState, ComponentDag), StateError> {
        let source = self
            .timelines
            .get(timeline_id)
            .ok_or_else(|| StateError::UnknownTimeline(timeline_id.to_string()))?;
        let snapshot = source
            .snapshots
            .get(snapshot_id)
            .ok_or_else(|| StateError::UnknownSnapshot(snapshot_id.to_string()))?
            .clone();

        let mut branch = Timeline::new(Some(timeline_id.to_string()));
        let branch_id = branch.id.clone();
        branch.record_state(snapshot.simulation_date, snapshot.wallet_state.clone());
        self.timelines.insert(branch_id.clone(), branch);

        Ok((branch_id, snapshot.wallet_state, snapshot.dag))
    }

    pub fn switch_timeline(&mut self, timeline_id: &str) -> Result<(), StateError> {
        if !self.timelines.contains_key(timeline_id) {
            return Err(StateError::UnknownTimeline(timeline_id.to_string()));
        }
        self.current_timeline_id = timeline_id.to_string();
        Ok(())
    }

    pub fn get_timeline(&self, timeline_id: &str) -> Result<&Timeline, StateError> {
        self.timelines
            .get(timeline_id)
            .ok_or_else(|| StateError::UnknownTimeline(timeline_id.to_string()))
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
