//! Component DAG
//!
//! A directed acyclic graph of [`FinancialNode`]s. Edges point from a
//! dependency to its dependent; each simulated day the graph is walked in
//! topological order, and every node reads/writes the shared
//! [`WalletState`] through a per-day [`ExecutionContext`].

use crate::models::wallet::WalletState;
use crate::rng::RngManager;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

/// Errors raised while registering nodes or computing a schedule.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DagError {
    #[error("node id '{0}' is already registered")]
    DuplicateNodeId(String),

    #[error("node '{node}' declares a dependency on unknown node '{dep}'")]
    MissingDependency { node: String, dep: String },

    #[error("cycle detected among nodes: {0:?}")]
    CycleDetected(Vec<String>),
}

/// Per-day scratch state shared across all nodes during `execute_daily`.
///
/// Discarded at the end of the day; nothing here survives across days
/// except through its effect on `WalletState`.
pub struct ExecutionContext<'a> {
    pub current_date: NaiveDate,
    pub rng: &'a mut RngManager,
    outputs: Vec<(String, Decimal)>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(current_date: NaiveDate, rng: &'a mut RngManager) -> Self {
        Self {
            current_date,
            rng,
            outputs: Vec::new(),
        }
    }

    fn record_output(&mut self, id: &str, value: Decimal) {
        if let Some(existing) = self.outputs.iter_mut().find(|(k, _)| k == id) {
            existing.1 = value;
        } else {
            self.outputs.push((id.to_string(), value));
        }
    }

    /// The amount a previously-executed node produced today, or `0` if the
    /// node hasn't run yet (or doesn't exist).
    pub fn get_output(&self, id: &str) -> Decimal {
        self.outputs
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| *v)
            .unwrap_or(Decimal::ZERO)
    }
}

/// One financial component: a node in the DAG.
///
/// Implementors hold their own per-instance configuration and mutable
/// bookkeeping (e.g. `last_payment_month`). `clone_box` lets the whole DAG
/// — edges and node bookkeeping together — be deep-cloned for branching,
/// so two branches taken from the same snapshot never alias each other's
/// state.
pub trait FinancialNode: Send {
    /// Stable identifier, unique within one DAG.
    fn id(&self) -> &str;

    /// Ids of nodes that must execute before this one, in the order they
    /// were declared.
    fn dependencies(&self) -> &[String];

    /// Run this node's daily behavior, mutating `state` and returning the
    /// amount it produced (0 if it did nothing today).
    fn execute(&mut self, state: &mut WalletState, ctx: &mut ExecutionContext<'_>) -> Decimal;

    /// Deep-clone this node, bookkeeping included.
    fn clone_box(&self) -> Box<dyn FinancialNode>;
}

impl Clone for Box<dyn FinancialNode> {
    fn clone(&self) -> Self {
        self.as_ref().clone_box()
    }
}

/// Registry of nodes plus their dependency edges, with a memoized
/// topological schedule.
pub struct ComponentDag {
    nodes: Vec<Box<dyn FinancialNode>>,
    execution_order: Option<Vec<usize>>,
}

impl ComponentDag {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            execution_order: None,
        }
    }

    /// Register a node. Dependencies may reference nodes not yet added;
    /// resolution is deferred to [`ComponentDag::validate`].
    pub fn add_node(&mut self, node: Box<dyn FinancialNode>) -> Result<(), DagError> {
        if self.nodes.iter().any(|n| n.id() == node.id()) {
            return Err(DagError::DuplicateNodeId(node.id().to_string()));
        }
        self.nodes.push(node);
        self.execution_order = None;
        Ok(())
    }

    /// Remove a node by id. Idempotent: removing an unknown id is a no-op.
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.retain(|n| n.id() != id);
        self.execution_order = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that every declared dependency exists and the graph is
    /// acyclic.
    pub fn validate(&self) -> Result<(), DagError> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id()).collect();
        for node in &self.nodes {
            for dep in node.dependencies() {
                if !ids.contains(dep.as_str()) {
                    return Err(DagError::MissingDependency {
                        node: node.id().to_string(),
                        dep: dep.clone(),
                    });
                }
            }
        }

        self.topological_order().map(|_| ())
    }

    /// Kahn's algorithm, scanning the frontier in insertion order each
    /// round so that ties between nodes with no mutual dependency resolve
    /// deterministically by `add_node` order rather than by a hash-based
    /// frontier.
    fn topological_order(&self) -> Result<Vec<usize>, DagError> {
        let index_of: HashMap<&str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id(), i))
            .collect();

        let mut indegree = vec![0usize; self.nodes.len()];
        for node in &self.nodes {
            for dep in node.dependencies() {
                if index_of.contains_key(dep.as_str()) {
                    indegree[index_of[node.id()]] += 1;
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..self.nodes.len())
            .filter(|&i| indegree[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut visited = 0;

        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            visited += 1;

            // Scan dependents in insertion order, not hash order.
            for (i, node) in self.nodes.iter().enumerate() {
                if node.dependencies().iter().any(|d| d.as_str() == self.nodes[idx].id()) {
                    indegree[i] -= 1;
                    if indegree[i] == 0 {
                        queue.push_back(i);
                    }
                }
            }
        }

        if visited != self.nodes.len() {
            let cycles: Vec<String> = (0..self.nodes.len())
                .filter(|&i| indegree[i] > 0)
                .map(|i| self.nodes[i].id().to_string())
                .collect();
            return Err(DagError::CycleDetected(cycles));
        }

        Ok(order)
    }

    /// Validate if dirty, then return the topological order (indices into
    /// the node vector in the order they must execute).
    pub fn execution_order(&mut self) -> Result<&[usize], DagError> {
        if self.execution_order.is_none() {
            let order = self.topological_order()?;
            self.execution_order = Some(order);
        }
        Ok(self.execution_order.as_ref().unwrap())
    }

    /// Run every node once, in topological order, against a fresh
    /// per-day [`ExecutionContext`]. Returns each node's produced amount
    /// keyed by id, in execution order, so the driver can inspect
    /// well-known outputs (e.g. a bankruptcy-check node's flag) without
    /// the context surviving past the end of the day.
    pub fn execute_daily(
        &mut self,
        state: &mut WalletState,
        date: NaiveDate,
        rng: &mut RngManager,
    ) -> Result<Vec<(String, Decimal)>, DagError> {
        let order = self.execution_order()?.to_vec();
        let mut ctx = ExecutionContext::new(date, rng);

        for idx in order {
            let node = &mut self.nodes[idx];
            let produced = node.execute(state, &mut ctx);
            let id = node.id().to_string();
            ctx.record_output(&id, produced);
        }

        Ok(ctx.outputs)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id())
    }
}

impl Default for ComponentDag {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ComponentDag {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.iter().map(|n| n.clone_box()).collect(),
            execution_order: self.execution_order.clone(),
        }
    }
}
