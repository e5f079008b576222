//! Wallet state
//!
//! The single mutable piece of state that flows through a simulation day:
//! balance, credit score, assets, debts, transaction history, and
//! year-to-date accumulators.

use crate::decimal::{clamp, Money};
use crate::models::asset::Asset;
use crate::models::debt::Debt;
use crate::models::transaction::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Insertion-ordered collection of assets keyed by name.
///
/// A plain hash map would make iteration order (and therefore which asset a
/// tie-broken node touches first) dependent on hash seed, breaking
/// determinism. Assets are few per wallet, so linear lookup over an
/// insertion-ordered `Vec` is simpler than pulling in an ordered-map crate
/// and costs nothing in practice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetMap {
    entries: Vec<Asset>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: Asset) {
        if let Some(existing) = self.entries.iter_mut().find(|a| a.name() == asset.name()) {
            *existing = asset;
        } else {
            self.entries.push(asset);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.entries.iter().find(|a| a.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Asset> {
        self.entries.iter_mut().find(|a| a.name() == name)
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|a| a.name() != name);
    }

    /// Drop every asset whose value has reached zero.
    pub fn remove_depleted(&mut self) {
        self.entries.retain(|a| a.value() > Decimal::ZERO);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Asset> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_value(&self) -> Money {
        self.entries.iter().map(|a| a.value()).sum()
    }

    pub fn liquid_value(&self) -> Money {
        self.entries
            .iter()
            .filter(|a| a.is_liquid())
            .map(|a| a.value())
            .sum()
    }
}

/// The full financial position of a wallet at a simulated date.
///
/// `Clone` is the deep-copy primitive snapshots rely on: every field here
/// owns its data, so cloning a `WalletState` produces a fully independent
/// copy with no shared interior mutability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletState {
    pub current_date: NaiveDate,
    pub balance: Money,
    credit_score: Decimal,
    pub assets: AssetMap,
    pub debts: Vec<Debt>,
    pub transaction_history: Vec<Transaction>,
    pub total_income_ytd: Money,
    pub total_expenses_ytd: Money,
    pub taxes_paid_ytd: Money,
    pub rng_state: u64,
}

impl WalletState {
    pub fn new(current_date: NaiveDate, initial_balance: Money, initial_credit_score: Decimal, rng_state: u64) -> Self {
        Self {
            current_date,
            balance: initial_balance,
            credit_score: clamp(initial_credit_score, dec!(300), dec!(850)),
            assets: AssetMap::new(),
            debts: Vec::new(),
            transaction_history: Vec::new(),
            total_income_ytd: Decimal::ZERO,
            total_expenses_ytd: Decimal::ZERO,
            taxes_paid_ytd: Decimal::ZERO,
            rng_state,
        }
    }

    pub fn credit_score(&self) -> Decimal {
        self.credit_score
    }

    /// Set the credit score, clamping to `[300, 850]`.
    pub fn set_credit_score(&mut self, score: Decimal) {
        self.credit_score = clamp(score, dec!(300), dec!(850));
    }

    /// Apply a signed amount to the balance and append a transaction
    /// recording `balance_after` as the balance immediately after this
    /// entry, per the ordering invariant (§3/§8 Testable Property 3).
    pub fn apply_transaction(&mut self, amount: Money, description: impl Into<String>, category: impl Into<String>) {
        self.balance += amount;
        self.transaction_history.push(Transaction::new(
            self.current_date,
            amount,
            description.into(),
            category.into(),
            self.balance,
        ));
    }

    pub fn total_assets(&self) -> Money {
        self.assets.total_value()
    }

    pub fn total_debt(&self) -> Money {
        self.debts.iter().map(|d| d.principal()).sum()
    }

    pub fn net_worth(&self) -> Money {
        self.balance + self.total_assets() - self.total_debt()
    }

    pub fn liquid_assets(&self) -> Money {
        self.assets.liquid_value()
    }

    pub fn total_missed_payments(&self) -> u32 {
        self.debts.iter().map(|d| d.missed_payments()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::AssetType;

    fn wallet() -> WalletState {
        WalletState::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), dec!(1000), dec!(700), 1)
    }

    #[test]
    fn apply_transaction_records_running_balance() {
        let mut w = wallet();
        w.apply_transaction(dec!(500), "salary", "income:salary");
        w.apply_transaction(dec!(-200), "rent", "expense:fixed");
        assert_eq!(w.balance, dec!(1300));
        assert_eq!(w.transaction_history[0].balance_after(), dec!(1500));
        assert_eq!(w.transaction_history[1].balance_after(), dec!(1300));
    }

    #[test]
    fn net_worth_combines_balance_assets_and_debts() {
        let mut w = wallet();
        w.assets
            .insert(Asset::new("bonds", AssetType::Bonds, dec!(500), true, dec!(0)).unwrap());
        w.debts
            .push(crate::models::debt::Debt::new("loan", dec!(300), dec!(0.05), dec!(50)).unwrap());
        assert_eq!(w.net_worth(), dec!(1000) + dec!(500) - dec!(300));
    }

    #[test]
    fn credit_score_clamps_on_construction_and_update() {
        let mut w = WalletState::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), dec!(0), dec!(9000), 1);
        assert_eq!(w.credit_score(), dec!(850));
        w.set_credit_score(dec!(100));
        assert_eq!(w.credit_score(), dec!(300));
    }
}
