//! Credit score and bankruptcy nodes

use crate::dag::{ExecutionContext, FinancialNode};
use crate::models::transaction::category;
use crate::models::wallet::WalletState;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Reserved node id convention: the driver looks for an output under this
/// id equal to `1` to decide whether to stop the simulation early.
pub const BANKRUPTCY_FLAG_ID: &str = "bankruptcy_check";

/// Runs daily, nudging `credit_score` by a weighted sum of three impact
/// terms (debt ratio, payment punctuality, balance health).
#[derive(Clone)]
pub struct CreditScoreNode {
    id: String,
    deps: Vec<String>,
    alpha: Decimal,
}

impl CreditScoreNode {
    pub fn new(id: impl Into<String>, deps: Vec<String>, alpha: Decimal) -> Self {
        Self { id: id.into(), deps, alpha }
    }

    fn debt_ratio_impact(state: &WalletState) -> Decimal {
        let denom = state.total_income_ytd.max(dec!(50000));
        let ratio = state.total_debt() / denom;
        if ratio < dec!(0.3) {
            dec!(2.0)
        } else if ratio < dec!(0.5) {
            dec!(0)
        } else {
            dec!(-3.0)
        }
    }

    fn punctuality_impact(state: &WalletState) -> Decimal {
        match state.total_missed_payments() {
            0 => dec!(1.0),
            1..=2 => dec!(-2.0),
            _ => dec!(-5.0),
        }
    }

    fn balance_impact(state: &WalletState) -> Decimal {
        if state.balance > dec!(10000) {
            dec!(1.0)
        } else if state.balance > dec!(0) {
            dec!(0.5)
        } else if state.balance > dec!(-1000) {
            dec!(-1.0)
        } else {
            dec!(-3.0)
        }
    }
}

impl FinancialNode for CreditScoreNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, _ctx: &mut ExecutionContext<'_>) -> Decimal {
        let impact_sum = Self::debt_ratio_impact(state) + Self::punctuality_impact(state) + Self::balance_impact(state);
        let new_score = state.credit_score() + self.alpha * impact_sum;
        state.set_credit_score(new_score);
        state.credit_score()
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

/// Runs at the end of the DAG order. If `net_worth < bankruptcy_threshold`
/// and liquid assets are under $100, flags bankruptcy, forces the credit
/// score to 300, and appends a zero-amount bankruptcy transaction.
#[derive(Clone)]
pub struct BankruptcyCheckNode {
    id: String,
    deps: Vec<String>,
    bankruptcy_threshold: Decimal,
    is_bankrupt: bool,
}

impl BankruptcyCheckNode {
    pub fn new(id: impl Into<String>, deps: Vec<String>, bankruptcy_threshold: Decimal) -> Self {
        Self {
            id: id.into(),
            deps,
            bankruptcy_threshold,
            is_bankrupt: false,
        }
    }

    pub fn is_bankrupt(&self) -> bool {
        self.is_bankrupt
    }
}

impl FinancialNode for BankruptcyCheckNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, _ctx: &mut ExecutionContext<'_>) -> Decimal {
        if state.net_worth() < self.bankruptcy_threshold && state.liquid_assets() < dec!(100) {
            self.is_bankrupt = true;
            state.set_credit_score(dec!(300));
            state.apply_transaction(Decimal::ZERO, "bankruptcy declared", category::BANKRUPTCY);
            dec!(1)
        } else {
            dec!(0)
        }
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngManager;
    use chrono::NaiveDate;

    fn wallet(balance: Decimal) -> WalletState {
        WalletState::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), balance, dec!(700), 1)
    }

    #[test]
    fn bankruptcy_flags_when_deeply_negative_and_illiquid() {
        let mut node = BankruptcyCheckNode::new(BANKRUPTCY_FLAG_ID, vec![], dec!(-50000));
        let mut w = wallet(dec!(-60000));
        let mut rng = RngManager::new(1);
        let mut ctx = ExecutionContext::new(w.current_date, &mut rng);

        let produced = node.execute(&mut w, &mut ctx);
        assert_eq!(produced, dec!(1));
        assert!(node.is_bankrupt());
        assert_eq!(w.credit_score(), dec!(300));
    }

    #[test]
    fn no_bankruptcy_when_net_worth_acceptable() {
        let mut node = BankruptcyCheckNode::new(BANKRUPTCY_FLAG_ID, vec![], dec!(-50000));
        let mut w = wallet(dec!(1000));
        let mut rng = RngManager::new(1);
        let mut ctx = ExecutionContext::new(w.current_date, &mut rng);
        assert_eq!(node.execute(&mut w, &mut ctx), dec!(0));
    }

    #[test]
    fn credit_score_improves_with_healthy_balance_and_no_missed_payments() {
        let mut node = CreditScoreNode::new("credit", vec![], dec!(0.1));
        let mut w = wallet(dec!(20000));
        let before = w.credit_score();
        let mut rng = RngManager::new(1);
        let mut ctx = ExecutionContext::new(w.current_date, &mut rng);
        node.execute(&mut w, &mut ctx);
        assert!(w.credit_score() > before);
    }
}
