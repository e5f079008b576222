//! Expense-side nodes: fixed, variable, conditional expenses, and debt service

use crate::dag::{ExecutionContext, FinancialNode};
use crate::models::transaction::category;
use crate::models::wallet::WalletState;
use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Once-per-month debit, mirroring [`crate::nodes::income::SalaryNode`]'s
/// scheduling. Always applied regardless of whether the balance is
/// sufficient; the balance may go negative, which `LiquidationNode` may
/// later react to.
#[derive(Clone)]
pub struct FixedExpenseNode {
    id: String,
    deps: Vec<String>,
    amount: Decimal,
    payment_day: u32,
    description: String,
    last_payment_month: Option<(i32, u32)>,
}

impl FixedExpenseNode {
    pub fn new(id: impl Into<String>, amount: Decimal, payment_day: u32, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            amount,
            payment_day,
            description: description.into(),
            last_payment_month: None,
        }
    }
}

impl FinancialNode for FixedExpenseNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, ctx: &mut ExecutionContext<'_>) -> Decimal {
        let date = ctx.current_date;
        let month_key = (date.year(), date.month());

        if date.day() != self.payment_day || self.last_payment_month == Some(month_key) {
            return Decimal::ZERO;
        }

        let debit = -self.amount;
        state.apply_transaction(debit, self.description.clone(), category::EXPENSE_FIXED);
        state.total_expenses_ytd += self.amount;
        self.last_payment_month = Some(month_key);
        debit
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

/// Daily debit of `max(0, gauss(daily_mean, daily_std_dev))`.
#[derive(Clone)]
pub struct VariableExpenseNode {
    id: String,
    deps: Vec<String>,
    daily_mean: f64,
    daily_std_dev: f64,
    description: String,
}

impl VariableExpenseNode {
    pub fn new(id: impl Into<String>, daily_mean: f64, daily_std_dev: f64, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            daily_mean,
            daily_std_dev,
            description: description.into(),
        }
    }
}

impl FinancialNode for VariableExpenseNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, ctx: &mut ExecutionContext<'_>) -> Decimal {
        let draw = ctx.rng.gauss(self.daily_mean, self.daily_std_dev).max(0.0);
        let amount = crate::decimal::from_f64(draw);
        let debit = -amount;
        state.apply_transaction(debit, self.description.clone(), category::EXPENSE_VARIABLE);
        state.total_expenses_ytd += amount;
        debit
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

/// A pure predicate: no RNG, no wall-clock, just a function of the current
/// state and execution context. Kept as a plain function pointer (rather
/// than a boxed closure) so it stays `Copy`/`Clone` and the node can
/// participate in `clone_box` like every other node.
pub type ExpensePredicate = fn(&WalletState, &ExecutionContext<'_>) -> bool;

/// Debits a fixed `amount` on any day `predicate` holds.
#[derive(Clone)]
pub struct ConditionalExpenseNode {
    id: String,
    deps: Vec<String>,
    amount: Decimal,
    predicate: ExpensePredicate,
    description: String,
}

impl ConditionalExpenseNode {
    pub fn new(id: impl Into<String>, amount: Decimal, predicate: ExpensePredicate, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            amount,
            predicate,
            description: description.into(),
        }
    }
}

impl FinancialNode for ConditionalExpenseNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, ctx: &mut ExecutionContext<'_>) -> Decimal {
        if !(self.predicate)(state, ctx) {
            return Decimal::ZERO;
        }

        let debit = -self.amount;
        state.apply_transaction(debit, self.description.clone(), category::EXPENSE_CONDITIONAL);
        state.total_expenses_ytd += self.amount;
        debit
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

/// Once per month, pays down each debt in `state.debts` order if the
/// balance covers the payment; otherwise records a missed payment. No
/// partial payments.
#[derive(Clone)]
pub struct DebtPaymentNode {
    id: String,
    deps: Vec<String>,
    payment_day: u32,
    last_payment_month: Option<(i32, u32)>,
}

impl DebtPaymentNode {
    pub fn new(id: impl Into<String>, payment_day: u32) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            payment_day,
            last_payment_month: None,
        }
    }
}

impl FinancialNode for DebtPaymentNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, ctx: &mut ExecutionContext<'_>) -> Decimal {
        let date = ctx.current_date;
        let month_key = (date.year(), date.month());

        if date.day() != self.payment_day || self.last_payment_month == Some(month_key) {
            return Decimal::ZERO;
        }
        self.last_payment_month = Some(month_key);

        let mut total_paid = Decimal::ZERO;

        for idx in 0..state.debts.len() {
            let (name, payment, interest, principal_payment, can_pay) = {
                let debt = &state.debts[idx];
                let payment = debt.monthly_payment();
                let can_pay = state.balance >= payment;
                let interest = debt.principal() * (debt.interest_rate() / dec!(12));
                let principal_payment = (payment - interest).max(Decimal::ZERO);
                (debt.name().to_string(), payment, interest, principal_payment, can_pay)
            };

            if can_pay {
                state.debts[idx].reduce_principal(principal_payment);
                state.apply_transaction(-payment, format!("Debt payment: {name}"), category::EXPENSE_DEBT);
                state.total_expenses_ytd += payment;
                total_paid += payment;
                let _ = interest;
            } else {
                state.debts[idx].record_missed_payment();
            }
        }

        -total_paid
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}
