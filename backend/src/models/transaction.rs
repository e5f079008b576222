//! Transaction model
//!
//! Represents one ledger entry applied to a wallet's balance.
//! Each transaction records:
//! - When it happened (calendar date, not a tick)
//! - A signed amount (positive = credit, negative = debit)
//! - A human description and a canonical category tag
//! - The balance immediately after the entry was applied
//!
//! CRITICAL: all money values are `Decimal`, never `f64`.

use crate::decimal::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical category tags. Nodes must use one of these exact strings so
/// that transaction history can be grouped/filtered consistently.
pub mod category {
    pub const INCOME_SALARY: &str = "income:salary";
    pub const INCOME_VARIABLE: &str = "income:variable";
    pub const INCOME_INVESTMENT: &str = "income:investment";
    pub const EXPENSE_FIXED: &str = "expense:fixed";
    pub const EXPENSE_VARIABLE: &str = "expense:variable";
    pub const EXPENSE_CONDITIONAL: &str = "expense:conditional";
    pub const EXPENSE_DEBT: &str = "expense:debt";
    pub const TAX_INCOME: &str = "tax:income";
    pub const LIQUIDATION: &str = "liquidation";
    pub const INVESTMENT: &str = "investment";
    pub const BANKRUPTCY: &str = "bankruptcy";
}

/// One entry in a wallet's transaction history.
///
/// # Example
/// ```
/// use future_wallet_core::models::transaction::{Transaction, category};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let tx = Transaction::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     dec!(5000),
///     "salary".to_string(),
///     category::INCOME_SALARY.to_string(),
///     dec!(15000),
/// );
/// assert_eq!(tx.amount(), dec!(5000));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    timestamp: NaiveDate,
    amount: Money,
    description: String,
    category: String,
    balance_after: Money,
}

impl Transaction {
    /// Create a new transaction entry. Not validated further: the amount
    /// may be positive or negative, and callers are expected to have
    /// already applied it to the wallet balance they pass as
    /// `balance_after`.
    pub fn new(
        timestamp: NaiveDate,
        amount: Money,
        description: String,
        category: String,
        balance_after: Money,
    ) -> Self {
        Self {
            timestamp,
            amount,
            description,
            category,
            balance_after,
        }
    }

    pub fn timestamp(&self) -> NaiveDate {
        self.timestamp
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn balance_after(&self) -> Money {
        self.balance_after
    }

    pub fn is_credit(&self) -> bool {
        self.amount.is_sign_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_amount_is_not_a_credit() {
        let tx = Transaction::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            dec!(-100),
            "rent".to_string(),
            category::EXPENSE_FIXED.to_string(),
            dec!(900),
        );
        assert!(!tx.is_credit());
    }
}
