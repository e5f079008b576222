//! Debt model

use crate::decimal::Money;
use crate::error::WalletError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single debt obligation (loan, credit card, mortgage, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    name: String,
    principal: Money,
    interest_rate: Decimal,
    monthly_payment: Money,
    missed_payments: u32,
}

impl Debt {
    /// Construct a new debt.
    ///
    /// # Errors
    /// Returns [`WalletError::NegativeValue`] if `principal`,
    /// `interest_rate`, or `monthly_payment` is negative.
    pub fn new(
        name: impl Into<String>,
        principal: Money,
        interest_rate: Decimal,
        monthly_payment: Money,
    ) -> Result<Self, WalletError> {
        if principal < Decimal::ZERO {
            return Err(WalletError::NegativeValue {
                field: "principal",
                value: principal.to_string(),
            });
        }
        if interest_rate < Decimal::ZERO {
            return Err(WalletError::NegativeValue {
                field: "interest_rate",
                value: interest_rate.to_string(),
            });
        }
        if monthly_payment < Decimal::ZERO {
            return Err(WalletError::NegativeValue {
                field: "monthly_payment",
                value: monthly_payment.to_string(),
            });
        }

        Ok(Self {
            name: name.into(),
            principal,
            interest_rate,
            monthly_payment,
            missed_payments: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    pub fn missed_payments(&self) -> u32 {
        self.missed_payments
    }

    pub fn reduce_principal(&mut self, amount: Money) {
        self.principal = (self.principal - amount).max(Decimal::ZERO);
    }

    pub fn record_missed_payment(&mut self) {
        self.missed_payments += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_principal_rejected() {
        let result = Debt::new("card", dec!(-100), dec!(0.2), dec!(50));
        assert!(matches!(result, Err(WalletError::NegativeValue { .. })));
    }

    #[test]
    fn reduce_principal_floors_at_zero() {
        let mut debt = Debt::new("card", dec!(100), dec!(0.2), dec!(50)).unwrap();
        debt.reduce_principal(dec!(150));
        assert_eq!(debt.principal(), dec!(0));
    }
}
