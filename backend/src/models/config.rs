//! Simulation configuration and result types

use crate::decimal::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::wallet::WalletState;

/// Parameters needed to start a simulation. Callers own loading this from
/// whatever configuration format they use; this type only needs to be
/// `Serialize`/`Deserialize` so it can round-trip through one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_balance: Money,
    pub initial_credit_score: Decimal,
    pub random_seed: u64,
    pub base_currency: String,
}

impl SimulationConfig {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, initial_balance: Money, random_seed: u64) -> Self {
        assert!(end_date >= start_date, "end_date must not precede start_date");
        Self {
            start_date,
            end_date,
            initial_balance,
            initial_credit_score: dec!(700),
            random_seed,
            base_currency: "USD".to_string(),
        }
    }

    pub fn with_initial_credit_score(mut self, score: Decimal) -> Self {
        self.initial_credit_score = score;
        self
    }

    pub fn with_base_currency(mut self, currency: impl Into<String>) -> Self {
        self.base_currency = currency.into();
        self
    }
}

/// The terminal output of one simulation run. Analytics fields are `None`
/// until the caller runs the analytics module over the recorded metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub config: SimulationConfig,
    pub final_state: WalletState,
    pub timeline_id: String,
    pub final_balance: Money,
    pub expected_value: Option<Money>,
    pub percentile_5: Option<Money>,
    pub percentile_50: Option<Money>,
    pub percentile_95: Option<Money>,
    pub collapse_probability: Option<Decimal>,
    pub shock_resilience: Option<Decimal>,
    pub recovery_slope: Option<Decimal>,
    pub net_asset_value: Option<Money>,
    pub liquidity_ratio: Option<Decimal>,
    pub financial_vibe: Option<Decimal>,
    pub pet_state: Option<String>,
}

impl SimulationResult {
    pub fn new(config: SimulationConfig, final_state: WalletState, timeline_id: String) -> Self {
        let final_balance = final_state.balance;
        Self {
            config,
            final_state,
            timeline_id,
            final_balance,
            expected_value: None,
            percentile_5: None,
            percentile_50: None,
            percentile_95: None,
            collapse_probability: None,
            shock_resilience: None,
            recovery_slope: None,
            net_asset_value: None,
            liquidity_ratio: None,
            financial_vibe: None,
            pet_state: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "end_date must not precede start_date")]
    fn end_before_start_panics() {
        let start = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        SimulationConfig::new(start, end, dec!(0), 1);
    }
}
