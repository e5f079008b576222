//! Income-side nodes: salary, variable income, investment returns

use crate::dag::{ExecutionContext, FinancialNode};
use crate::models::asset::AssetType;
use crate::models::transaction::category;
use crate::models::wallet::WalletState;
use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Credits `annual_salary / 12` once per calendar month, on `payment_day`.
#[derive(Clone)]
pub struct SalaryNode {
    id: String,
    deps: Vec<String>,
    annual_salary: Decimal,
    payment_day: u32,
    last_payment_month: Option<(i32, u32)>,
}

impl SalaryNode {
    pub fn new(id: impl Into<String>, annual_salary: Decimal, payment_day: u32) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            annual_salary,
            payment_day,
            last_payment_month: None,
        }
    }
}

impl FinancialNode for SalaryNode {
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

        let monthly_salary = self.annual_salary / dec!(12);
        state.apply_transaction(monthly_salary, "salary payment", category::INCOME_SALARY);
        state.total_income_ytd += monthly_salary;
        self.last_payment_month = Some(month_key);
        monthly_salary
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

/// Each day draws a uniform coin-flip; on success, draws a gaussian income
/// amount (clamped to non-negative) and credits it. The `uniform01()` draw
/// happens every day regardless of outcome, so the RNG draw sequence is
/// identical across runs that only differ in which days paid out.
#[derive(Clone)]
pub struct VariableIncomeNode {
    id: String,
    deps: Vec<String>,
    mean_monthly: f64,
    std_dev: f64,
    payment_probability: f64,
}

impl VariableIncomeNode {
    pub fn new(id: impl Into<String>, mean_monthly: f64, std_dev: f64, payment_probability: f64) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            mean_monthly,
            std_dev,
            payment_probability,
        }
    }
}

impl FinancialNode for VariableIncomeNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, ctx: &mut ExecutionContext<'_>) -> Decimal {
        let u = ctx.rng.uniform01();
        if u >= self.payment_probability {
            return Decimal::ZERO;
        }

        let draw = ctx.rng.gauss(self.mean_monthly, self.std_dev).max(0.0);
        let amount = crate::decimal::from_f64(draw);
        state.apply_transaction(amount, "variable income", category::INCOME_VARIABLE);
        state.total_income_ytd += amount;
        amount
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

/// Accrues daily investment returns on stocks/bonds/crypto assets,
/// crediting both the asset value *and* the wallet balance (the source
/// models realized gains this way; see the design notes on double-counting).
#[derive(Clone)]
pub struct InvestmentReturnNode {
    id: String,
    deps: Vec<String>,
    annual_return_rate: Decimal,
}

impl InvestmentReturnNode {
    pub fn new(id: impl Into<String>, annual_return_rate: Decimal) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
            annual_return_rate,
        }
    }

    fn applies_to(asset_type: AssetType) -> bool {
        matches!(asset_type, AssetType::Stocks | AssetType::Bonds | AssetType::Crypto)
    }
}

impl FinancialNode for InvestmentReturnNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, ctx: &mut ExecutionContext<'_>) -> Decimal {
        let mut total = Decimal::ZERO;

        let names: Vec<String> = state
            .assets
            .iter()
            .filter(|a| Self::applies_to(a.asset_type()))
            .map(|a| a.name().to_string())
            .collect();

        for name in names {
            let noise = ctx.rng.gauss(1.0, 0.01);
            let asset_value = state.assets.get(&name).map(|a| a.value()).unwrap_or(Decimal::ZERO);
            let daily_rate = self.annual_return_rate / dec!(365);
            let base_return = asset_value * daily_rate;
            let noise_factor = crate::decimal::from_f64(noise);
            let gain = base_return * noise_factor;

            if let Some(asset) = state.assets.get_mut(&name) {
                asset.adjust_value(gain);
            }
            total += gain;
        }

        if total != Decimal::ZERO {
            state.apply_transaction(total, "investment return", category::INCOME_INVESTMENT);
            state.total_income_ytd += total;
        }

        total
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}
