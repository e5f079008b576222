//! Asset-side nodes: portfolio valuation, liquidation, and investment purchases

use crate::dag::{ExecutionContext, FinancialNode};
use crate::models::asset::{Asset, AssetType};
use crate::models::transaction::category;
use crate::models::wallet::WalletState;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Produces `total_assets` for the day. Has no side effects; exists purely
/// as a scheduling landmark so other nodes can depend on "the portfolio
/// valuation for the day" without recomputing it themselves.
#[derive(Clone)]
pub struct AssetPortfolioNode {
    id: String,
    deps: Vec<String>,
}

impl AssetPortfolioNode {
    pub fn new(id: impl Into<String>, deps: Vec<String>) -> Self {
        Self { id: id.into(), deps }
    }
}

impl FinancialNode for AssetPortfolioNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, _ctx: &mut ExecutionContext<'_>) -> Decimal {
        state.total_assets()
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

/// When the balance falls below `min_balance_threshold`, liquidates liquid
/// assets cheapest-penalty-first (ties broken by asset name) until the
/// deficit is covered or liquid assets are exhausted.
#[derive(Clone)]
pub struct LiquidationNode {
    id: String,
    deps: Vec<String>,
    min_balance_threshold: Decimal,
}

impl LiquidationNode {
    pub fn new(id: impl Into<String>, deps: Vec<String>, min_balance_threshold: Decimal) -> Self {
        Self {
            id: id.into(),
            deps,
            min_balance_threshold,
        }
    }
}

impl FinancialNode for LiquidationNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, _ctx: &mut ExecutionContext<'_>) -> Decimal {
        if state.balance >= self.min_balance_threshold {
            return Decimal::ZERO;
        }

        let mut deficit = self.min_balance_threshold - state.balance;
        let mut candidates: Vec<String> = state
            .assets
            .iter()
            .filter(|a| a.is_liquid())
            .map(|a| a.name().to_string())
            .collect();
        candidates.sort_by(|a, b| {
            let pa = state.assets.get(a).unwrap().liquidation_penalty();
            let pb = state.assets.get(b).unwrap().liquidation_penalty();
            pa.cmp(&pb).then_with(|| a.cmp(b))
        });

        let mut total_credited = Decimal::ZERO;
        let mut to_remove = Vec::new();

        for name in candidates {
            if deficit <= Decimal::ZERO {
                break;
            }

            let (value, penalty) = {
                let asset = state.assets.get(&name).unwrap();
                (asset.value(), asset.liquidation_penalty())
            };
            let net_value = value * (Decimal::ONE - penalty);

            if net_value >= deficit {
                let amount_needed = deficit / (Decimal::ONE - penalty);
                if let Some(asset) = state.assets.get_mut(&name) {
                    asset.adjust_value(-amount_needed);
                }
                state.apply_transaction(
                    deficit,
                    format!("partial liquidation of {name} (penalty {penalty})"),
                    category::LIQUIDATION,
                );
                total_credited += deficit;
                deficit = Decimal::ZERO;
            } else {
                to_remove.push(name.clone());
                state.apply_transaction(
                    net_value,
                    format!("full liquidation of {name} (penalty {penalty})"),
                    category::LIQUIDATION,
                );
                total_credited += net_value;
                deficit -= net_value;
            }
        }

        for name in to_remove {
            state.assets.remove(&name);
        }
        state.assets.remove_depleted();

        total_credited
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}

/// Sweeps surplus balance above `investment_threshold` into an asset named
/// `"{target_asset_type}_portfolio"`, creating it (liquid, 2% liquidation
/// penalty) on first use.
#[derive(Clone)]
pub struct AssetPurchaseNode {
    id: String,
    deps: Vec<String>,
    target_asset_type: AssetType,
    target_asset_label: String,
    investment_threshold: Decimal,
    investment_percentage: Decimal,
}

impl AssetPurchaseNode {
    pub fn new(
        id: impl Into<String>,
        deps: Vec<String>,
        target_asset_type: AssetType,
        target_asset_label: impl Into<String>,
        investment_threshold: Decimal,
        investment_percentage: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            deps,
            target_asset_type,
            target_asset_label: target_asset_label.into(),
            investment_threshold,
            investment_percentage,
        }
    }

    fn asset_name(&self) -> String {
        format!("{}_portfolio", self.target_asset_label)
    }
}

impl FinancialNode for AssetPurchaseNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }

    fn execute(&mut self, state: &mut WalletState, _ctx: &mut ExecutionContext<'_>) -> Decimal {
        let surplus = state.balance - self.investment_threshold;
        if surplus <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let investment_amount = surplus * self.investment_percentage;
        let name = self.asset_name();

        if state.assets.get(&name).is_none() {
            state
                .assets
                .insert(Asset::new(name.clone(), self.target_asset_type, Decimal::ZERO, true, dec!(0.02)).unwrap());
        }
        if let Some(asset) = state.assets.get_mut(&name) {
            asset.adjust_value(investment_amount);
        }

        let debit = -investment_amount;
        state.apply_transaction(debit, format!("transfer to {name}"), category::INVESTMENT);
        debit
    }

    fn clone_box(&self) -> Box<dyn FinancialNode> {
        Box::new(self.clone())
    }
}
