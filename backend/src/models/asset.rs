//! Asset model
//!
//! Represents one holding in a wallet: cash, a brokerage position, a house,
//! or anything else with a decimal value and an optional liquidation cost.

use crate::decimal::Money;
use crate::error::WalletError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Broad category of an asset, used by nodes to decide which of an asset's
/// behaviors apply (e.g. only `Stocks`/`Bonds`/`Crypto` accrue investment
/// returns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    Cash,
    Stocks,
    Bonds,
    RealEstate,
    Crypto,
    Other,
}

/// A single named holding in a wallet.
///
/// # Example
/// ```
/// use future_wallet_core::models::asset::{Asset, AssetType};
/// use rust_decimal_macros::dec;
///
/// let bonds = Asset::new("bonds", AssetType::Bonds, dec!(500), true, dec!(0.01)).unwrap();
/// assert_eq!(bonds.value(), dec!(500));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    name: String,
    asset_type: AssetType,
    value: Money,
    is_liquid: bool,
    liquidation_penalty: Decimal,
}

impl Asset {
    /// Construct a new asset.
    ///
    /// # Errors
    /// Returns [`WalletError::NegativeValue`] if `value < 0`, or
    /// [`WalletError::DomainRangeViolation`] if `liquidation_penalty` is
    /// outside `[0, 1]`.
    pub fn new(
        name: impl Into<String>,
        asset_type: AssetType,
        value: Money,
        is_liquid: bool,
        liquidation_penalty: Decimal,
    ) -> Result<Self, WalletError> {
        if value < Decimal::ZERO {
            return Err(WalletError::NegativeValue {
                field: "value",
                value: value.to_string(),
            });
        }
        if liquidation_penalty < Decimal::ZERO || liquidation_penalty > Decimal::ONE {
            return Err(WalletError::DomainRangeViolation {
                field: "liquidation_penalty",
                value: liquidation_penalty.to_string(),
                min: "0".to_string(),
                max: "1".to_string(),
            });
        }

        Ok(Self {
            name: name.into(),
            asset_type,
            value,
            is_liquid,
            liquidation_penalty,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn is_liquid(&self) -> bool {
        self.is_liquid
    }

    pub fn liquidation_penalty(&self) -> Decimal {
        self.liquidation_penalty
    }

    /// Net proceeds if this asset were fully liquidated today.
    pub fn net_liquidation_value(&self) -> Money {
        self.value * (Decimal::ONE - self.liquidation_penalty)
    }

    /// Add to (or subtract from, with a negative `delta`) the asset's value.
    /// Callers are responsible for removing the asset from its owning
    /// wallet once its value reaches zero.
    pub fn adjust_value(&mut self, delta: Money) {
        self.value += delta;
    }

    pub fn set_value(&mut self, value: Money) {
        self.value = value;
    }
}
