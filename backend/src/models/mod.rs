//! Domain models for the financial simulator

pub mod asset;
pub mod config;
pub mod debt;
pub mod transaction;
pub mod wallet;

pub use asset::{Asset, AssetType};
pub use config::{SimulationConfig, SimulationResult};
pub use debt::Debt;
pub use transaction::Transaction;
pub use wallet::WalletState;
