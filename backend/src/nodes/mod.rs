//! Financial component node implementations.
//!
//! Each node implements [`crate::dag::FinancialNode`] and is registered into
//! a [`crate::dag::ComponentDag`] by the orchestrator; this module only
//! defines behavior, never wiring.

pub mod asset;
pub mod credit;
pub mod expense;
pub mod income;
pub mod tax;

pub use asset::{AssetPortfolioNode, AssetPurchaseNode, LiquidationNode};
pub use credit::{BankruptcyCheckNode, CreditScoreNode, BANKRUPTCY_FLAG_ID};
pub use expense::{ConditionalExpenseNode, DebtPaymentNode, ExpensePredicate, FixedExpenseNode, VariableExpenseNode};
pub use income::{InvestmentReturnNode, SalaryNode, VariableIncomeNode};
pub use tax::{default_brackets, IncomeTaxNode, TaxBracket};
