//! Core data models for YNAB Updater
//!
//! Accounts and budgets as reported by the service, milliunit amounts and
//! the adjustment transactions this tool creates.

pub mod account;
pub mod budget;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::Account;
pub use budget::{BudgetSummary, CurrencyFormat};
pub use ids::{AccountId, BudgetId};
pub use money::{AmountError, Milliunits};
pub use transaction::{AdjustmentMarker, AdjustmentTransaction, ClearedStatus};
