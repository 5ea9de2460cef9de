//! Service layer for YNAB Updater
//!
//! The reconciliation engine computes adjustments; the sync service posts
//! them and tallies the outcome. Net worth groups balances for display.

pub mod net_worth;
pub mod reconciliation;
pub mod sync;

pub use net_worth::{CategoryTotal, NetWorth, NetWorthCategory, NetWorthEntry};
pub use reconciliation::{BalanceUpdateRequest, BatchItem, ReconciliationEngine};
pub use sync::{PostOutcome, SyncReport, SyncService};
