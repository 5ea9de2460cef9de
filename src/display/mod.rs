//! Display formatting for terminal output
//!
//! Plain-text tables and messages printed by the CLI commands.

pub mod account;
pub mod report;

pub use account::{format_account_list, format_budget_list};
pub use report::{format_adjustment_plan, format_sync_report, single_adjustment_prompt};
