//! Modal dialogs
//!
//! Setup dialogs (token, budget, accounts), the confirmation of pending
//! adjustments and the help screen.

pub mod account_select;
pub mod api_key;
pub mod budget_select;
pub mod confirm;
pub mod help;
