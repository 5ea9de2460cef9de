//! Adjustment plan and result formatting
//!
//! Shared by the `update` command and the terminal UI confirmation dialog.

use crate::models::{CurrencyFormat, Milliunits};
use crate::services::{BatchItem, SyncReport};

/// Prompt for confirming a single adjustment
pub fn single_adjustment_prompt(
    account_name: &str,
    adjustment: Milliunits,
    new_balance: Milliunits,
    format: &CurrencyFormat,
) -> String {
    format!(
        "Create an adjustment of {} for account '{}'?\n(New balance will be {})",
        format.format(adjustment),
        account_name,
        format.format(new_balance)
    )
}

/// One line per item: what will happen to that account
pub fn format_adjustment_plan(items: &[BatchItem], format: &CurrencyFormat) -> String {
    let mut output = String::new();
    for item in items {
        let line = match (&item.outcome, item.new_balance()) {
            (Ok(Some(tx)), Some(new_balance)) => format!(
                " • {}: {} (New balance: {})",
                item.account_name,
                format.format(tx.amount),
                format.format(new_balance)
            ),
            (Ok(_), _) => format!(
                " • {}: no change ({})",
                item.account_name,
                format.format(item.previous_balance)
            ),
            (Err(e), _) => format!(" • {}: skipped, {}", item.account_name, e),
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Summary line plus one line per failed account
pub fn format_sync_report(report: &SyncReport) -> String {
    let mut output = format!("{}\n", report);
    for name in &report.invalid {
        output.push_str(&format!("  {}: invalid amount\n", name));
    }
    for (name, message) in &report.post_failures {
        output.push_str(&format!("  {}: {}\n", name, message));
    }
    output
}
