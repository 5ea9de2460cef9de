//! Account and budget display formatting
//!
//! Formats accounts and budgets for terminal output as plain tables.

use crate::config::BudgetEntry;
use crate::models::{Account, CurrencyFormat, Milliunits};

/// Format tracked accounts with their balances as a table
pub fn format_account_list(accounts: &[Account], format: &CurrencyFormat) -> String {
    if accounts.is_empty() {
        return "No tracked accounts. Run 'ynab-updater config select-accounts' first.\n"
            .to_string();
    }

    let balances: Vec<String> = accounts.iter().map(|a| format.format(a.balance)).collect();
    let total: Milliunits = accounts.iter().map(|a| a.balance).sum();
    let total_str = format.format(total);

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(5);
    let type_width = accounts
        .iter()
        .map(|a| a.account_type.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let balance_width = balances
        .iter()
        .chain(std::iter::once(&total_str))
        .map(|b| b.chars().count())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>balance_width$}  {}\n",
        "Name",
        "Type",
        "Balance",
        "ID",
    ));

    let rule = format!(
        "{:-<name_width$}  {:-<type_width$}  {:->balance_width$}  {:-<10}\n",
        "", "", "", "",
    );
    output.push_str(&rule);

    for (account, balance) in accounts.iter().zip(&balances) {
        output.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:>balance_width$}  {}\n",
            account.name, account.account_type, balance, account.id,
        ));
    }

    output.push_str(&rule);
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>balance_width$}\n",
        "TOTAL", "", total_str,
    ));

    output
}

/// Format known budgets, marking the active one with `*`
pub fn format_budget_list(budgets: &[BudgetEntry]) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let name_width = budgets
        .iter()
        .map(|b| b.budget.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!("   {:<name_width$}  {}\n", "Name", "ID"));
    for entry in budgets {
        output.push_str(&format!(
            " {} {:<name_width$}  {}\n",
            if entry.selected { "*" } else { " " },
            entry.budget.name,
            entry.budget.id,
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetSummary;

    #[test]
    fn test_empty_account_list() {
        let output = format_account_list(&[], &CurrencyFormat::default());
        assert!(output.starts_with("No tracked accounts"));
    }

    #[test]
    fn test_account_list_with_total() {
        let accounts = vec![
            Account::new("a-1", "Brokerage", Milliunits::new(1_500_000)),
            Account::new("a-2", "Car", Milliunits::new(-250_000)),
        ];
        let output = format_account_list(&accounts, &CurrencyFormat::default());

        assert!(output.contains("Brokerage"));
        assert!(output.contains("$1,500.00"));
        assert!(output.contains("-$250.00"));
        let total_line = output.lines().last().unwrap();
        assert!(total_line.starts_with("TOTAL"));
        assert!(total_line.ends_with("$1,250.00"));
    }

    #[test]
    fn test_budget_list_marks_selected() {
        let budgets = vec![
            BudgetEntry {
                budget: BudgetSummary::new("b-1", "Household"),
                selected: false,
            },
            BudgetEntry {
                budget: BudgetSummary::new("b-2", "Business"),
                selected: true,
            },
        ];
        let output = format_budget_list(&budgets);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("   Household"));
        assert!(lines[2].starts_with(" * Business"));
    }
}
