//! Budget and account listing commands

use log::info;

use super::connect;
use crate::api::ClientFactory;
use crate::config::{Settings, UpdaterPaths};
use crate::display::{format_account_list, format_budget_list};
use crate::error::UpdaterResult;
use crate::models::Account;

/// Refresh the budget list from the service and print it
pub fn handle_budgets_command(
    paths: &UpdaterPaths,
    settings: &mut Settings,
    factory: &ClientFactory,
) -> UpdaterResult<()> {
    let api = connect(settings, factory)?;
    let budgets = api.list_budgets()?;
    info!("Refreshing {} budgets", budgets.len());

    settings.set_budgets_from_api(budgets);
    settings.save(paths)?;

    print!("{}", format_budget_list(&settings.budgets));
    if !settings.has_selected_budget() {
        println!();
        println!("Choose one with 'ynab-updater config select-budget <NAME>'.");
    }
    Ok(())
}

/// Print the tracked accounts of the active budget (or all with `all`)
pub fn handle_accounts_command(
    paths: &UpdaterPaths,
    settings: &mut Settings,
    factory: &ClientFactory,
    all: bool,
) -> UpdaterResult<()> {
    let (_, budget) = settings.require_ready()?;
    let budget = budget.clone();

    let api = connect(settings, factory)?;
    let accounts = api.list_accounts(&budget.id)?;
    settings.add_accounts_from_api(&accounts);
    settings.save(paths)?;

    let shown = if all {
        accounts
    } else {
        tracked_accounts(settings, accounts)
    };

    println!("Budget: {}", budget.name);
    println!();
    print!("{}", format_account_list(&shown, &budget.currency_format));
    Ok(())
}

/// Keep only the accounts selected for reconciliation
pub(crate) fn tracked_accounts(settings: &Settings, accounts: Vec<Account>) -> Vec<Account> {
    accounts
        .into_iter()
        .filter(|a| {
            settings
                .account_by_id(&a.id)
                .map(|entry| entry.selected)
                .unwrap_or(false)
        })
        .collect()
}
