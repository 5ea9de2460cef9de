//! Headless balance update
//!
//! `ynab-updater update Brokerage=1520.33 House=250000` computes and posts
//! the adjustments without the terminal UI.

use clap::Args;
use log::{info, warn};

use super::accounts::tracked_accounts;
use super::{confirm, connect};
use crate::api::ClientFactory;
use crate::config::{Settings, UpdaterPaths};
use crate::display::{format_adjustment_plan, format_sync_report};
use crate::error::{UpdaterError, UpdaterResult};
use crate::models::{Account, CurrencyFormat};
use crate::services::reconciliation::pending_adjustments;
use crate::services::{BalanceUpdateRequest, ReconciliationEngine, SyncReport, SyncService};

/// Arguments of the `update` command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// New balances as ACCOUNT=BALANCE (account name or ID)
    #[arg(required = true, value_name = "ACCOUNT=BALANCE")]
    pub balances: Vec<String>,

    /// Post without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Show the adjustments without posting them
    #[arg(long)]
    pub dry_run: bool,
}

/// Split `ACCOUNT=BALANCE` at the last `=`
pub fn parse_assignment(raw: &str) -> UpdaterResult<(String, String)> {
    let invalid = || {
        UpdaterError::Validation(format!("Expected ACCOUNT=BALANCE, got '{}'", raw))
    };
    let (account, balance) = raw.rsplit_once('=').ok_or_else(invalid)?;
    let (account, balance) = (account.trim(), balance.trim());
    if account.is_empty() || balance.is_empty() {
        return Err(invalid());
    }
    Ok((account.to_string(), balance.to_string()))
}

/// Match each assignment to a tracked account and normalise its balance
pub fn resolve_requests(
    tracked: &[Account],
    assignments: &[(String, String)],
    format: &CurrencyFormat,
) -> UpdaterResult<Vec<BalanceUpdateRequest>> {
    let mut requests: Vec<BalanceUpdateRequest> = Vec::with_capacity(assignments.len());
    for (account, balance) in assignments {
        let found = tracked
            .iter()
            .find(|a| a.matches(account))
            .ok_or_else(|| UpdaterError::account_not_found(account.as_str()))?;

        if requests.iter().any(|r| r.account_id == found.id) {
            return Err(UpdaterError::Validation(format!(
                "Account '{}' given more than once",
                found.name
            )));
        }
        requests.push(BalanceUpdateRequest::new(
            found.id.clone(),
            format.normalize_input(balance),
        ));
    }
    Ok(requests)
}

/// Handle the `update` command
pub fn handle_update_command(
    paths: &UpdaterPaths,
    settings: &mut Settings,
    factory: &ClientFactory,
    args: UpdateArgs,
) -> UpdaterResult<SyncReport> {
    let assignments = args
        .balances
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<UpdaterResult<Vec<_>>>()?;

    let (_, budget) = settings.require_ready()?;
    let budget = budget.clone();

    let api = connect(settings, factory)?;
    let accounts = api.list_accounts(&budget.id)?;
    settings.add_accounts_from_api(&accounts);
    settings.save(paths)?;

    let tracked = tracked_accounts(settings, accounts);
    let requests = resolve_requests(&tracked, &assignments, &budget.currency_format)?;

    let pairs: Vec<(&Account, &str)> = requests
        .iter()
        .filter_map(|r| {
            tracked
                .iter()
                .find(|a| a.id == r.account_id)
                .map(|a| (a, r.new_balance.as_str()))
        })
        .collect();

    let engine = ReconciliationEngine::new(settings.adjustment_marker());
    let items = engine.compute_batch(&pairs);
    let adjustments = pending_adjustments(&items);

    println!("Budget: {}", budget.name);
    print!("{}", format_adjustment_plan(&items, &budget.currency_format));

    if adjustments.is_empty() {
        println!("Nothing to post.");
        return Ok(SyncReport::new(&items, &[]));
    }

    if args.dry_run {
        println!("Dry run: {} adjustment(s) not posted.", adjustments.len());
        return Ok(SyncReport::new(&items, &[]));
    }

    if !args.yes && !confirm(&format!("Post {} adjustment(s)?", adjustments.len()))? {
        warn!("Update of {} account(s) declined", adjustments.len());
        println!("Cancelled. Nothing was posted.");
        return Ok(SyncReport::new(&items, &[]));
    }

    let outcomes = SyncService::new(api.as_ref(), budget.id.clone()).post(&adjustments);
    let report = SyncReport::new(&items, &outcomes);
    info!("Update finished: {}", report);

    print!("{}", format_sync_report(&report));
    Ok(report)
}
