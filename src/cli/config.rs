//! Configuration CLI commands

use clap::Subcommand;
use log::{info, warn};

use super::{confirm, connect};
use crate::api::ClientFactory;
use crate::config::{ApiToken, Settings, UpdaterPaths};
use crate::error::{UpdaterError, UpdaterResult};
use crate::models::{AccountId, ClearedStatus};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Store the YNAB personal access token (prompts when omitted)
    SetToken {
        /// Token from https://app.ynab.com/settings/developer
        token: Option<String>,
    },
    /// Choose the budget to work with
    SelectBudget {
        /// Budget name or ID
        budget: String,
    },
    /// Choose the accounts to reconcile
    SelectAccounts {
        /// Account names or IDs
        #[arg(required = true)]
        accounts: Vec<String>,
    },
    /// Set the memo recorded on adjustments
    SetMemo {
        memo: String,
    },
    /// Set the cleared status of adjustments (cleared, uncleared, reconciled)
    SetCleared {
        status: ClearedStatus,
    },
    /// Print the configuration file path
    Path,
    /// Delete the configuration file (token and selections)
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &UpdaterPaths,
    settings: &mut Settings,
    factory: &ClientFactory,
    cmd: ConfigCommands,
) -> UpdaterResult<()> {
    match cmd {
        ConfigCommands::Show => {
            print!("{}", format_settings(paths, settings));
        }

        ConfigCommands::SetToken { token } => {
            let raw = match token {
                Some(token) => token,
                None => rpassword::prompt_password("YNAB personal access token: ")?,
            };
            settings.set_token(ApiToken::new(raw)?);
            settings.save(paths)?;
            info!("API token updated");
            println!("Token saved to {}", paths.settings_file().display());

            match connect(settings, factory).and_then(|api| api.list_budgets()) {
                Ok(budgets) => {
                    println!("Token verified: {} budget(s) available.", budgets.len());
                    settings.set_budgets_from_api(budgets);
                    settings.save(paths)?;
                }
                Err(e) => {
                    warn!("Token verification failed: {}", e);
                    println!("Warning: could not verify the token: {}", e);
                }
            }
        }

        ConfigCommands::SelectBudget { budget } => {
            let api = connect(settings, factory)?;
            settings.set_budgets_from_api(api.list_budgets()?);

            let id = settings
                .find_budget(&budget)
                .map(|b| b.id.clone())
                .ok_or_else(|| UpdaterError::budget_not_found(&budget))?;
            let changed = settings.select_budget(&id)?;
            settings.save(paths)?;

            let name = settings.selected_budget()?.name.clone();
            info!("Selected budget {}", name);
            println!("Active budget: {}", name);
            if changed {
                println!("Choose accounts with 'ynab-updater config select-accounts <NAME>...'.");
            }
        }

        ConfigCommands::SelectAccounts { accounts } => {
            let (_, budget) = settings.require_ready()?;
            let budget_id = budget.id.clone();

            let api = connect(settings, factory)?;
            settings.add_accounts_from_api(&api.list_accounts(&budget_id)?);

            let ids = accounts
                .iter()
                .map(|wanted| {
                    settings
                        .find_account(wanted)
                        .map(|a| a.id.clone())
                        .ok_or_else(|| UpdaterError::account_not_found(wanted.as_str()))
                })
                .collect::<UpdaterResult<Vec<AccountId>>>()?;
            settings.set_account_selection(&ids)?;
            settings.save(paths)?;

            println!("Tracking {} account(s):", ids.len());
            for entry in settings.selected_accounts() {
                println!("  {}", entry.name);
            }
        }

        ConfigCommands::SetMemo { memo } => {
            settings.adjustment_memo = memo;
            settings.save(paths)?;
            println!("Adjustment memo: {}", settings.adjustment_memo);
        }

        ConfigCommands::SetCleared { status } => {
            settings.adjustment_cleared_status = status;
            settings.save(paths)?;
            println!("Adjustment cleared status: {}", status);
        }

        ConfigCommands::Path => {
            println!("{}", paths.settings_file().display());
        }

        ConfigCommands::Reset { yes } => {
            if !yes && !confirm("Delete the saved token and all selections?")? {
                println!("Configuration kept.");
                return Ok(());
            }
            if Settings::reset(paths)? {
                *settings = Settings::default();
                println!("Configuration reset.");
            } else {
                println!("No configuration file to reset.");
            }
        }
    }

    Ok(())
}

fn format_settings(paths: &UpdaterPaths, settings: &Settings) -> String {
    let token = match settings.token() {
        Some(token) => format!("set ({})", token.hint()),
        None => "not set".to_string(),
    };
    let budget = match settings.selected_budget() {
        Ok(budget) => format!("{} ({})", budget.name, budget.id),
        Err(_) => "none selected".to_string(),
    };

    let mut output = String::new();
    output.push_str("YNAB Updater Configuration\n");
    output.push_str("==========================\n");
    output.push_str(&format!("Config file:      {}\n", paths.settings_file().display()));
    output.push_str(&format!("API token:        {}\n", token));
    output.push_str(&format!("Budget:           {}\n", budget));
    output.push_str(&format!(
        "Tracked accounts: {}\n",
        settings.selected_accounts().len()
    ));
    for entry in settings.selected_accounts() {
        output.push_str(&format!("  - {}\n", entry.name));
    }
    output.push_str(&format!("Adjustment memo:  {}\n", settings.adjustment_memo));
    output.push_str(&format!(
        "Cleared status:   {}\n",
        settings.adjustment_cleared_status
    ));
    output.push_str(&format!("Payee:            {}\n", settings.payee_name));
    output
}
