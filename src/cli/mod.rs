//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod accounts;
pub mod config;
pub mod update;

pub use accounts::{handle_accounts_command, handle_budgets_command};
pub use config::{handle_config_command, ConfigCommands};
pub use update::{handle_update_command, UpdateArgs};

use std::io::{self, BufRead, Write};

use crate::api::{BudgetApi, ClientFactory};
use crate::config::Settings;
use crate::error::{UpdaterError, UpdaterResult};

/// Build a client from the configured token
pub fn connect(settings: &Settings, factory: &ClientFactory) -> UpdaterResult<Box<dyn BudgetApi>> {
    let token = settings.token().ok_or_else(|| {
        UpdaterError::Config(
            "No API token configured (run `ynab-updater config set-token`)".into(),
        )
    })?;
    factory(token)
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is no
pub(crate) fn confirm(prompt: &str) -> UpdaterResult<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
