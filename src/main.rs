use std::fs::OpenOptions;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use ynab_updater::api::ynab_client_factory;
use ynab_updater::cli::{
    handle_accounts_command, handle_budgets_command, handle_config_command,
    handle_update_command, ConfigCommands, UpdateArgs,
};
use ynab_updater::config::{ApiToken, Settings, UpdaterPaths};

#[derive(Parser)]
#[command(
    name = "ynab-updater",
    version,
    about = "Bring YNAB tracking-account balances up to date",
    long_about = "YNAB Updater asks for the current value of your tracking accounts \
                  (brokerage, property, pension...) and posts the balance adjustment \
                  transactions that bring YNAB in line with it."
)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG is used when omitted
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Personal access token for this run only
    #[arg(long, global = true, env = "YNAB_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// List the budgets of the account and mark the active one
    Budgets,

    /// List tracked accounts of the active budget with their balances
    Accounts {
        /// Show every open account, tracked or not
        #[arg(short, long)]
        all: bool,
    },

    /// Post adjustments bringing accounts to new balances
    Update(UpdateArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let paths = UpdaterPaths::new()?;
    init_logging(&paths, cli.log_level.as_deref(), matches!(command, Commands::Tui))?;

    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(raw) = cli.token {
        settings.override_token(ApiToken::new(raw)?);
    }
    let factory = ynab_client_factory();

    match command {
        Commands::Tui => {
            ynab_updater::tui::run_tui(paths, settings, factory)?;
        }
        Commands::Budgets => {
            handle_budgets_command(&paths, &mut settings, &factory)?;
        }
        Commands::Accounts { all } => {
            handle_accounts_command(&paths, &mut settings, &factory, all)?;
        }
        Commands::Update(args) => {
            let report = handle_update_command(&paths, &mut settings, &factory, args)?;
            if !report.is_success() {
                bail!(
                    "{} account(s) not updated: {}",
                    report.failed_count(),
                    report.failed_accounts().join(", ")
                );
            }
        }
        Commands::Config(cmd) => {
            handle_config_command(&paths, &mut settings, &factory, cmd)?;
        }
    }

    Ok(())
}

/// The terminal UI owns the screen, so its log goes to a file.
fn init_logging(paths: &UpdaterPaths, level: Option<&str>, to_file: bool) -> Result<()> {
    let mut builder = match level {
        Some(level) => {
            let filter: LevelFilter = level
                .parse()
                .with_context(|| format!("Invalid log level '{}'", level))?;
            let mut builder = env_logger::Builder::new();
            builder.filter_level(filter);
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
    };

    if to_file {
        paths.ensure_directories()?;
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file())
            .with_context(|| format!("Failed to open {}", paths.log_file().display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}
