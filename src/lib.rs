//! YNAB Updater - keep tracking-account balances current in YNAB
//!
//! The user enters what an account is really worth; the crate computes the
//! difference to the balance YNAB knows and posts it as a single adjustment
//! transaction per account.
//!
//! # Architecture
//!
//! - `models`: money in milliunits, accounts, budgets, adjustments
//! - `services`: the reconciliation engine and the posting of adjustments
//! - `api`: the budgeting service seam and its HTTP client
//! - `config`: paths, the API token and persisted settings
//! - `storage`: atomic JSON file I/O
//! - `display`: plain-text formatting for the CLI
//! - `cli`: command handlers
//! - `tui`: the interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use ynab_updater::models::{Account, AdjustmentMarker, Milliunits};
//! use ynab_updater::services::ReconciliationEngine;
//!
//! let account = Account::new("a-1", "Brokerage", Milliunits::new(150_000));
//! let engine = ReconciliationEngine::new(AdjustmentMarker::default());
//! let adjustment = engine.compute_adjustment(&account, "175.50")?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{UpdaterError, UpdaterResult};
