//! Configuration module for YNAB Updater
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - The API token

pub mod paths;
pub mod secret;
pub mod settings;

pub use paths::UpdaterPaths;
pub use secret::ApiToken;
pub use settings::{AccountEntry, BudgetEntry, Settings};
