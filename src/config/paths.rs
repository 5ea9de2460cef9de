//! Path management for YNAB Updater
//!
//! ## Path Resolution Order
//!
//! 1. `YNAB_UPDATER_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory: `~/.config/ynab-updater` on
//!    Linux, `~/Library/Application Support/ynab-updater` on macOS,
//!    `%APPDATA%\ynab-updater\config` on Windows

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::UpdaterError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "YNAB_UPDATER_CONFIG_DIR";

/// Manages all paths used by YNAB Updater
#[derive(Debug, Clone)]
pub struct UpdaterPaths {
    base_dir: PathBuf,
}

impl UpdaterPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, UpdaterError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create UpdaterPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the log file used while the terminal UI is running
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("updater.log")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), UpdaterError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            UpdaterError::Io(format!("Failed to create config directory: {}", e))
        })?;
        Ok(())
    }

    /// Check if a settings file has been written yet
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, UpdaterError> {
    ProjectDirs::from("", "", "ynab-updater")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| UpdaterError::Config("Could not determine home directory".into()))
}
