//! Custom error types for YNAB Updater
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::money::AmountError;

/// The main error type for YNAB Updater operations
#[derive(Error, Debug)]
pub enum UpdaterError {
    /// Configuration-related errors (missing token, no budget selected, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A user-entered amount could not be converted to milliunits
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Network, authentication or API failures
    #[error("{}", format_http(.status, .message))]
    Http {
        status: Option<u16>,
        message: String,
    },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input other than amounts
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

fn format_http(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP error {}: {}", code, message),
        None => format!("HTTP error: {}", message),
    }
}

impl UpdaterError {
    /// Create an HTTP error with a status code
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this error came from the budgeting service
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for UpdaterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for UpdaterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for UpdaterError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type alias for YNAB Updater operations
pub type UpdaterResult<T> = Result<T, UpdaterError>;
