//! Account model
//!
//! An account as reported by YNAB. The service owns it; this tool only reads
//! it and keeps a copy for the current session.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Milliunits;

/// A budget account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Service-assigned identifier
    pub id: AccountId,

    /// Account name (e.g., "Brokerage")
    pub name: String,

    /// Account type as reported by the service ("checking", "otherAsset", ...)
    #[serde(rename = "type", default)]
    pub account_type: String,

    /// Whether this account is included in the budget
    #[serde(default)]
    pub on_budget: bool,

    /// Whether this account is closed
    #[serde(default)]
    pub closed: bool,

    /// Current tracked balance
    pub balance: Milliunits,

    /// Whether this account has been deleted
    #[serde(default)]
    pub deleted: bool,
}

impl Account {
    /// Create an open, on-budget account
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>, balance: Milliunits) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_type: String::from("otherAsset"),
            on_budget: true,
            closed: false,
            balance,
            deleted: false,
        }
    }

    /// Closed and deleted accounts are never offered for reconciliation
    pub fn is_active(&self) -> bool {
        !self.closed && !self.deleted
    }

    /// Case-insensitive match against either the id or the name
    pub fn matches(&self, id_or_name: &str) -> bool {
        let needle = id_or_name.trim();
        self.id.as_str() == needle || self.name.eq_ignore_ascii_case(needle)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}
