//! Adjustment transactions
//!
//! A synthetic ledger entry that moves a tracked balance to the value the
//! user observed in the real world. Built by the reconciliation engine and
//! posted once; never stored locally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::AccountId;
use super::money::Milliunits;

/// Payee recorded on every adjustment unless configured otherwise
pub const DEFAULT_PAYEE_NAME: &str = "Balance Adjustment";

/// Memo recorded on every adjustment unless configured otherwise
pub const DEFAULT_ADJUSTMENT_MEMO: &str = "Balance adjusted by YNAB Updater";

/// Cleared state of a posted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    #[default]
    Cleared,
    Uncleared,
    Reconciled,
}

impl ClearedStatus {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleared => "cleared",
            Self::Uncleared => "uncleared",
            Self::Reconciled => "reconciled",
        }
    }

    /// All statuses, in menu order
    pub fn all() -> [ClearedStatus; 3] {
        [Self::Cleared, Self::Uncleared, Self::Reconciled]
    }
}

impl fmt::Display for ClearedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClearedStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cleared" => Ok(Self::Cleared),
            "uncleared" => Ok(Self::Uncleared),
            "reconciled" => Ok(Self::Reconciled),
            other => Err(format!(
                "unknown cleared status '{}' (expected cleared, uncleared or reconciled)",
                other
            )),
        }
    }
}

/// Identifies a transaction as a balance adjustment made by this tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentMarker {
    pub payee_name: String,
    pub memo: String,
    pub cleared: ClearedStatus,
    pub approved: bool,
}

impl Default for AdjustmentMarker {
    fn default() -> Self {
        Self {
            payee_name: DEFAULT_PAYEE_NAME.into(),
            memo: DEFAULT_ADJUSTMENT_MEMO.into(),
            cleared: ClearedStatus::default(),
            approved: true,
        }
    }
}

/// An adjustment ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentTransaction {
    pub account_id: AccountId,
    /// Signed delta in milliunits; never zero
    pub amount: Milliunits,
    pub date: NaiveDate,
    pub marker: AdjustmentMarker,
}

impl AdjustmentTransaction {
    /// True when the adjustment raises the balance
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }
}

impl fmt::Display for AdjustmentTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.account_id,
            self.amount,
            self.marker.payee_name
        )
    }
}
