//! Posting adjustments to the budgeting service
//!
//! Each adjustment goes out in its own request. A failure is recorded for
//! that account and the remaining adjustments are still posted.

use std::fmt;

use log::{error, info};

use super::reconciliation::BatchItem;
use crate::api::BudgetApi;
use crate::error::UpdaterResult;
use crate::models::{AccountId, AdjustmentTransaction, BudgetId, Milliunits};

/// Result of posting one adjustment
#[derive(Debug)]
pub struct PostOutcome {
    pub account_id: AccountId,
    pub amount: Milliunits,
    /// Created transaction id
    pub result: UpdaterResult<String>,
}

impl PostOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Posts adjustments for one budget
pub struct SyncService<'a> {
    api: &'a dyn BudgetApi,
    budget_id: BudgetId,
}

impl<'a> SyncService<'a> {
    pub fn new(api: &'a dyn BudgetApi, budget_id: BudgetId) -> Self {
        Self { api, budget_id }
    }

    /// Post every adjustment sequentially, one request each
    pub fn post(&self, adjustments: &[AdjustmentTransaction]) -> Vec<PostOutcome> {
        info!(
            "Posting {} adjustment(s) to budget {}",
            adjustments.len(),
            self.budget_id
        );
        adjustments
            .iter()
            .map(|tx| {
                let result = self.api.create_transaction(&self.budget_id, tx);
                if let Err(e) = &result {
                    error!("Adjustment for account {} failed: {}", tx.account_id, e);
                }
                PostOutcome {
                    account_id: tx.account_id.clone(),
                    amount: tx.amount,
                    result,
                }
            })
            .collect()
    }
}

/// Tally of a batch once its adjustments have been posted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Accounts now at their new balance
    pub updated: Vec<(AccountId, Milliunits)>,
    pub unchanged: Vec<String>,
    pub invalid: Vec<String>,
    /// Account name and error message
    pub post_failures: Vec<(String, String)>,
}

impl SyncReport {
    pub fn new(items: &[BatchItem], outcomes: &[PostOutcome]) -> Self {
        let mut report = Self::default();

        for item in items {
            if item.is_invalid() {
                report.invalid.push(item.account_name.clone());
                continue;
            }
            if item.is_unchanged() {
                report.unchanged.push(item.account_name.clone());
                continue;
            }

            let outcome = outcomes.iter().find(|o| o.account_id == item.account_id);
            match (outcome.map(|o| &o.result), item.new_balance()) {
                (Some(Ok(_)), Some(balance)) => {
                    report.updated.push((item.account_id.clone(), balance));
                }
                (Some(Err(e)), _) => report
                    .post_failures
                    .push((item.account_name.clone(), e.to_string())),
                // Computed but never posted (declined)
                _ => {}
            }
        }

        report
    }

    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    pub fn failed_count(&self) -> usize {
        self.invalid.len() + self.post_failures.len()
    }

    /// True when nothing failed
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Names of every account that did not reach its new balance
    pub fn failed_accounts(&self) -> Vec<&str> {
        self.invalid
            .iter()
            .map(String::as_str)
            .chain(self.post_failures.iter().map(|(name, _)| name.as_str()))
            .collect()
    }

    /// New balance of an updated account
    pub fn new_balance_of(&self, account_id: &AccountId) -> Option<Milliunits> {
        self.updated
            .iter()
            .find(|(id, _)| id == account_id)
            .map(|(_, balance)| *balance)
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![format!("{} updated", self.updated.len())];
        if !self.unchanged.is_empty() {
            parts.push(format!("{} unchanged", self.unchanged.len()));
        }
        if !self.invalid.is_empty() {
            parts.push(format!("{} failed: invalid amount", self.invalid.len()));
        }
        if !self.post_failures.is_empty() {
            parts.push(format!("{} failed: not posted", self.post_failures.len()));
        }
        f.write_str(&parts.join(", "))
    }
}
