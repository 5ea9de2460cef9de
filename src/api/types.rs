//! Wire types for the YNAB REST API
//!
//! Successful responses wrap their payload as `{"data": ...}`; failures come
//! back as `{"error": {"id", "name", "detail"}}`.

use serde::{Deserialize, Serialize};

use crate::models::{Account, AdjustmentTransaction, BudgetSummary, ClearedStatus};

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct BudgetsData {
    pub budgets: Vec<BudgetSummary>,
}

#[derive(Debug, Deserialize)]
pub struct AccountsData {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
pub struct AccountData {
    pub account: Account,
}

/// Body of `POST /budgets/{id}/transactions`
#[derive(Debug, Serialize)]
pub struct SaveTransactionRequest<'a> {
    pub transaction: NewTransaction<'a>,
}

#[derive(Debug, Serialize)]
pub struct NewTransaction<'a> {
    pub account_id: &'a str,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    /// Milliunits
    pub amount: i64,
    pub payee_name: &'a str,
    pub memo: &'a str,
    pub cleared: ClearedStatus,
    pub approved: bool,
}

impl<'a> From<&'a AdjustmentTransaction> for SaveTransactionRequest<'a> {
    fn from(tx: &'a AdjustmentTransaction) -> Self {
        Self {
            transaction: NewTransaction {
                account_id: tx.account_id.as_str(),
                date: tx.date.format("%Y-%m-%d").to_string(),
                amount: tx.amount.value(),
                payee_name: &tx.marker.payee_name,
                memo: &tx.marker.memo,
                cleared: tx.marker.cleared,
                approved: tx.marker.approved,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveTransactionsData {
    #[serde(default)]
    pub transaction_ids: Vec<String>,
    #[serde(default)]
    pub transaction: Option<TransactionRef>,
}

impl SaveTransactionsData {
    /// Id of the created transaction, if the service reported one
    pub fn created_id(self) -> Option<String> {
        self.transaction
            .map(|t| t.id)
            .or_else(|| self.transaction_ids.into_iter().next())
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub detail: String,
}

impl ErrorDetail {
    /// Human readable message, preferring the detail text
    pub fn message(&self) -> String {
        match (self.detail.is_empty(), self.name.is_empty()) {
            (false, false) => format!("{} ({})", self.detail, self.name),
            (false, true) => self.detail.clone(),
            (true, false) => self.name.clone(),
            (true, true) => format!("error {}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, AdjustmentMarker, Milliunits};
    use chrono::NaiveDate;

    #[test]
    fn test_transaction_body_shape() {
        let tx = AdjustmentTransaction {
            account_id: AccountId::new("acc-1"),
            amount: Milliunits::new(25_500),
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            marker: AdjustmentMarker::default(),
        };

        let body = serde_json::to_value(SaveTransactionRequest::from(&tx)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "transaction": {
                    "account_id": "acc-1",
                    "date": "2025-03-09",
                    "amount": 25500,
                    "payee_name": "Balance Adjustment",
                    "memo": "Balance adjusted by YNAB Updater",
                    "cleared": "cleared",
                    "approved": true
                }
            })
        );
    }

    #[test]
    fn test_created_id() {
        let data: SaveTransactionsData = serde_json::from_str(
            r#"{"transaction_ids": ["t-1"], "transaction": {"id": "t-1", "amount": 1000}}"#,
        )
        .unwrap();
        assert_eq!(data.created_id().as_deref(), Some("t-1"));

        let data: SaveTransactionsData =
            serde_json::from_str(r#"{"transaction_ids": ["t-2"]}"#).unwrap();
        assert_eq!(data.created_id().as_deref(), Some("t-2"));
    }

    #[test]
    fn test_error_message() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"error": {"id": "401", "name": "unauthorized", "detail": "Unauthorized"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.error.message(), "Unauthorized (unauthorized)");
    }
}
