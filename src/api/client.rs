//! Blocking HTTP client for the YNAB REST API

use std::time::Duration;

use log::{debug, error, info};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use super::types::{
    AccountData, AccountsData, BudgetsData, DataEnvelope, ErrorEnvelope, SaveTransactionRequest,
    SaveTransactionsData,
};
use super::BudgetApi;
use crate::config::ApiToken;
use crate::error::{UpdaterError, UpdaterResult};
use crate::models::{Account, AccountId, AdjustmentTransaction, BudgetId, BudgetSummary};

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://api.ynab.com/v1";

/// Environment variable overriding the API root
pub const BASE_URL_ENV: &str = "YNAB_API_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to YNAB with a personal access token
pub struct YnabClient {
    http: Client,
    base_url: String,
    token: ApiToken,
}

impl YnabClient {
    /// Client for the public API, or `YNAB_API_URL` when set
    pub fn new(token: ApiToken) -> UpdaterResult<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(token, base_url)
    }

    pub fn with_base_url(token: ApiToken, base_url: impl Into<String>) -> UpdaterResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("ynab-updater/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> UpdaterResult<T> {
        debug!("GET {}", path);
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(self.token.expose())
            .send()?;
        read_data(response)
    }
}

/// Unwrap a `{"data": ...}` envelope or turn the error envelope into an error
fn read_data<T: DeserializeOwned>(response: Response) -> UpdaterResult<T> {
    let status = response.status();
    if status.is_success() {
        let envelope: DataEnvelope<T> = response.json()?;
        return Ok(envelope.data);
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message())
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });
    error!("YNAB request failed with {}: {}", status.as_u16(), message);
    Err(UpdaterError::http(status.as_u16(), message))
}

impl BudgetApi for YnabClient {
    fn list_budgets(&self) -> UpdaterResult<Vec<BudgetSummary>> {
        let data: BudgetsData = self.get("/budgets")?;
        info!("Fetched {} budgets", data.budgets.len());
        Ok(data.budgets)
    }

    fn list_accounts(&self, budget_id: &BudgetId) -> UpdaterResult<Vec<Account>> {
        let data: AccountsData = self.get(&format!("/budgets/{}/accounts", budget_id))?;
        let accounts: Vec<Account> = data
            .accounts
            .into_iter()
            .filter(Account::is_active)
            .collect();
        info!("Fetched {} open accounts for budget {}", accounts.len(), budget_id);
        Ok(accounts)
    }

    fn get_account(
        &self,
        budget_id: &BudgetId,
        account_id: &AccountId,
    ) -> UpdaterResult<Option<Account>> {
        match self.get::<AccountData>(&format!("/budgets/{}/accounts/{}", budget_id, account_id)) {
            Ok(data) => Ok(Some(data.account)),
            Err(UpdaterError::Http {
                status: Some(404), ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn create_transaction(
        &self,
        budget_id: &BudgetId,
        transaction: &AdjustmentTransaction,
    ) -> UpdaterResult<String> {
        let body = SaveTransactionRequest::from(transaction);
        debug!(
            "POST /budgets/{}/transactions account={} amount={}",
            budget_id, transaction.account_id, transaction.amount
        );

        let response = self
            .http
            .post(self.url(&format!("/budgets/{}/transactions", budget_id)))
            .bearer_auth(self.token.expose())
            .json(&body)
            .send()?;

        let data: SaveTransactionsData = read_data(response)?;
        let id = data.created_id().ok_or_else(|| UpdaterError::Http {
            status: None,
            message: "transaction created but no id was returned".into(),
        })?;
        info!(
            "Created adjustment {} of {} for account {}",
            id, transaction.amount, transaction.account_id
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdjustmentMarker, Milliunits};
    use chrono::NaiveDate;
    use mockito::{Matcher, Server};

    fn client(server: &Server) -> YnabClient {
        YnabClient::with_base_url(ApiToken::new("test-token").unwrap(), server.url()).unwrap()
    }

    #[test]
    fn test_list_budgets() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/budgets")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": {"budgets": [
                    {"id": "b-1", "name": "Household", "currency_format": {
                        "iso_code": "EUR", "decimal_digits": 2, "decimal_separator": ",",
                        "symbol_first": false, "group_separator": ".",
                        "currency_symbol": "€", "display_symbol": true}},
                    {"id": "b-2", "name": "Business"}
                ], "default_budget": null}}"#,
            )
            .create();

        let budgets = client(&server).list_budgets().unwrap();
        mock.assert();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].currency_format.currency_symbol, "€");
        assert_eq!(budgets[1].currency_format.currency_symbol, "$");
    }

    #[test]
    fn test_list_accounts_filters_closed_and_deleted() {
        let mut server = Server::new();
        server
            .mock("GET", "/budgets/b-1/accounts")
            .with_status(200)
            .with_body(
                r#"{"data": {"accounts": [
                    {"id": "a-1", "name": "Brokerage", "type": "otherAsset", "on_budget": false,
                     "closed": false, "balance": 150000, "deleted": false},
                    {"id": "a-2", "name": "Old", "type": "checking", "on_budget": true,
                     "closed": true, "balance": 0, "deleted": false},
                    {"id": "a-3", "name": "Gone", "type": "checking", "on_budget": true,
                     "closed": false, "balance": 0, "deleted": true}
                ], "server_knowledge": 10}}"#,
            )
            .create();

        let accounts = client(&server).list_accounts(&BudgetId::new("b-1")).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Brokerage");
        assert_eq!(accounts[0].balance, Milliunits::new(150_000));
    }

    #[test]
    fn test_get_account_not_found_is_none() {
        let mut server = Server::new();
        server
            .mock("GET", "/budgets/b-1/accounts/missing")
            .with_status(404)
            .with_body(r#"{"error": {"id": "404.2", "name": "resource_not_found", "detail": "Resource not found"}}"#)
            .create();

        let account = client(&server)
            .get_account(&BudgetId::new("b-1"), &AccountId::new("missing"))
            .unwrap();
        assert!(account.is_none());
    }

    #[test]
    fn test_error_envelope_mapped_to_http_error() {
        let mut server = Server::new();
        server
            .mock("GET", "/budgets")
            .with_status(401)
            .with_body(r#"{"error": {"id": "401", "name": "unauthorized", "detail": "Unauthorized"}}"#)
            .create();

        let err = client(&server).list_budgets().unwrap_err();
        match err {
            UpdaterError::Http { status, message } => {
                assert_eq!(status, Some(401));
                assert!(message.contains("Unauthorized"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_create_transaction() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/budgets/b-1/transactions")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "transaction": {
                    "account_id": "a-1",
                    "date": "2025-01-31",
                    "amount": -20000,
                    "payee_name": "Balance Adjustment",
                    "cleared": "cleared",
                    "approved": true
                }
            })))
            .with_status(201)
            .with_body(r#"{"data": {"transaction_ids": ["t-9"], "transaction": {"id": "t-9"}, "server_knowledge": 3}}"#)
            .create();

        let tx = AdjustmentTransaction {
            account_id: AccountId::new("a-1"),
            amount: Milliunits::new(-20_000),
            date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            marker: AdjustmentMarker::default(),
        };
        let id = client(&server)
            .create_transaction(&BudgetId::new("b-1"), &tx)
            .unwrap();

        mock.assert();
        assert_eq!(id, "t-9");
    }

    #[test]
    fn test_unreachable_server_is_http_error_without_status() {
        let client = YnabClient::with_base_url(
            ApiToken::new("t").unwrap(),
            "http://127.0.0.1:9",
        )
        .unwrap();
        let err = client.list_budgets().unwrap_err();
        assert!(matches!(err, UpdaterError::Http { status: None, .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            YnabClient::with_base_url(ApiToken::new("t").unwrap(), "http://localhost/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost/v1");
    }
}
