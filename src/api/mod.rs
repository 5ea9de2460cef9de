//! Budgeting service access
//!
//! [`BudgetApi`] is the seam between the rest of the crate and YNAB. The
//! real implementation is [`YnabClient`]; tests use an in-memory one.

pub mod client;
pub mod types;

pub use client::YnabClient;

use crate::config::ApiToken;
use crate::error::UpdaterResult;
use crate::models::{Account, AccountId, AdjustmentTransaction, BudgetId, BudgetSummary};

/// Operations this tool needs from the budgeting service
pub trait BudgetApi {
    /// All budgets visible to the token
    fn list_budgets(&self) -> UpdaterResult<Vec<BudgetSummary>>;

    /// Open, non-deleted accounts of a budget
    fn list_accounts(&self, budget_id: &BudgetId) -> UpdaterResult<Vec<Account>>;

    /// A single account, `None` when the service does not know it
    fn get_account(
        &self,
        budget_id: &BudgetId,
        account_id: &AccountId,
    ) -> UpdaterResult<Option<Account>>;

    /// Post one adjustment and return the id of the created transaction
    fn create_transaction(
        &self,
        budget_id: &BudgetId,
        transaction: &AdjustmentTransaction,
    ) -> UpdaterResult<String>;
}

/// Builds a client once a token is known
pub type ClientFactory = Box<dyn Fn(&ApiToken) -> UpdaterResult<Box<dyn BudgetApi>>>;

/// Factory producing [`YnabClient`]s
pub fn ynab_client_factory() -> ClientFactory {
    Box::new(|token: &ApiToken| {
        let client = YnabClient::new(token.clone())?;
        Ok(Box::new(client) as Box<dyn BudgetApi>)
    })
}
