//! User settings for YNAB Updater
//!
//! Holds the API token, the budgets known from the service (with the one the
//! user picked), the tracked accounts and the way adjustments are marked.

use serde::{Deserialize, Deserializer, Serialize};

use super::paths::UpdaterPaths;
use super::secret::ApiToken;
use crate::error::{UpdaterError, UpdaterResult};
use crate::models::transaction::{DEFAULT_ADJUSTMENT_MEMO, DEFAULT_PAYEE_NAME};
use crate::models::{Account, AccountId, AdjustmentMarker, BudgetId, BudgetSummary, ClearedStatus};
use crate::storage::file_io::{read_json, remove_file, write_json_atomic};

/// A budget known from the service and whether it is the active one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub budget: BudgetSummary,
    #[serde(default)]
    pub selected: bool,
}

/// An account of the active budget and whether it is tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub selected: bool,
}

/// User settings for YNAB Updater
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Personal access token
    #[serde(
        default,
        deserialize_with = "deserialize_optional_token",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_token: Option<ApiToken>,

    #[serde(default)]
    pub budgets: Vec<BudgetEntry>,

    #[serde(default)]
    pub accounts: Vec<AccountEntry>,

    #[serde(default = "default_memo")]
    pub adjustment_memo: String,

    #[serde(default)]
    pub adjustment_cleared_status: ClearedStatus,

    #[serde(default = "default_payee_name")]
    pub payee_name: String,

    /// Token given on the command line or in the environment; never saved
    #[serde(skip)]
    token_override: Option<ApiToken>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_memo() -> String {
    DEFAULT_ADJUSTMENT_MEMO.to_string()
}

fn default_payee_name() -> String {
    DEFAULT_PAYEE_NAME.to_string()
}

// An empty string in the file means "no token yet"
fn deserialize_optional_token<'de, D>(deserializer: D) -> Result<Option<ApiToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => ApiToken::new(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_token: None,
            budgets: Vec::new(),
            accounts: Vec::new(),
            adjustment_memo: default_memo(),
            adjustment_cleared_status: ClearedStatus::default(),
            payee_name: default_payee_name(),
            token_override: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &UpdaterPaths) -> UpdaterResult<Self> {
        let loaded: Option<Self> = read_json(&paths.settings_file()).map_err(|e| match e {
            UpdaterError::Storage(msg) => UpdaterError::Config(msg),
            other => other,
        })?;
        Ok(loaded.unwrap_or_default())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &UpdaterPaths) -> UpdaterResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(&paths.settings_file(), self)
    }

    /// Delete the configuration file, forgetting token and selections
    ///
    /// Returns false when there was no file to delete.
    pub fn reset(paths: &UpdaterPaths) -> UpdaterResult<bool> {
        remove_file(&paths.settings_file())
    }

    /// Use `token` for this session without storing it
    pub fn override_token(&mut self, token: ApiToken) {
        self.token_override = Some(token);
    }

    /// Token to authenticate with: the session override, else the stored one
    pub fn token(&self) -> Option<&ApiToken> {
        self.token_override.as_ref().or(self.api_token.as_ref())
    }

    /// Store a new token, replacing any session override
    pub fn set_token(&mut self, token: ApiToken) {
        self.token_override = None;
        self.api_token = Some(token);
    }

    /// The single active budget
    pub fn selected_budget(&self) -> UpdaterResult<&BudgetSummary> {
        let mut selected = self.budgets.iter().filter(|b| b.selected);
        match (selected.next(), selected.next()) {
            (None, _) => Err(UpdaterError::Config("No selected budgets".into())),
            (Some(entry), None) => Ok(&entry.budget),
            (Some(_), Some(_)) => Err(UpdaterError::Config(
                "More than 1 selected budgets".into(),
            )),
        }
    }

    pub fn has_selected_budget(&self) -> bool {
        self.budgets.iter().any(|b| b.selected)
    }

    /// Accounts chosen for reconciliation
    pub fn selected_accounts(&self) -> Vec<&AccountEntry> {
        self.accounts.iter().filter(|a| a.selected).collect()
    }

    pub fn has_selected_accounts(&self) -> bool {
        self.accounts.iter().any(|a| a.selected)
    }

    /// True with a token and exactly one active budget
    pub fn is_valid(&self) -> bool {
        self.token().is_some() && self.selected_budget().is_ok()
    }

    /// Token and active budget, or the configuration error that blocks work
    pub fn require_ready(&self) -> UpdaterResult<(&ApiToken, &BudgetSummary)> {
        let token = self.token().ok_or_else(|| {
            UpdaterError::Config(
                "No API token configured (run `ynab-updater config set-token`)".into(),
            )
        })?;
        Ok((token, self.selected_budget()?))
    }

    /// Replace the known budgets, keeping the selection of ids still present
    ///
    /// When the active budget is gone its tracked accounts are forgotten.
    pub fn set_budgets_from_api(&mut self, budgets: Vec<BudgetSummary>) {
        let previously_selected: Vec<BudgetId> = self
            .budgets
            .iter()
            .filter(|b| b.selected)
            .map(|b| b.budget.id.clone())
            .collect();

        self.budgets = budgets
            .into_iter()
            .map(|budget| BudgetEntry {
                selected: previously_selected.contains(&budget.id),
                budget,
            })
            .collect();

        if !previously_selected.is_empty() && !self.has_selected_budget() {
            self.accounts.clear();
        }
    }

    /// Make `id` the only active budget
    ///
    /// Switching to a different budget forgets the tracked accounts, which
    /// belong to the old one. Returns whether the active budget changed.
    pub fn select_budget(&mut self, id: &BudgetId) -> UpdaterResult<bool> {
        if self.budget_by_id(id).is_none() {
            return Err(UpdaterError::budget_not_found(id.as_str()));
        }

        let changed = self
            .selected_budget()
            .map(|current| &current.id != id)
            .unwrap_or(true);

        for entry in &mut self.budgets {
            entry.selected = &entry.budget.id == id;
        }
        if changed {
            self.accounts.clear();
        }
        Ok(changed)
    }

    /// Merge accounts fetched from the service
    ///
    /// Names are refreshed, selections kept, and accounts the service no
    /// longer returns are dropped. New accounts start untracked.
    pub fn add_accounts_from_api(&mut self, accounts: &[Account]) {
        let merged = accounts
            .iter()
            .filter(|a| a.is_active())
            .map(|account| AccountEntry {
                id: account.id.clone(),
                name: account.name.clone(),
                selected: self
                    .account_by_id(&account.id)
                    .map(|existing| existing.selected)
                    .unwrap_or(false),
            })
            .collect();
        self.accounts = merged;
    }

    /// Track exactly the given accounts
    pub fn set_account_selection(&mut self, ids: &[AccountId]) -> UpdaterResult<()> {
        if let Some(unknown) = ids.iter().find(|id| self.account_by_id(id).is_none()) {
            return Err(UpdaterError::account_not_found(unknown.as_str()));
        }
        for entry in &mut self.accounts {
            entry.selected = ids.contains(&entry.id);
        }
        Ok(())
    }

    pub fn account_by_id(&self, id: &AccountId) -> Option<&AccountEntry> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    pub fn budget_by_id(&self, id: &BudgetId) -> Option<&BudgetSummary> {
        self.budgets
            .iter()
            .map(|b| &b.budget)
            .find(|b| &b.id == id)
    }

    /// Look a budget up by id or case-insensitive name
    pub fn find_budget(&self, id_or_name: &str) -> Option<&BudgetSummary> {
        let needle = id_or_name.trim();
        self.budgets
            .iter()
            .map(|b| &b.budget)
            .find(|b| b.id.as_str() == needle || b.name.eq_ignore_ascii_case(needle))
    }

    /// Look an account up by id or case-insensitive name
    pub fn find_account(&self, id_or_name: &str) -> Option<&AccountEntry> {
        let needle = id_or_name.trim();
        self.accounts
            .iter()
            .find(|a| a.id.as_str() == needle || a.name.eq_ignore_ascii_case(needle))
    }

    /// How adjustments created with these settings are marked
    pub fn adjustment_marker(&self) -> AdjustmentMarker {
        AdjustmentMarker {
            payee_name: self.payee_name.clone(),
            memo: self.adjustment_memo.clone(),
            cleared: self.adjustment_cleared_status,
            approved: true,
        }
    }
}
