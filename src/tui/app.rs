//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events,
//! and owns the client used to talk to the budgeting service.

use log::{info, warn};

use crate::api::{BudgetApi, ClientFactory};
use crate::cli::connect;
use crate::config::{ApiToken, Settings, UpdaterPaths};
use crate::display::{format_adjustment_plan, single_adjustment_prompt};
use crate::error::{UpdaterError, UpdaterResult};
use crate::models::{
    Account, AccountId, AdjustmentTransaction, BudgetId, CurrencyFormat, Milliunits,
};
use crate::services::reconciliation::pending_adjustments;
use crate::services::{BatchItem, NetWorth, ReconciliationEngine, SyncReport, SyncService};

use super::widgets::{Notification, NotificationQueue, TextInput};

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a new balance into the selected row
    Editing,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    ApiKey,
    BudgetSelect,
    AccountSelect,
    Confirm,
    /// Delete the configuration file and exit
    ResetConfirm,
    Help,
}

/// Which rows an update request covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    Selected,
    All,
}

/// One tracked account and the balance typed for it
#[derive(Debug, Clone)]
pub struct AccountRow {
    pub account: Account,
    pub input: TextInput,
}

impl AccountRow {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            input: TextInput::new().placeholder("new balance"),
        }
    }
}

/// Adjustments computed and waiting for confirmation
#[derive(Debug, Clone)]
pub struct PendingBatch {
    pub items: Vec<BatchItem>,
    pub adjustments: Vec<AdjustmentTransaction>,
}

/// Check-box list state of the account selection dialog
#[derive(Debug, Clone, Default)]
pub struct AccountSelectState {
    pub index: usize,
    pub checked: Vec<bool>,
}

/// Main application state
pub struct App {
    pub paths: UpdaterPaths,
    pub settings: Settings,
    factory: ClientFactory,
    client: Option<Box<dyn BudgetApi>>,

    pub should_quit: bool,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,

    /// Tracked accounts in display order
    pub rows: Vec<AccountRow>,
    pub selected_index: usize,
    /// Every open account of the budget, for the net worth panel
    pub budget_accounts: Vec<Account>,

    pub notifications: NotificationQueue,
    pub pending: Option<PendingBatch>,

    pub api_key_input: TextInput,
    pub budget_select_index: usize,
    pub account_select: AccountSelectState,

    /// Printed once the terminal is restored
    pub exit_message: Option<String>,
}

impl App {
    pub fn new(paths: UpdaterPaths, settings: Settings, factory: ClientFactory) -> Self {
        Self {
            paths,
            settings,
            factory,
            client: None,
            should_quit: false,
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            rows: Vec::new(),
            selected_index: 0,
            budget_accounts: Vec::new(),
            notifications: NotificationQueue::new(),
            pending: None,
            api_key_input: new_api_key_input(),
            budget_select_index: 0,
            account_select: AccountSelectState::default(),
            exit_message: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn notify_error(&mut self, context: &str, err: &UpdaterError) {
        warn!("{}: {}", context, err);
        self.notify(Notification::error(format!("{}: {}", context, err)));
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
        self.input_mode = InputMode::Normal;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    /// Currency format of the active budget
    pub fn currency_format(&self) -> CurrencyFormat {
        self.settings
            .selected_budget()
            .map(|b| b.currency_format.clone())
            .unwrap_or_default()
    }

    pub fn budget_name(&self) -> Option<&str> {
        self.settings.selected_budget().ok().map(|b| b.name.as_str())
    }

    /// Sum of the known balances of all tracked accounts
    pub fn total_balance(&self) -> Milliunits {
        self.rows.iter().map(|r| r.account.balance).sum()
    }

    /// Net worth over all open accounts, with tracked rows at their latest balance
    pub fn net_worth(&self) -> NetWorth {
        let untracked = self
            .budget_accounts
            .iter()
            .filter(|a| !self.rows.iter().any(|r| r.account.id == a.id));
        NetWorth::from_accounts(self.rows.iter().map(|r| &r.account).chain(untracked))
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
        self.budget_accounts.clear();
        self.selected_index = 0;
    }

    pub fn selected_row_mut(&mut self) -> Option<&mut AccountRow> {
        self.rows.get_mut(self.selected_index)
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }

    pub fn start_editing(&mut self) {
        if let Some(row) = self.selected_row_mut() {
            row.input.move_end();
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&self.paths) {
            self.notify_error("Could not save settings", &e);
        }
    }

    fn ensure_client(&mut self) -> UpdaterResult<()> {
        if self.client.is_none() {
            self.client = Some(connect(&self.settings, &self.factory)?);
        }
        Ok(())
    }

    /// Walk the first-run setup until the account table can be shown
    ///
    /// Opens the dialog for the first missing piece: token, budget, then
    /// tracked accounts. With everything configured, loads the balances.
    pub fn next_setup_step(&mut self) {
        if self.settings.token().is_none() {
            self.open_api_key_dialog();
        } else if !self.settings.has_selected_budget() {
            self.open_budget_select();
        } else if !self.settings.has_selected_accounts() {
            self.open_account_select();
        } else {
            self.close_dialog();
            self.load_accounts();
        }
    }

    pub fn open_api_key_dialog(&mut self) {
        self.api_key_input = new_api_key_input();
        self.open_dialog(ActiveDialog::ApiKey);
    }

    /// Store the token typed in the API key dialog
    pub fn submit_api_key(&mut self) {
        let token = match ApiToken::new(self.api_key_input.value()) {
            Ok(token) => token,
            Err(e) => {
                self.notify(Notification::warning(e.to_string()));
                return;
            }
        };

        self.settings.set_token(token);
        self.client = None;
        self.save_settings();
        info!("API token updated from the terminal UI");
        self.notify(Notification::success("API token saved"));

        self.close_dialog();
        self.next_setup_step();
    }

    /// Fetch the budgets and let the user pick one
    pub fn open_budget_select(&mut self) {
        let budgets = self.ensure_client().and_then(|()| match self.client.as_deref() {
            Some(api) => api.list_budgets(),
            None => Err(UpdaterError::Tui("No client available".into())),
        });

        match budgets {
            Ok(budgets) if budgets.is_empty() => {
                self.notify(Notification::warning("This token has no budgets"));
            }
            Ok(budgets) => {
                self.settings.set_budgets_from_api(budgets);
                if !self.settings.has_selected_budget() {
                    self.clear_rows();
                }
                self.save_settings();
                self.budget_select_index = self
                    .settings
                    .budgets
                    .iter()
                    .position(|b| b.selected)
                    .unwrap_or(0);
                self.open_dialog(ActiveDialog::BudgetSelect);
            }
            Err(e) => {
                self.notify_error("Could not load budgets", &e);
                if e.is_config() || e.is_http() {
                    self.open_api_key_dialog();
                }
            }
        }
    }

    /// Make the highlighted budget the active one
    pub fn confirm_budget_select(&mut self) {
        let Some(id) = self
            .settings
            .budgets
            .get(self.budget_select_index)
            .map(|b| b.budget.id.clone())
        else {
            return;
        };

        match self.settings.select_budget(&id) {
            Ok(changed) => {
                if changed {
                    self.clear_rows();
                }
                self.save_settings();
                info!("Active budget is now {}", id);
                self.close_dialog();
                self.next_setup_step();
            }
            Err(e) => self.notify_error("Could not select budget", &e),
        }
    }

    /// Fetch the accounts of the active budget and let the user tick some
    pub fn open_account_select(&mut self) {
        let budget_id = match self.settings.selected_budget() {
            Ok(budget) => budget.id.clone(),
            Err(e) => {
                self.notify_error("Choose a budget first", &e);
                return;
            }
        };

        let accounts = self.ensure_client().and_then(|()| match self.client.as_deref() {
            Some(api) => api.list_accounts(&budget_id),
            None => Err(UpdaterError::Tui("No client available".into())),
        });

        match accounts {
            Ok(accounts) => {
                self.settings.add_accounts_from_api(&accounts);
                self.save_settings();
                self.account_select = AccountSelectState {
                    index: 0,
                    checked: self.settings.accounts.iter().map(|a| a.selected).collect(),
                };
                self.open_dialog(ActiveDialog::AccountSelect);
            }
            Err(e) => self.notify_error("Could not load accounts", &e),
        }
    }

    pub fn toggle_account_checked(&mut self) {
        if let Some(checked) = self.account_select.checked.get_mut(self.account_select.index) {
            *checked = !*checked;
        }
    }

    /// Track the ticked accounts
    pub fn confirm_account_select(&mut self) {
        let ids: Vec<AccountId> = self
            .settings
            .accounts
            .iter()
            .zip(&self.account_select.checked)
            .filter(|(_, checked)| **checked)
            .map(|(entry, _)| entry.id.clone())
            .collect();

        if ids.is_empty() {
            self.notify(Notification::warning("Select at least one account"));
            return;
        }

        match self.settings.set_account_selection(&ids) {
            Ok(()) => {
                self.save_settings();
                info!("Tracking {} account(s)", ids.len());
                self.close_dialog();
                self.load_accounts();
            }
            Err(e) => self.notify_error("Could not select accounts", &e),
        }
    }

    /// Reload balances of the tracked accounts, keeping typed balances
    ///
    /// Returns false when the accounts could not be fetched.
    pub fn load_accounts(&mut self) -> bool {
        let budget_id = match self.settings.selected_budget() {
            Ok(budget) => budget.id.clone(),
            Err(e) => {
                self.notify_error("Choose a budget first", &e);
                return false;
            }
        };

        let accounts = self.ensure_client().and_then(|()| match self.client.as_deref() {
            Some(api) => api.list_accounts(&budget_id),
            None => Err(UpdaterError::Tui("No client available".into())),
        });
        let accounts = match accounts {
            Ok(accounts) => accounts,
            Err(e) => {
                self.notify_error("Could not load accounts", &e);
                return false;
            }
        };

        self.settings.add_accounts_from_api(&accounts);
        self.save_settings();
        self.budget_accounts = accounts.clone();

        let previous = std::mem::take(&mut self.rows);
        self.rows = accounts
            .into_iter()
            .filter(|a| {
                self.settings
                    .account_by_id(&a.id)
                    .map(|entry| entry.selected)
                    .unwrap_or(false)
            })
            .map(|account| {
                let mut row = AccountRow::new(account);
                if let Some(old) = previous.iter().find(|r| r.account.id == row.account.id) {
                    row.input = old.input.clone();
                }
                row
            })
            .collect();

        if self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len().saturating_sub(1);
        }
        info!("Loaded {} tracked account(s)", self.rows.len());

        if self.rows.is_empty() {
            self.notify(Notification::warning(
                "No tracked accounts left in this budget (press 'a')",
            ));
        }
        true
    }

    pub fn refresh(&mut self) {
        if self.load_accounts() {
            self.notify(Notification::info("Balances refreshed"));
        }
    }

    /// Compute adjustments for the rows with a typed balance
    ///
    /// Invalid and unchanged rows are reported and cleared right away. If
    /// anything is left to post, the confirmation dialog opens.
    pub fn request_update(&mut self, scope: UpdateScope) {
        self.stop_editing();
        let format = self.currency_format();

        let indices: Vec<usize> = match scope {
            UpdateScope::Selected => vec![self.selected_index],
            UpdateScope::All => (0..self.rows.len()).collect(),
        };
        let entries: Vec<(usize, String)> = indices
            .into_iter()
            .filter_map(|i| self.rows.get(i).map(|row| (i, row)))
            .filter(|(_, row)| !row.input.is_empty())
            .map(|(i, row)| (i, format.normalize_input(row.input.value())))
            .collect();

        if entries.is_empty() {
            let message = match scope {
                UpdateScope::Selected => "Enter a new balance first (Enter or i)",
                UpdateScope::All => "No new balances entered",
            };
            self.notify(Notification::warning(message));
            return;
        }

        let engine = ReconciliationEngine::new(self.settings.adjustment_marker());
        let pairs: Vec<(&Account, &str)> = entries
            .iter()
            .map(|(i, balance)| (&self.rows[*i].account, balance.as_str()))
            .collect();
        let items = engine.compute_batch(&pairs);

        for ((row_index, _), item) in entries.iter().zip(&items) {
            if let Err(e) = &item.outcome {
                warn!("Rejected balance for {}: {}", item.account_name, e);
                self.notify(Notification::error(format!("{}: {}", item.account_name, e)));
                self.rows[*row_index].input.clear();
            } else if item.is_unchanged() {
                self.notify(Notification::info(format!(
                    "{}: balance unchanged",
                    item.account_name
                )));
                self.rows[*row_index].input.clear();
            }
        }

        let adjustments = pending_adjustments(&items);
        if adjustments.is_empty() {
            let report = SyncReport::new(&items, &[]);
            if !report.is_success() {
                self.notify(Notification::warning(report.to_string()));
            }
            return;
        }

        self.pending = Some(PendingBatch { items, adjustments });
        self.open_dialog(ActiveDialog::Confirm);
    }

    /// Text of the confirmation dialog for the pending batch
    pub fn confirm_message(&self) -> String {
        let Some(pending) = &self.pending else {
            return String::new();
        };
        let format = self.currency_format();

        let with_adjustment: Vec<&BatchItem> = pending
            .items
            .iter()
            .filter(|item| item.adjustment().is_some())
            .collect();

        match with_adjustment.as_slice() {
            [item] => match (item.adjustment(), item.new_balance()) {
                (Some(tx), Some(new_balance)) => {
                    single_adjustment_prompt(&item.account_name, tx.amount, new_balance, &format)
                }
                _ => String::new(),
            },
            items => {
                let owned: Vec<BatchItem> = items.iter().map(|item| (*item).clone()).collect();
                format!(
                    "Create {} adjustments?\n{}",
                    owned.len(),
                    format_adjustment_plan(&owned, &format)
                )
            }
        }
    }

    /// Post the pending batch
    pub fn confirm_pending(&mut self) {
        self.close_dialog();
        let Some(pending) = self.pending.take() else {
            return;
        };

        let budget_id = match self.settings.selected_budget() {
            Ok(budget) => budget.id.clone(),
            Err(e) => {
                self.notify_error("Nothing posted", &e);
                return;
            }
        };
        if let Err(e) = self.ensure_client() {
            self.notify_error("Nothing posted", &e);
            return;
        }
        let outcomes = match self.client.as_deref() {
            Some(api) => SyncService::new(api, budget_id.clone()).post(&pending.adjustments),
            None => return,
        };

        let report = SyncReport::new(&pending.items, &outcomes);
        info!("Balance update finished: {}", report);

        for row in &mut self.rows {
            if let Some(balance) = report.new_balance_of(&row.account.id) {
                row.account.balance = balance;
                row.input.clear();
            }
        }

        for (name, message) in &report.post_failures {
            self.notify(Notification::error(format!("{} not updated: {}", name, message)));
        }

        let failed: Vec<AccountId> = outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.account_id.clone())
            .collect();
        for account_id in &failed {
            self.reload_account(&budget_id, account_id);
        }

        let summary = report.to_string();
        if report.is_success() {
            self.notify(Notification::success(summary));
        } else {
            self.notify(Notification::warning(summary));
        }
    }

    /// Re-read one row's balance, since a failed request may still have landed
    fn reload_account(&mut self, budget_id: &BudgetId, account_id: &AccountId) {
        let fetched = match self.client.as_deref() {
            Some(api) => api.get_account(budget_id, account_id),
            None => return,
        };
        match fetched {
            Ok(Some(account)) => {
                if let Some(row) = self.rows.iter_mut().find(|r| &r.account.id == account_id) {
                    row.account.balance = account.balance;
                }
            }
            Ok(None) => {
                warn!("Account {} no longer exists in the budget", account_id);
                self.notify(Notification::warning(format!(
                    "Account {} no longer exists in YNAB (press 'r')",
                    account_id
                )));
            }
            Err(e) => self.notify_error("Could not reload balance", &e),
        }
    }

    pub fn request_reset(&mut self) {
        self.open_dialog(ActiveDialog::ResetConfirm);
    }

    /// Delete the configuration file and quit
    ///
    /// Stays open when the file cannot be deleted.
    pub fn confirm_reset(&mut self) {
        self.close_dialog();
        match Settings::reset(&self.paths) {
            Ok(existed) => {
                info!("Configuration reset from the terminal UI");
                self.exit_message = Some(if existed {
                    "Configuration reset. Exiting.".to_string()
                } else {
                    "No configuration file to reset. Exiting.".to_string()
                });
                self.settings = Settings::default();
                self.client = None;
                self.quit();
            }
            Err(e) => self.notify_error("Could not reset configuration", &e),
        }
    }

    pub fn cancel_reset(&mut self) {
        self.close_dialog();
        self.notify(Notification::warning("Configuration reset cancelled"));
    }

    /// Drop the pending batch without posting anything
    pub fn discard_pending(&mut self) {
        self.close_dialog();
        if let Some(pending) = self.pending.take() {
            warn!("Declined {} adjustment(s)", pending.adjustments.len());
            self.notify(Notification::info("Update cancelled, nothing posted"));
        }
    }
}

fn new_api_key_input() -> TextInput {
    TextInput::new()
        .label("Token")
        .placeholder("paste your personal access token")
        .masked(true)
        .focused(true)
}
