//! Event handler for the TUI
//!
//! Routes keyboard events to the open dialog, or to the account table
//! depending on the input mode.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App, InputMode, UpdateScope};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.notifications.remove_expired();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

/// Keys on the account table
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Home | KeyCode::Char('g') => app.selected_index = 0,
        KeyCode::End | KeyCode::Char('G') => {
            app.selected_index = app.rows.len().saturating_sub(1);
        }

        KeyCode::Enter | KeyCode::Char('i') => app.start_editing(),
        KeyCode::Char('u') => app.request_update(UpdateScope::Selected),
        KeyCode::Char('U') => app.request_update(UpdateScope::All),
        KeyCode::Char('r') => app.refresh(),

        KeyCode::Char('b') => app.open_budget_select(),
        KeyCode::Char('a') => app.open_account_select(),
        KeyCode::Char('t') => app.open_api_key_dialog(),
        KeyCode::F(10) => app.request_reset(),

        // Start typing a balance straight away
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if let Some(row) = app.selected_row_mut() {
                row.input.clear();
                row.input.insert(c);
                app.input_mode = InputMode::Editing;
            }
        }

        _ => {}
    }
    Ok(())
}

/// Keys while typing a balance into the selected row
fn handle_editing_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => app.stop_editing(),
        KeyCode::Down => {
            app.stop_editing();
            app.move_down();
        }
        KeyCode::Up => {
            app.stop_editing();
            app.move_up();
        }
        code => {
            if let Some(row) = app.selected_row_mut() {
                match code {
                    KeyCode::Char(c) => row.input.insert(c),
                    KeyCode::Backspace => row.input.backspace(),
                    KeyCode::Delete => row.input.delete(),
                    KeyCode::Left => row.input.move_left(),
                    KeyCode::Right => row.input.move_right(),
                    KeyCode::Home => row.input.move_start(),
                    KeyCode::End => row.input.move_end(),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_dialog {
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::Confirm => handle_confirm_key(app, key),
        ActiveDialog::ResetConfirm => handle_reset_key(app, key),
        ActiveDialog::ApiKey => handle_api_key_key(app, key),
        ActiveDialog::BudgetSelect => handle_budget_select_key(app, key),
        ActiveDialog::AccountSelect => handle_account_select_key(app, key),
        ActiveDialog::None => {}
    }
    Ok(())
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.discard_pending(),
        _ => {}
    }
}

fn handle_reset_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_reset(),
        _ => {}
    }
}

/// Leaving a setup dialog with its setting still missing ends the session
fn leave_setup_dialog(app: &mut App, still_missing: bool) {
    if still_missing {
        app.quit();
    } else {
        app.close_dialog();
    }
}

fn handle_api_key_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_api_key(),
        KeyCode::Esc => {
            let missing = app.settings.token().is_none();
            leave_setup_dialog(app, missing);
        }
        code => {
            let input = &mut app.api_key_input;
            match code {
                KeyCode::Char(c) => input.insert(c),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_start(),
                KeyCode::End => input.move_end(),
                _ => {}
            }
        }
    }
}

fn handle_budget_select_key(app: &mut App, key: KeyEvent) {
    let count = app.settings.budgets.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.budget_select_index + 1 < count {
                app.budget_select_index += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.budget_select_index = app.budget_select_index.saturating_sub(1);
        }
        KeyCode::Enter => app.confirm_budget_select(),
        KeyCode::Esc => {
            let missing = !app.settings.has_selected_budget();
            leave_setup_dialog(app, missing);
        }
        _ => {}
    }
}

fn handle_account_select_key(app: &mut App, key: KeyEvent) {
    let count = app.account_select.checked.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.account_select.index + 1 < count {
                app.account_select.index += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.account_select.index = app.account_select.index.saturating_sub(1);
        }
        KeyCode::Char(' ') => app.toggle_account_checked(),
        KeyCode::Enter => app.confirm_account_select(),
        KeyCode::Esc => {
            let missing = !app.settings.has_selected_accounts();
            leave_setup_dialog(app, missing);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBudgetApi;
    use crate::config::{ApiToken, Settings, UpdaterPaths};
    use crate::models::{Account, AccountId, BudgetId, BudgetSummary, Milliunits};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, key(code)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn ready_app() -> (TempDir, MockBudgetApi, App) {
        let api = MockBudgetApi::new().with_budget(
            BudgetSummary::new("b-1", "Household"),
            vec![
                Account::new("a-1", "Brokerage", Milliunits::new(150_000)),
                Account::new("a-2", "House", Milliunits::new(200_000)),
            ],
        );
        let temp_dir = TempDir::new().unwrap();
        let paths = UpdaterPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set_token(ApiToken::new("tok").unwrap());
        settings.set_budgets_from_api(vec![BudgetSummary::new("b-1", "Household")]);
        settings.select_budget(&BudgetId::new("b-1")).unwrap();
        settings.add_accounts_from_api(&[
            Account::new("a-1", "Brokerage", Milliunits::zero()),
            Account::new("a-2", "House", Milliunits::zero()),
        ]);
        settings
            .set_account_selection(&[AccountId::new("a-1"), AccountId::new("a-2")])
            .unwrap();

        let mut app = App::new(paths, settings, api.factory());
        app.next_setup_step();
        (temp_dir, api, app)
    }

    #[test]
    fn test_quit_keys() {
        let (_dir, _api, mut app) = ready_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let (_dir, _api, mut app) = ready_app();
        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        )
        .unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_type_balance_and_confirm() {
        let (_dir, api, mut app) = ready_app();

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Editing);
        type_text(&mut app, "180");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.rows[1].input.value(), "180");

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.active_dialog, ActiveDialog::Confirm);

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(api.posted().len(), 1);
        assert_eq!(api.posted()[0].1.amount, Milliunits::new(-20_000));
        assert_eq!(app.rows[1].account.balance, Milliunits::new(180_000));
    }

    #[test]
    fn test_digit_starts_editing() {
        let (_dir, _api, mut app) = ready_app();
        type_text(&mut app, "175.5");
        assert_eq!(app.input_mode, InputMode::Editing);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.rows[0].input.value(), "175.");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_escape_declines_batch() {
        let (_dir, api, mut app) = ready_app();
        type_text(&mut app, "1");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('U'));
        assert_eq!(app.active_dialog, ActiveDialog::Confirm);

        press(&mut app, KeyCode::Esc);
        assert!(!app.has_dialog());
        assert!(api.posted().is_empty());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let (_dir, _api, mut app) = ready_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.active_dialog, ActiveDialog::Help);
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.has_dialog());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_token_dialog_keys() {
        let (_dir, api, mut app) = ready_app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.active_dialog, ActiveDialog::ApiKey);

        type_text(&mut app, "new-tokenx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.api_key_input.value(), "new-token");

        // A token is already stored, so escape only closes the dialog
        press(&mut app, KeyCode::Esc);
        assert!(!app.has_dialog());
        assert!(!app.should_quit);
        assert_eq!(app.settings.token().map(|t| t.expose()), Some("tok"));
        assert_eq!(api.state.borrow().tokens_seen, vec!["tok".to_string()]);
    }

    #[test]
    fn test_escape_from_first_run_quits() {
        let api = MockBudgetApi::new();
        let temp_dir = TempDir::new().unwrap();
        let paths = UpdaterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut app = App::new(paths, Settings::default(), api.factory());
        app.next_setup_step();

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_account_select_toggles() {
        let (_dir, _api, mut app) = ready_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.active_dialog, ActiveDialog::AccountSelect);
        assert_eq!(app.account_select.checked, vec![true, true]);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        assert!(!app.has_dialog());
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].account.name, "House");
    }

    #[test]
    fn test_f10_resets_after_confirmation() {
        let (_dir, _api, mut app) = ready_app();
        assert!(app.paths.settings_file().exists());

        press(&mut app, KeyCode::F(10));
        assert_eq!(app.active_dialog, ActiveDialog::ResetConfirm);
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit);
        assert!(app.paths.settings_file().exists());

        press(&mut app, KeyCode::F(10));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
        assert!(!app.paths.settings_file().exists());
    }
}
