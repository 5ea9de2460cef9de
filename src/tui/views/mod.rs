//! TUI views
//!
//! The account table with the net worth panel beside it, the header and the
//! status bar, with the active dialog drawn on top.

pub mod account_list;
pub mod net_worth;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, App, InputMode};
use super::dialogs;
use super::layout::AppLayout;

const RESET_PROMPT: &str = "Reset configuration and exit?\n\n\
    The saved API token and every selection are deleted.";

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);
    account_list::render(frame, app, layout.accounts);
    net_worth::render(frame, app, layout.net_worth);
    status_bar::render(frame, app, layout.status_bar);

    match app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::Confirm => dialogs::confirm::render(
            frame,
            "Confirm",
            &app.confirm_message(),
            &dialogs::confirm::POST_OR_DISCARD,
        ),
        ActiveDialog::ResetConfirm => dialogs::confirm::render(
            frame,
            "Reset Configuration",
            RESET_PROMPT,
            &dialogs::confirm::RESET_OR_KEEP,
        ),
        ActiveDialog::ApiKey => dialogs::api_key::render(frame, app),
        ActiveDialog::BudgetSelect => dialogs::budget_select::render(frame, app),
        ActiveDialog::AccountSelect => dialogs::account_select::render(frame, app),
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" YNAB Updater ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let hint = match app.input_mode {
        InputMode::Editing => "Type the balance, Enter or Esc when done",
        InputMode::Normal => "Enter a new balance, then u (this account) or U (all)",
    };
    let line = Line::from(vec![
        Span::styled(
            app.budget_name().unwrap_or("No budget selected"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
