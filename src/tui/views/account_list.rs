//! Account table
//!
//! Name, current balance and the new balance typed by the user

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{CurrencyFormat, Milliunits};
use crate::tui::app::{AccountRow, App, InputMode};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let block = Block::default()
        .title(" Accounts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Cyan } else { Color::White }));

    if app.rows.is_empty() {
        let text = Paragraph::new("No tracked accounts. Press 'a' to choose some, '?' for help.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let format = app.currency_format();

    let widths = [
        Constraint::Min(20),    // Name
        Constraint::Length(18), // Balance
        Constraint::Length(20), // New balance
    ];

    let header = Row::new(vec![
        Cell::from("Account").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Balance").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("New balance").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let editing_row = editing && i == app.selected_index;
            account_row(row, &format, editing_row)
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn balance_style(balance: Milliunits) -> Style {
    if balance.is_negative() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn account_row<'a>(row: &'a AccountRow, format: &CurrencyFormat, editing: bool) -> Row<'a> {
    let input_cell = if editing {
        Cell::from(input_with_cursor(row)).style(Style::default().fg(Color::Black).bg(Color::Cyan))
    } else if row.input.is_empty() {
        Cell::from("-").style(Style::default().fg(Color::DarkGray))
    } else {
        Cell::from(row.input.value()).style(Style::default().fg(Color::White))
    };

    Row::new(vec![
        Cell::from(row.account.name.as_str()),
        Cell::from(format.format(row.account.balance)).style(balance_style(row.account.balance)),
        input_cell,
    ])
}

/// Input text with a `|` at the cursor
fn input_with_cursor(row: &AccountRow) -> String {
    let mut text: String = row.input.value().chars().take(row.input.cursor()).collect();
    text.push('|');
    text.extend(row.input.value().chars().skip(row.input.cursor()));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    #[test]
    fn test_cursor_marker() {
        let mut row = AccountRow::new(Account::new("a", "Brokerage", Milliunits::zero()));
        row.input.set_value("175");
        assert_eq!(input_with_cursor(&row), "175|");
        row.input.move_left();
        assert_eq!(input_with_cursor(&row), "17|5");
    }
}
