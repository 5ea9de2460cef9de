//! Help dialog
//!
//! Keyboard shortcuts of the account table

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect;

pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines())
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        heading("Accounts"),
        Line::from(""),
        key_line("j/k", "Move selection down/up"),
        key_line("Enter/i", "Type a new balance"),
        key_line("0-9, -", "Start typing a new balance"),
        key_line("Esc", "Stop typing"),
        key_line("u", "Update the selected account"),
        key_line("U", "Update every account with a new balance"),
        key_line("r", "Refresh balances from YNAB"),
        Line::from(""),
        heading("Setup"),
        Line::from(""),
        key_line("b", "Choose budget"),
        key_line("a", "Choose accounts"),
        key_line("t", "Change API token"),
        key_line("F10", "Reset configuration and exit"),
        Line::from(""),
        key_line("?", "Show this help"),
        key_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )]),
    ]
}

fn heading(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
