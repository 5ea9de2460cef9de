//! Net worth panel
//!
//! Net worth of the whole budget, the weight of each category, then the
//! accounts of each category.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{CurrencyFormat, Milliunits};
use crate::services::{NetWorth, NetWorthCategory};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Net Worth ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let net_worth = app.net_worth();
    if net_worth.is_empty() {
        let text = Paragraph::new("No accounts loaded")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let lines = panel_lines(&net_worth, &app.currency_format(), width);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn panel_lines(net_worth: &NetWorth, format: &CurrencyFormat, width: usize) -> Vec<Line<'static>> {
    let total = net_worth.total();
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Total "),
            Span::styled(
                format.format(total),
                Style::default()
                    .fg(balance_color(total))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    for category in net_worth.categories() {
        let label = format!("{:<8}{:>6.1}%", category.category.label(), category.weight * 100.0);
        lines.push(aligned(
            label,
            format.format(category.balance),
            category_color(category.category),
            width,
        ));
    }

    let mut current = None;
    for entry in net_worth.entries() {
        if current != Some(entry.category) {
            current = Some(entry.category);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                entry.category.label(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(aligned(
            format!(" {}", entry.name),
            format.format(entry.balance),
            balance_color(entry.balance),
            width,
        ));
    }

    lines
}

/// Label on the left, amount flush right
fn aligned(label: String, amount: String, color: Color, width: usize) -> Line<'static> {
    let room = width.saturating_sub(amount.chars().count() + 1);
    let label: String = label.chars().take(room).collect();
    let padding = width.saturating_sub(label.chars().count() + amount.chars().count());
    Line::from(vec![
        Span::raw(label),
        Span::raw(" ".repeat(padding)),
        Span::styled(amount, Style::default().fg(color)),
    ])
}

fn category_color(category: NetWorthCategory) -> Color {
    match category {
        NetWorthCategory::Debt => Color::Red,
        _ => Color::Green,
    }
}

fn balance_color(amount: Milliunits) -> Color {
    if amount.is_negative() {
        Color::Red
    } else {
        Color::Green
    }
}
