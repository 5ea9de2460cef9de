//! Status bar
//!
//! Budget name, total of the tracked balances, the latest notification and
//! key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let format = app.currency_format();
    let total = app.total_balance();

    let mut spans = vec![];

    if let Some(name) = app.budget_name() {
        spans.push(Span::styled(format!(" {}", name), Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(" │ "));
    }

    spans.push(Span::styled("Total: ", Style::default().fg(Color::White)));
    let total_color = if total.is_negative() {
        Color::Red
    } else {
        Color::Green
    };
    spans.push(Span::styled(
        format.format(total),
        Style::default().fg(total_color).add_modifier(Modifier::BOLD),
    ));

    if let Some(notification) = app.notifications.current() {
        let color = notification.notification_type.color();
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("[{}] {}", notification.notification_type.icon(), notification.message),
            Style::default().fg(color),
        ));
    }

    let hints = " q:Quit  ?:Help ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    if padding_len > 0 {
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(hints, Style::default().fg(Color::White)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
