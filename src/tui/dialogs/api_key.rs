//! API token dialog

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(64, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" YNAB API Token ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let intro = Paragraph::new(vec![
        Line::from("Create a personal access token under"),
        Line::from(Span::styled(
            "Account Settings > Developer Settings",
            Style::default().fg(Color::Yellow),
        )),
    ])
    .wrap(Wrap { trim: false });
    frame.render_widget(intro, chunks[0]);

    frame.render_widget(app.api_key_input.clone(), chunks[1]);

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}
