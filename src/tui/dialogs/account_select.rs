//! Account selection dialog
//!
//! Check-box list of the open accounts of the active budget

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect;

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Accounts to Update ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(Line::from(" Space: toggle  Enter: save  Esc: cancel "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = app
        .settings
        .accounts
        .iter()
        .zip(&app.account_select.checked)
        .map(|(entry, checked)| {
            let (box_text, box_color) = if *checked {
                ("[x] ", Color::Green)
            } else {
                ("[ ] ", Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(box_text, Style::default().fg(box_color)),
                Span::raw(entry.name.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.account_select.index));

    frame.render_stateful_widget(list, area, &mut state);
}
