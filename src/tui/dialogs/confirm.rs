//! Confirmation dialog
//!
//! Shows a question, such as the pending adjustments, and waits for yes or no

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;

/// Labels of the yes and no answers
pub struct Answers {
    pub yes: &'static str,
    pub no: &'static str,
}

pub const POST_OR_DISCARD: Answers = Answers {
    yes: "Post",
    no: "Discard",
};

pub const RESET_OR_KEEP: Answers = Answers {
    yes: "Reset & Exit",
    no: "Keep",
};

/// Render a confirmation dialog for a (possibly multi-line) message
pub fn render(frame: &mut Frame, title: &str, message: &str, answers: &Answers) {
    let message_lines: Vec<&str> = message.lines().collect();
    let height = (message_lines.len() as u16).saturating_add(6);
    let area = centered_rect_fixed(70, height, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = vec![Line::from("")];
    lines.extend(
        message_lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::White)))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Y]", Style::default().fg(Color::Green)),
        Span::raw(format!(" {}  ", answers.yes)),
        Span::styled("[N]", Style::default().fg(Color::Red)),
        Span::raw(format!(" {}  ", answers.no)),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
