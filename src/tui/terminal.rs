//! Terminal setup and teardown
//!
//! The panic hook restores the terminal before the panic message is printed.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::api::ClientFactory;
use crate::config::{Settings, UpdaterPaths};

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI until the user quits
pub fn run_tui(paths: UpdaterPaths, settings: Settings, factory: ClientFactory) -> Result<()> {
    let mut terminal = init_terminal()?;
    info!("Starting terminal UI");

    let mut app = App::new(paths, settings, factory);
    let result = event_loop(&mut terminal, &mut app);

    restore_terminal()?;
    info!("Terminal UI closed");
    if let Some(message) = app.exit_message.take() {
        println!("{}", message);
    }
    result
}

fn event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let events = EventHandler::default();

    // Draw once so the screen is not blank while the first requests run
    terminal.draw(|frame| super::views::render(frame, app))?;
    app.next_setup_step();

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, app))?;

        handle_event(app, events.next()?)?;
    }

    Ok(())
}
