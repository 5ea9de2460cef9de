//! Terminal events
//!
//! A background thread polls crossterm and forwards key presses, resizes
//! and periodic ticks over a channel to the event loop.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use log::error;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Terminal events
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Periodic tick, used to expire notifications
    Tick,
}

/// Receives terminal events from the polling thread
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Start polling with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || poll_loop(&sender, tick_rate));
        Self { receiver }
    }

    /// Block until the next event
    ///
    /// Fails once the polling thread has stopped.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

/// Runs until the receiver is dropped or the terminal cannot be read
fn poll_loop(sender: &mpsc::Sender<Event>, tick_rate: Duration) {
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        match event::poll(timeout) {
            Ok(true) => {
                let forwarded = match event::read() {
                    // Windows also reports key releases
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    Ok(CrosstermEvent::Resize(width, height)) => {
                        Some(Event::Resize(width, height))
                    }
                    Ok(_) => None,
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        return;
                    }
                };
                if let Some(event) = forwarded {
                    if sender.send(event).is_err() {
                        return;
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                error!("Failed to poll terminal events: {}", e);
                return;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if sender.send(Event::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}
