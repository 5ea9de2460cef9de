//! Terminal User Interface
//!
//! An account table where new balances are typed, plus the dialogs that
//! walk through first-run setup and confirm adjustments before posting.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
