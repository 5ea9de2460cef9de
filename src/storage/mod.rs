//! Storage helpers for YNAB Updater
//!
//! The only file this tool owns is its JSON configuration.

pub mod file_io;

pub use file_io::{read_json, remove_file, write_json_atomic};
