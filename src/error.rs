//! Error type for the roster library. The TUI wraps these in `anyhow` and
//! shows them in the footer; nothing here is fatal.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    /// Import was attempted with empty or whitespace-only text.
    #[error("Paste CSV text first")]
    EmptyImport,

    /// A new student was submitted with a blank name.
    #[error("Student name is required.")]
    EmptyName,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type RosterResult<T> = Result<T, RosterError>;
