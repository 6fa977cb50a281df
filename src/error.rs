//! Terminal operation errors.

use std::io;

/// Errors that can occur while driving the terminal.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("Standard input is not a terminal")]
    NotATerminal,

    #[error("Terminal is not in raw mode")]
    NotInRawMode,

    #[error("Failed to restore terminal mode: {0}")]
    RestoreFailed(#[source] io::Error),

    #[error("Malformed terminal input: {0}")]
    MalformedInput(String),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for terminal operations.
pub type Result<T> = std::result::Result<T, TermError>;
