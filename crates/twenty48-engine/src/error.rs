//! Error types for the game session.

use std::fmt;

/// Recoverable failures reported back to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// `load` was requested before anything was saved.
    EmptySnapshot,
    /// Text that does not name a command.
    UnknownCommand(String),
    /// Win threshold that no tile can reach exactly.
    InvalidWinTile(u32),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptySnapshot => write!(f, "no saved game found"),
            GameError::UnknownCommand(text) => write!(f, "unknown command: {text:?}"),
            GameError::InvalidWinTile(v) => {
                write!(f, "win tile must be a power of two >= 8, got {v}")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
