use thiserror::Error;

use crate::Coord;

/// Errors reported by the engine. The `Display` text is meant for the player.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid input. Use: row col (0-{max})")]
    InvalidCommand { max: Coord },
    #[error("Out of bounds. Rows/cols are 0 to {max}.")]
    OutOfBounds { max: Coord },
    #[error("Already revealed.")]
    AlreadyRevealed,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
