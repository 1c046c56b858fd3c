//! Error types for game module
//!
//! Every failure here is scoped to a single move attempt. The controller
//! leaves the position untouched for all of them and re-opens the input gate
//! where it had closed it.

use super::controller::PlayState;
use super::opponent::OpponentError;

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Notation that is not a legal move in the current position
    #[error("Invalid move: {notation}")]
    IllegalMove { notation: String },

    /// A move or request arrived while the input gate was closed
    #[error("Board is not accepting input while {state:?}")]
    NotAcceptingInput { state: PlayState },

    /// The human tried to move for the bot's side
    #[error("It is the opponent's turn")]
    NotYourTurn,

    /// An opponent operation on a board without an opponent
    #[error("No opponent is attached to this board")]
    NoOpponent,

    /// A response for a request that is no longer outstanding
    #[error("Discarded stale opponent response for ticket {ticket}")]
    StaleResponse { ticket: u64 },

    /// The bot failed to produce a usable move
    #[error(transparent)]
    Opponent(#[from] OpponentError),

    /// A position string that does not describe a legal position
    #[error("Invalid position '{fen}': {message}")]
    InvalidPosition { fen: String, message: String },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
