//! Error taxonomy for game operations.
//!
//! All variants are expected, recoverable conditions. None of them leaves a
//! game partially mutated.

use crate::types::{GameId, GameStatus};

/// Why an operation conflicts with the current game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ConflictReason {
    /// The game already reached a terminal status.
    #[display("Game {}. No more guesses allowed.", _0)]
    GameFinished(GameStatus),

    /// A hint was requested after the game ended.
    #[display("Game finished. No hint available.")]
    HintAfterFinish,

    /// The one hint for this game was already revealed.
    #[display("Hint already used for this game.")]
    HintAlreadyUsed,
}

/// Error returned by game, store and stats operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The guess was malformed: wrong length or a digit outside the alphabet.
    #[display("{}", _0)]
    Validation(String),

    /// No game exists with this identifier.
    #[display("Game {} not found", _0)]
    NotFound(GameId),

    /// The action is not allowed in the game's current state.
    #[display("{}", _0)]
    Conflict(ConflictReason),
}

impl std::error::Error for GameError {}

impl GameError {
    /// Builds a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
