//! Request and response bodies.

use serde::{Deserialize, Serialize};
use strictly_mastermind::{Code, Difficulty, Digit, GameId, GameStatus, GuessResult};

/// Query string for `POST /games`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGameQuery {
    /// `easy`, `medium` or `hard`; medium when absent.
    pub difficulty: Option<String>,
}

/// Response to `POST /games`. The secret is never returned here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    /// New game identifier.
    pub game_id: GameId,
    /// Guesses available.
    pub attempts_left: u32,
    /// Always `in_progress`.
    pub status: GameStatus,
    /// Chosen difficulty.
    pub difficulty: Difficulty,
}

/// Body of `POST /games/{id}/guess`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    /// Digits in order; the length depends on the game's difficulty.
    pub guess: Vec<i64>,
}

impl GuessRequest {
    /// Narrows the raw integers to digits.
    ///
    /// Values that cannot be a digit at all are reported here; the game
    /// checks them against its own alphabet.
    pub fn into_code(self) -> Result<Code, String> {
        self.guess
            .into_iter()
            .map(|v| Digit::try_from(v).map_err(|_| format!("Digit {} is out of range.", v)))
            .collect()
    }
}

/// Response to a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    /// Guesses remaining.
    pub attempts_left: u32,
    /// Status after this guess.
    pub status: GameStatus,
    /// Feedback for this guess.
    pub feedback: GuessResult,
    /// The secret, only when the game just ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<Code>,
    /// Closing note, only when the game just ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Response to `GET /games/{id}/hint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResponse {
    /// Zero-based index into the secret.
    pub position: usize,
    /// Secret digit at that index.
    pub digit: Digit,
    /// Guesses remaining.
    pub attempts_left: u32,
    /// Reminder that the hint is spent.
    pub note: String,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}
