//! Strictly Mastermind - pure code-breaking game logic
//!
//! No I/O and no shared state: the server crate owns concurrency.
//!
//! # Architecture
//!
//! - **Secret**: random codes drawn from a difficulty preset
//! - **Scoring**: duplicate-aware feedback for a guess
//! - **Game**: per-game state machine (attempts, history, hint, status)
//!
//! # Example
//!
//! ```
//! use strictly_mastermind::{Difficulty, Game, GameId, GameStatus, Presets};
//!
//! let presets = Presets::default();
//! let preset = *presets.get(Difficulty::Medium);
//! let mut game = Game::new(GameId::generate(), Difficulty::Medium, preset, vec![1, 2, 3, 4])
//!     .expect("secret fits preset");
//!
//! let result = game.submit_guess(vec![4, 3, 2, 1]).expect("valid guess");
//! assert_eq!(*result.correct_numbers(), 4);
//! assert_eq!(*result.correct_positions(), 0);
//!
//! game.submit_guess(vec![1, 2, 3, 4]).expect("valid guess");
//! assert_eq!(game.status(), GameStatus::Won);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod scoring;
mod secret;
mod types;

pub use error::{ConflictReason, GameError};
pub use game::{Game, GameSnapshot};
pub use scoring::{Feedback, score};
pub use secret::{generate_secret, generate_secret_with};
pub use types::{
    ALPHABET_RANGE, Code, DEFAULT_ALPHABET, Difficulty, DifficultyPreset, Digit, GameId, GameStatus, GuessResult,
    Hint, Presets,
};
