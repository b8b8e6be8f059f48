//! Core domain types for Mastermind.

use crate::error::GameError;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString};
use uuid::Uuid;

/// A single symbol of a code. Valid values are `0..alphabet`.
pub type Digit = u8;

/// An ordered sequence of digits (a secret or a guess).
pub type Code = Vec<Digit>;

/// Difficulty level chosen when a game starts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Short code, generous attempts.
    #[display("easy")]
    Easy,
    /// The classic four-digit game.
    #[default]
    #[display("medium")]
    Medium,
    /// Long code.
    #[display("hard")]
    Hard,
}

/// Shape of a game at a given difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    /// Number of digits in the secret and in every guess.
    pub length: usize,
    /// Guesses allowed before the game is lost.
    pub max_attempts: u32,
    /// Count of allowed symbols; digits are drawn from `0..alphabet`.
    #[serde(default = "default_alphabet")]
    pub alphabet: u8,
}

/// Digits 0 through 7.
pub const DEFAULT_ALPHABET: u8 = 8;

/// Smallest and largest alphabet a preset may use.
pub const ALPHABET_RANGE: std::ops::RangeInclusive<u8> = 2..=10;

fn default_alphabet() -> u8 {
    DEFAULT_ALPHABET
}

impl DifficultyPreset {
    /// Creates a preset with the default 0-7 alphabet.
    pub const fn new(length: usize, max_attempts: u32) -> Self {
        Self {
            length,
            max_attempts,
            alphabet: DEFAULT_ALPHABET,
        }
    }

    /// Returns true if the digit belongs to this preset's alphabet.
    pub fn contains(&self, digit: Digit) -> bool {
        digit < self.alphabet
    }

    /// Largest digit a player may submit.
    pub fn max_digit(&self) -> Digit {
        self.alphabet.saturating_sub(1)
    }

    /// Checks the preset describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Validation`] if the length or attempt budget is
    /// zero, or the alphabet lies outside [`ALPHABET_RANGE`].
    pub fn validate(&self) -> Result<(), GameError> {
        if self.length == 0 {
            return Err(GameError::validation("length must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(GameError::validation("max_attempts must be at least 1"));
        }
        if !ALPHABET_RANGE.contains(&self.alphabet) {
            return Err(GameError::validation(format!(
                "alphabet must be between {} and {}",
                ALPHABET_RANGE.start(),
                ALPHABET_RANGE.end()
            )));
        }
        Ok(())
    }
}

/// Preset table, one entry per [`Difficulty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    /// Easy preset (3 digits, 8 attempts by default).
    pub easy: DifficultyPreset,
    /// Medium preset (4 digits, 10 attempts by default).
    pub medium: DifficultyPreset,
    /// Hard preset (5 digits, 12 attempts by default).
    pub hard: DifficultyPreset,
}

impl Presets {
    /// Looks up the preset for a difficulty.
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyPreset {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            easy: DifficultyPreset::new(3, 8),
            medium: DifficultyPreset::new(4, 10),
            hard: DifficultyPreset::new(5, 12),
        }
    }
}

/// Lifecycle status of a game. `Won` and `Lost` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Guesses and the hint are still accepted.
    #[display("in_progress")]
    InProgress,
    /// The secret was guessed.
    #[display("won")]
    Won,
    /// Attempts ran out.
    #[display("lost")]
    Lost,
}

impl GameStatus {
    /// Returns true for `Won` and `Lost`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// One accepted guess and the feedback it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GuessResult {
    guess: Code,
    correct_numbers: usize,
    correct_positions: usize,
    message: String,
    timestamp: DateTime<Utc>,
}

impl GuessResult {
    pub(crate) fn new(
        guess: Code,
        correct_numbers: usize,
        correct_positions: usize,
        message: String,
    ) -> Self {
        Self {
            guess,
            correct_numbers,
            correct_positions,
            message,
            timestamp: Utc::now(),
        }
    }
}

/// A revealed secret position and the digit stored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Zero-based index into the secret.
    pub position: usize,
    /// The secret digit at that index.
    pub digit: Digit,
}

/// Unguessable game identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
