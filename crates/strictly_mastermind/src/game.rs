//! Per-game state machine.
//!
//! A game starts `InProgress` and moves at most once into `Won` or `Lost`.
//! Every operation either succeeds and mutates, or fails and leaves the game
//! untouched.

use crate::error::{ConflictReason, GameError};
use crate::scoring::score;
use crate::types::{
    Code, Difficulty, DifficultyPreset, Digit, GameId, GameStatus, GuessResult, Hint,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// One Mastermind game.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    difficulty: Difficulty,
    preset: DifficultyPreset,
    secret: Code,
    attempts_left: u32,
    status: GameStatus,
    history: Vec<GuessResult>,
    hint: Option<Hint>,
    revealed_positions: Vec<usize>,
    completion_recorded: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Game {
    /// Creates a game around `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Validation`] if the preset is unplayable or the
    /// secret does not fit it.
    #[instrument(skip(secret, preset), fields(length = preset.length))]
    pub fn new(
        id: GameId,
        difficulty: Difficulty,
        preset: DifficultyPreset,
        secret: Code,
    ) -> Result<Self, GameError> {
        preset.validate()?;
        check_code(&preset, &secret, "Secret")?;
        let now = Utc::now();
        info!(max_attempts = preset.max_attempts, "Creating new game");
        Ok(Self {
            id,
            difficulty,
            preset,
            secret,
            attempts_left: preset.max_attempts,
            status: GameStatus::InProgress,
            history: Vec::new(),
            hint: None,
            revealed_positions: Vec::new(),
            completion_recorded: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Game identifier.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Difficulty the game was created with.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Length and alphabet of this game.
    pub fn preset(&self) -> &DifficultyPreset {
        &self.preset
    }

    /// Remaining guesses.
    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Accepted guesses, oldest first.
    pub fn history(&self) -> &[GuessResult] {
        &self.history
    }

    /// True once the hint has been revealed.
    pub fn hint_used(&self) -> bool {
        self.hint.is_some()
    }

    /// The revealed hint, if any.
    pub fn hint(&self) -> Option<Hint> {
        self.hint
    }

    /// Number of accepted guesses.
    pub fn guesses_used(&self) -> usize {
        self.history.len()
    }

    /// The secret, only once the game is over.
    pub fn revealed_secret(&self) -> Option<&[Digit]> {
        self.status.is_terminal().then_some(self.secret.as_slice())
    }

    /// Submits a guess.
    ///
    /// On success one attempt is consumed, the result is appended to the
    /// history and the status is updated.
    ///
    /// # Errors
    ///
    /// - [`GameError::Conflict`] if the game is already over.
    /// - [`GameError::Validation`] if the guess has the wrong length or a
    ///   digit outside the alphabet.
    #[instrument(skip(self, guess), fields(game_id = %self.id))]
    pub fn submit_guess(&mut self, guess: Code) -> Result<GuessResult, GameError> {
        if self.status.is_terminal() {
            warn!(status = %self.status, "Guess submitted to finished game");
            return Err(GameError::Conflict(ConflictReason::GameFinished(
                self.status,
            )));
        }
        check_code(&self.preset, &guess, "Guess")?;

        let feedback = score(&self.secret, &guess);
        let result = GuessResult::new(
            guess,
            feedback.correct_numbers,
            feedback.correct_positions,
            feedback.message(),
        );

        self.attempts_left = self.attempts_left.saturating_sub(1);
        self.history.push(result.clone());
        if feedback.is_solved(self.preset.length) {
            self.status = GameStatus::Won;
        } else if self.attempts_left == 0 {
            self.status = GameStatus::Lost;
        }
        self.updated_at = Utc::now();

        debug!(
            correct_numbers = feedback.correct_numbers,
            correct_positions = feedback.correct_positions,
            attempts_left = self.attempts_left,
            status = %self.status,
            "Guess scored"
        );
        Ok(result)
    }

    /// Reveals one secret position, picked uniformly among unrevealed ones.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Conflict`] if the game is over or the hint was
    /// already used.
    pub fn request_hint(&mut self) -> Result<Hint, GameError> {
        self.request_hint_with(&mut rand::rng())
    }

    /// Like [`Game::request_hint`], drawing the position from `rng`.
    ///
    /// # Errors
    ///
    /// See [`Game::request_hint`].
    #[instrument(skip(self, rng), fields(game_id = %self.id))]
    pub fn request_hint_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Hint, GameError> {
        if self.status.is_terminal() {
            warn!(status = %self.status, "Hint requested for finished game");
            return Err(GameError::Conflict(ConflictReason::HintAfterFinish));
        }
        if self.hint.is_some() {
            warn!("Hint requested twice");
            return Err(GameError::Conflict(ConflictReason::HintAlreadyUsed));
        }

        let candidates: Vec<usize> = (0..self.secret.len())
            .filter(|i| !self.revealed_positions.contains(i))
            .collect();
        let position = *candidates
            .choose(rng)
            .ok_or(GameError::Conflict(ConflictReason::HintAlreadyUsed))?;

        let hint = Hint {
            position,
            digit: self.secret[position],
        };
        self.revealed_positions.push(position);
        self.hint = Some(hint);
        self.updated_at = Utc::now();

        info!(position, "Hint revealed");
        Ok(hint)
    }

    /// True once the store has reported this game's completion to stats.
    pub fn completion_recorded(&self) -> bool {
        self.completion_recorded
    }

    /// Marks the completion as reported.
    ///
    /// # Panics
    ///
    /// Panics if the game is still in progress or the completion was already
    /// reported; either means stats would be counted wrongly.
    pub fn mark_completion_recorded(&mut self) {
        assert!(
            self.status.is_terminal(),
            "completion recorded for game {} still in progress",
            self.id
        );
        assert!(
            !self.completion_recorded,
            "completion recorded twice for game {}",
            self.id
        );
        self.completion_recorded = true;
    }

    /// Serializable view of the game. The secret is included only when the
    /// game is over.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_id: self.id,
            difficulty: self.difficulty,
            length: self.preset.length,
            alphabet: self.preset.alphabet,
            attempts_left: self.attempts_left,
            max_attempts: self.preset.max_attempts,
            status: self.status,
            history: self.history.clone(),
            hint_used: self.hint_used(),
            hint: self.hint,
            secret: self.revealed_secret().map(<[Digit]>::to_vec),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Point-in-time copy of a game's public state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Game identifier.
    pub game_id: GameId,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// Digits per code.
    pub length: usize,
    /// Count of allowed symbols.
    pub alphabet: u8,
    /// Remaining guesses.
    pub attempts_left: u32,
    /// Guesses allowed in total.
    pub max_attempts: u32,
    /// Current status.
    pub status: GameStatus,
    /// Accepted guesses, oldest first.
    pub history: Vec<GuessResult>,
    /// Whether the hint was used.
    pub hint_used: bool,
    /// The revealed hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<Hint>,
    /// The secret, present only when the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<Code>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last successful mutation.
    pub updated_at: DateTime<Utc>,
}

fn check_code(preset: &DifficultyPreset, code: &[Digit], what: &str) -> Result<(), GameError> {
    if code.len() != preset.length {
        return Err(GameError::validation(format!(
            "{} must have exactly {} digits for this game.",
            what, preset.length
        )));
    }
    if code.iter().any(|&d| !preset.contains(d)) {
        return Err(GameError::validation(format!(
            "Each digit must be between 0 and {} inclusive.",
            preset.max_digit()
        )));
    }
    Ok(())
}
