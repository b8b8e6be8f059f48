//! Scoring engine.
//!
//! Feedback has two numbers:
//! - `correct_positions`: indices where guess and secret hold the same digit.
//! - `correct_numbers`: value matches regardless of position, counting each
//!   digit at most as often as it appears in both codes. Positional matches
//!   are included, so `correct_numbers >= correct_positions` always holds.

use crate::types::Digit;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Feedback for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Multiplicity-aware value matches, positional matches included.
    pub correct_numbers: usize,
    /// Exact value-and-index matches.
    pub correct_positions: usize,
}

impl Feedback {
    /// Human-readable summary that never says which digits matched.
    pub fn message(&self) -> String {
        if self.correct_numbers == 0 && self.correct_positions == 0 {
            "all incorrect".to_string()
        } else {
            format!(
                "{} correct number(s) and {} correct location(s)",
                self.correct_numbers, self.correct_positions
            )
        }
    }

    /// True when every position of a code of `length` digits matched.
    pub fn is_solved(&self, length: usize) -> bool {
        self.correct_positions == length
    }
}

/// Scores `guess` against `secret`.
///
/// Both codes must have the same length; callers reject mismatches before
/// scoring.
#[instrument(skip_all, fields(length = secret.len()))]
pub fn score(secret: &[Digit], guess: &[Digit]) -> Feedback {
    debug_assert_eq!(secret.len(), guess.len(), "score requires equal lengths");

    let correct_positions = secret
        .iter()
        .zip(guess)
        .filter(|(s, g)| s == g)
        .count();

    let mut secret_counts = [0usize; 256];
    let mut guess_counts = [0usize; 256];
    for &d in secret {
        secret_counts[usize::from(d)] += 1;
    }
    for &d in guess {
        guess_counts[usize::from(d)] += 1;
    }

    let correct_numbers = secret_counts
        .iter()
        .zip(guess_counts.iter())
        .map(|(s, g)| (*s).min(*g))
        .sum();

    Feedback {
        correct_numbers,
        correct_positions,
    }
}
