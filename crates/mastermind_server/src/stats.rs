//! Session-wide statistics shared by every game.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strictly_mastermind::Difficulty;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Started/won counters for one difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    /// Games created at this difficulty.
    pub started: u64,
    /// Games won at this difficulty.
    pub won: u64,
}

#[derive(Debug, Default)]
struct Counters {
    games_started: u64,
    games_won: u64,
    games_lost: u64,
    current_streak: u64,
    best_streak: u64,
    by_difficulty: BTreeMap<Difficulty, DifficultyStats>,
    win_guess_counts: Vec<u32>,
}

/// Point-in-time copy of the aggregate counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Games created.
    pub games_started: u64,
    /// Games won.
    pub games_won: u64,
    /// Games lost.
    pub games_lost: u64,
    /// Consecutive wins since the last loss.
    pub current_streak: u64,
    /// Longest streak seen.
    pub best_streak: u64,
    /// Mean guesses per won game; `None` before the first win.
    pub average_guesses_to_win: Option<f64>,
    /// Fewest guesses in a won game; `None` before the first win.
    pub fastest_win_attempts: Option<u32>,
    /// Counters per difficulty, every difficulty present.
    pub by_difficulty: BTreeMap<Difficulty, DifficultyStats>,
}

/// Process-wide counters updated on game start and completion.
///
/// Each operation holds the internal lock for its whole update, so
/// interleaved completions never lose a streak transition.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    inner: Mutex<Counters>,
}

impl StatsAggregator {
    /// Creates an aggregator with all counters at zero.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating stats aggregator");
        Self::default()
    }

    /// Records a newly created game.
    #[instrument(skip(self))]
    pub fn on_start(&self, difficulty: Difficulty) {
        let mut c = self.inner.lock();
        c.games_started += 1;
        c.by_difficulty.entry(difficulty).or_default().started += 1;
        debug!(games_started = c.games_started, "Game start recorded");
    }

    /// Records a game reaching `won` or `lost`.
    #[instrument(skip(self))]
    pub fn on_complete(&self, difficulty: Difficulty, won: bool, guess_count: u32) {
        let mut c = self.inner.lock();
        if won {
            c.games_won += 1;
            c.by_difficulty.entry(difficulty).or_default().won += 1;
            c.current_streak += 1;
            c.win_guess_counts.push(guess_count);
        } else {
            c.games_lost += 1;
            c.current_streak = 0;
        }
        c.best_streak = c.best_streak.max(c.current_streak);
        info!(
            games_won = c.games_won,
            games_lost = c.games_lost,
            current_streak = c.current_streak,
            "Game completion recorded"
        );
    }

    /// Returns the counters plus derived averages.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> StatsSnapshot {
        let c = self.inner.lock();
        let average_guesses_to_win = if c.win_guess_counts.is_empty() {
            None
        } else {
            let total: u64 = c.win_guess_counts.iter().map(|&n| u64::from(n)).sum();
            Some(total as f64 / c.win_guess_counts.len() as f64)
        };
        let by_difficulty = Difficulty::iter()
            .map(|d| (d, c.by_difficulty.get(&d).copied().unwrap_or_default()))
            .collect();

        StatsSnapshot {
            games_started: c.games_started,
            games_won: c.games_won,
            games_lost: c.games_lost,
            current_streak: c.current_streak,
            best_streak: c.best_streak,
            average_guesses_to_win,
            fastest_win_attempts: c.win_guess_counts.iter().copied().min(),
            by_difficulty,
        }
    }

    /// Clears every counter and the recorded win lengths.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        *self.inner.lock() = Counters::default();
        info!("Stats reset");
    }
}
