//! Concurrent registry of live games.
//!
//! Each game sits behind its own mutex, so mutations on one game are
//! linearized while different games never wait on each other. The map only
//! guards lookup and insertion.

use crate::stats::StatsAggregator;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::sync::Arc;
use strictly_mastermind::{
    Code, Difficulty, DifficultyPreset, Game, GameError, GameId, GameSnapshot, GameStatus,
    GuessResult, Hint, Presets, generate_secret,
};
use tracing::{debug, info, instrument, warn};

/// Holds every game for the lifetime of the process.
#[derive(Debug)]
pub struct GameStore {
    games: DashMap<GameId, Arc<Mutex<Game>>>,
    presets: Presets,
    stats: Arc<StatsAggregator>,
}

impl GameStore {
    /// Creates an empty store reporting to `stats`.
    #[instrument(skip(stats))]
    pub fn new(presets: Presets, stats: Arc<StatsAggregator>) -> Self {
        info!("Creating game store");
        Self {
            games: DashMap::new(),
            presets,
            stats,
        }
    }

    /// Difficulty presets used for new games.
    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    /// Number of games held.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// True if no game was ever created.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// The preset for `difficulty`, checked to be playable.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Validation`] for a misconfigured preset.
    pub fn playable_preset(&self, difficulty: Difficulty) -> Result<DifficultyPreset, GameError> {
        let preset = *self.presets.get(difficulty);
        preset.validate().inspect_err(|e| {
            warn!(%difficulty, error = %e, "Preset is not playable");
        })?;
        Ok(preset)
    }

    /// Creates a game with a locally generated secret.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Validation`] if the difficulty's preset is not
    /// playable.
    #[instrument(skip(self))]
    pub fn create(&self, difficulty: Difficulty) -> Result<GameSnapshot, GameError> {
        let secret = generate_secret(&self.playable_preset(difficulty)?);
        self.create_with_secret(difficulty, secret)
    }

    /// Creates a game around an externally supplied secret.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Validation`] if the preset is not playable or the
    /// secret does not fit it.
    #[instrument(skip(self, secret))]
    pub fn create_with_secret(
        &self,
        difficulty: Difficulty,
        secret: Code,
    ) -> Result<GameSnapshot, GameError> {
        let preset = *self.presets.get(difficulty);
        loop {
            let id = GameId::generate();
            match self.games.entry(id) {
                Entry::Occupied(_) => {
                    warn!(game_id = %id, "Generated identifier already in use, retrying");
                }
                Entry::Vacant(slot) => {
                    let game = Game::new(id, difficulty, preset, secret)?;
                    let snapshot = game.snapshot();
                    slot.insert(Arc::new(Mutex::new(game)));
                    self.stats.on_start(difficulty);
                    info!(game_id = %id, %difficulty, "Game created");
                    return Ok(snapshot);
                }
            }
        }
    }

    /// Returns the current state of a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for an unknown identifier.
    #[instrument(skip(self), fields(game_id = %id))]
    pub fn get(&self, id: &GameId) -> Result<GameSnapshot, GameError> {
        let game = self.entry(id)?;
        let snapshot = game.lock().snapshot();
        Ok(snapshot)
    }

    /// Applies `operation` to a game while holding that game's lock.
    ///
    /// If the operation moves the game into `won` or `lost`, the stats
    /// aggregator is told exactly once, before the lock is released.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for an unknown identifier, or whatever
    /// the operation returns. A failed operation leaves the game unchanged.
    #[instrument(skip(self, operation), fields(game_id = %id))]
    pub fn mutate<T, F>(&self, id: &GameId, operation: F) -> Result<(T, GameSnapshot), GameError>
    where
        F: FnOnce(&mut Game) -> Result<T, GameError>,
    {
        let entry = self.entry(id)?;
        let mut game = entry.lock();

        let was_terminal = game.status().is_terminal();
        let output = operation(&mut *game)?;

        if !was_terminal && game.status().is_terminal() {
            game.mark_completion_recorded();
            let guesses = u32::try_from(game.guesses_used()).unwrap_or(u32::MAX);
            self.stats.on_complete(
                game.difficulty(),
                game.status() == GameStatus::Won,
                guesses,
            );
            info!(status = %game.status(), guesses, "Game finished");
        }

        Ok((output, game.snapshot()))
    }

    /// Submits a guess to a game.
    ///
    /// # Errors
    ///
    /// See [`GameStore::mutate`] and [`Game::submit_guess`].
    pub fn submit_guess(
        &self,
        id: &GameId,
        guess: Code,
    ) -> Result<(GuessResult, GameSnapshot), GameError> {
        self.mutate(id, |game| game.submit_guess(guess))
    }

    /// Uses a game's one hint.
    ///
    /// # Errors
    ///
    /// See [`GameStore::mutate`] and [`Game::request_hint`].
    pub fn request_hint(&self, id: &GameId) -> Result<(Hint, GameSnapshot), GameError> {
        self.mutate(id, Game::request_hint)
    }

    fn entry(&self, id: &GameId) -> Result<Arc<Mutex<Game>>, GameError> {
        let found = self.games.get(id).map(|e| Arc::clone(e.value()));
        found.ok_or_else(|| {
            debug!(game_id = %id, "Game not found");
            GameError::NotFound(*id)
        })
    }
}
