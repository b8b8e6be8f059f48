//! Explicit application state shared by every request handler.

use crate::config::{ConfigError, ServerConfig};
use crate::entropy::{LocalSecretSource, SecretSource, secret_source_from_config};
use crate::stats::StatsAggregator;
use crate::store::GameStore;
use std::sync::Arc;
use strictly_mastermind::Presets;
use tracing::{info, instrument};

/// Handles to the game store, stats and secret source.
///
/// Built once at startup and injected into the router; cloning is cheap.
#[derive(Debug, Clone, derive_new::new)]
pub struct AppState {
    store: Arc<GameStore>,
    stats: Arc<StatsAggregator>,
    secrets: Arc<dyn SecretSource>,
}

impl AppState {
    /// Fresh state with the given presets and local secret generation.
    #[instrument]
    pub fn with_presets(presets: Presets) -> Self {
        let stats = Arc::new(StatsAggregator::new());
        let store = Arc::new(GameStore::new(presets, Arc::clone(&stats)));
        Self::new(store, stats, Arc::new(LocalSecretSource))
    }

    /// Builds state as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a preset is not playable or the configured
    /// secret source cannot be set up.
    #[instrument(skip(config))]
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let stats = Arc::new(StatsAggregator::new());
        let store = Arc::new(GameStore::new(config.presets().clone(), Arc::clone(&stats)));
        let secrets = secret_source_from_config(config.secret_source())?;
        info!("Application state initialized");
        Ok(Self::new(store, stats, secrets))
    }

    /// The game store.
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// The stats aggregator.
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// The secret source for new games.
    pub fn secrets(&self) -> &dyn SecretSource {
        self.secrets.as_ref()
    }
}
