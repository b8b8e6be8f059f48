//! Mastermind game server
//!
//! Owns all shared state for the game service and exposes it over REST.
//!
//! # Architecture
//!
//! - **Store**: concurrent game registry with per-game locking
//! - **Stats**: session-wide counters updated on start and completion
//! - **State**: explicit container injected into every handler
//! - **API**: axum routes mapping requests onto store operations
//!
//! # Example
//!
//! ```
//! use mastermind_server::AppState;
//! use strictly_mastermind::{Difficulty, Presets};
//!
//! let state = AppState::with_presets(Presets::default());
//! let game = state.store().create(Difficulty::Easy).expect("default presets are valid");
//! assert_eq!(game.length, 3);
//! assert_eq!(state.stats().snapshot().games_started, 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod entropy;
mod state;
mod stats;
mod store;

pub use api::{
    ApiError, GuessRequest, GuessResponse, HintResponse, MessageResponse, NewGameQuery,
    NewGameResponse, router,
};
pub use config::{
    ConfigError, RANDOM_ORG_URL, SecretSourceConfig, SecretSourceKind, ServerConfig,
};
pub use entropy::{
    EntropyError, LocalSecretSource, RandomOrgSource, SecretSource, parse_plain_integers,
    secret_source_from_config,
};
pub use state::AppState;
pub use stats::{DifficultyStats, StatsAggregator, StatsSnapshot};
pub use store::GameStore;
