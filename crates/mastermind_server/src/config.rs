//! Server configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_mastermind::{Difficulty, Presets};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Default random.org integer endpoint.
pub const RANDOM_ORG_URL: &str = "https://www.random.org/integers/";

/// Where new secrets come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretSourceKind {
    /// Thread-local RNG.
    #[default]
    Local,
    /// random.org, falling back to the local RNG on any failure.
    RandomOrg,
}

/// Secret source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct SecretSourceConfig {
    /// Which source to use.
    kind: SecretSourceKind,
    /// Request timeout for remote sources, in milliseconds.
    timeout_ms: u64,
    /// Endpoint for the random.org source.
    url: String,
}

impl Default for SecretSourceConfig {
    fn default() -> Self {
        Self {
            kind: SecretSourceKind::Local,
            timeout_ms: 3000,
            url: RANDOM_ORG_URL.to_string(),
        }
    }
}

impl SecretSourceConfig {
    /// Creates a config for the given source with default timeout and URL.
    pub fn new(kind: SecretSourceKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    host: String,
    /// Bind port.
    port: u16,
    /// Length, attempts and alphabet per difficulty.
    presets: Presets,
    /// Secret source.
    secret_source: SecretSourceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            presets: Presets::default(),
            secret_source: SecretSourceConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the bind address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replaces the difficulty presets.
    pub fn with_presets(mut self, presets: Presets) -> Self {
        self.presets = presets;
        self
    }

    /// Replaces the secret source settings.
    pub fn with_secret_source(mut self, secret_source: SecretSourceConfig) -> Self {
        self.secret_source = secret_source;
        self
    }

    /// Checks every preset is playable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::iter() {
            self.presets
                .get(difficulty)
                .validate()
                .map_err(|e| ConfigError::new(format!("{} preset: {}", difficulty, e)))?;
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
