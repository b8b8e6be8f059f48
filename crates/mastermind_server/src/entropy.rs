//! Secret sources.
//!
//! The remote source asks random.org for digits and quietly falls back to the
//! local RNG, so creating a game never fails for lack of entropy.

use crate::config::{ConfigError, SecretSourceConfig, SecretSourceKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use strictly_mastermind::{Code, Digit, DifficultyPreset, generate_secret};
use tracing::{debug, info, instrument, warn};

/// Produces secrets for new games.
#[async_trait]
pub trait SecretSource: Send + Sync + std::fmt::Debug {
    /// Returns a secret that fits `preset`.
    async fn generate(&self, preset: &DifficultyPreset) -> Code;
}

/// Secrets from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSecretSource;

#[async_trait]
impl SecretSource for LocalSecretSource {
    async fn generate(&self, preset: &DifficultyPreset) -> Code {
        generate_secret(preset)
    }
}

/// Why a remote fetch was discarded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EntropyError {
    /// Network failure, timeout or non-success status.
    #[display("random.org request failed: {}", _0)]
    Request(String),
    /// A line of the body was not an integer.
    #[display("random.org returned a non-integer line: {:?}", _0)]
    Parse(String),
    /// Wrong count of numbers.
    #[display("random.org returned {} numbers, expected {}", got, expected)]
    WrongCount {
        /// Numbers received.
        got: usize,
        /// Numbers requested.
        expected: usize,
    },
    /// A number outside the alphabet.
    #[display("random.org number {} out of range", _0)]
    OutOfRange(i64),
}

impl std::error::Error for EntropyError {}

/// Secrets from random.org's plain-text integer API.
#[derive(Debug, Clone)]
pub struct RandomOrgSource {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl RandomOrgSource {
    /// Builds a source with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP client cannot be built.
    #[instrument(skip(config, api_key), fields(url = %config.url()))]
    pub fn new(config: &SecretSourceConfig, api_key: Option<String>) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(*config.timeout_ms()))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: config.url().clone(),
            api_key,
        })
    }

    #[instrument(skip(self, preset), fields(length = preset.length))]
    async fn fetch(&self, preset: &DifficultyPreset) -> Result<Code, EntropyError> {
        let mut url = format!(
            "{}?num={}&min=0&max={}&col=1&base=10&format=plain&rnd=new",
            self.url,
            preset.length,
            preset.max_digit()
        );
        if let Some(key) = &self.api_key {
            url.push_str("&apiKey=");
            url.push_str(key);
        }

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| EntropyError::Request(e.to_string()))?
            .text()
            .await
            .map_err(|e| EntropyError::Request(e.to_string()))?;

        debug!(bytes = body.len(), "random.org responded");
        parse_plain_integers(&body, preset)
    }
}

#[async_trait]
impl SecretSource for RandomOrgSource {
    async fn generate(&self, preset: &DifficultyPreset) -> Code {
        match self.fetch(preset).await {
            Ok(code) => code,
            Err(e) => {
                warn!(error = %e, "Falling back to local secret generation");
                generate_secret(preset)
            }
        }
    }
}

/// Parses one integer per line and checks the result fits `preset`.
pub fn parse_plain_integers(body: &str, preset: &DifficultyPreset) -> Result<Code, EntropyError> {
    let mut digits = Vec::with_capacity(preset.length);
    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let value: i64 = line
            .parse()
            .map_err(|_| EntropyError::Parse(line.to_string()))?;
        let digit = Digit::try_from(value)
            .ok()
            .filter(|d| preset.contains(*d))
            .ok_or(EntropyError::OutOfRange(value))?;
        digits.push(digit);
    }
    if digits.len() != preset.length {
        return Err(EntropyError::WrongCount {
            got: digits.len(),
            expected: preset.length,
        });
    }
    Ok(digits)
}

/// Builds the configured secret source.
///
/// # Errors
///
/// Returns [`ConfigError`] if the remote source cannot be set up.
#[instrument(skip(config))]
pub fn secret_source_from_config(
    config: &SecretSourceConfig,
) -> Result<Arc<dyn SecretSource>, ConfigError> {
    match config.kind() {
        SecretSourceKind::Local => {
            info!("Using local secret generation");
            Ok(Arc::new(LocalSecretSource))
        }
        SecretSourceKind::RandomOrg => {
            let api_key = std::env::var("RANDOM_ORG_API_KEY").ok();
            info!(has_api_key = api_key.is_some(), "Using random.org secret generation");
            Ok(Arc::new(RandomOrgSource::new(config, api_key)?))
        }
    }
}
