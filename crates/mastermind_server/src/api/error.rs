//! Mapping of game errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use strictly_mastermind::GameError;

/// Error returned by every handler.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// A core game, store or validation error.
    #[display("{}", _0)]
    Game(GameError),

    /// The request body could not be read as the expected JSON.
    #[display("{}", _0)]
    MalformedBody(String),

    /// A path segment that cannot be a game identifier.
    #[display("Game {} not found", _0)]
    UnknownGame(String),

    /// Unrecognized difficulty name.
    #[display("Unknown difficulty '{}'. Use easy, medium or hard.", _0)]
    UnknownDifficulty(String),
}

impl std::error::Error for ApiError {}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Game(GameError::Validation(_))
            | ApiError::MalformedBody(_)
            | ApiError::UnknownDifficulty(_) => StatusCode::BAD_REQUEST,
            ApiError::Game(GameError::NotFound(_)) | ApiError::UnknownGame(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Game(GameError::Conflict(_)) => StatusCode::CONFLICT,
        }
    }

    fn log(&self) {
        match self {
            ApiError::Game(GameError::Conflict(_)) => {
                tracing::info!(error = %self, "Rejected conflicting request");
            }
            _ => {
                tracing::debug!(error = %self, "Rejected request");
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
