//! HTTP handlers. Each one translates a request into a single core operation.

use super::dto::{
    GuessRequest, GuessResponse, HintResponse, MessageResponse, NewGameQuery, NewGameResponse,
};
use super::error::ApiError;
use crate::state::AppState;
use crate::stats::StatsSnapshot;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use strictly_mastermind::{Difficulty, GameError, GameId, GameSnapshot};
use tracing::{debug, info, instrument};

fn parse_game_id(raw: &str) -> Result<GameId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::UnknownGame(raw.to_string()))
}

/// POST /games
#[instrument(skip(state))]
pub async fn create_game(
    State(state): State<AppState>,
    Query(query): Query<NewGameQuery>,
) -> Result<Json<NewGameResponse>, ApiError> {
    let difficulty = match query.difficulty.as_deref() {
        None => Difficulty::default(),
        Some(name) => name
            .parse::<Difficulty>()
            .map_err(|_| ApiError::UnknownDifficulty(name.to_string()))?,
    };

    let preset = state.store().playable_preset(difficulty)?;
    let secret = state.secrets().generate(&preset).await;
    let snapshot = state.store().create_with_secret(difficulty, secret)?;

    info!(game_id = %snapshot.game_id, %difficulty, "Started game");
    Ok(Json(NewGameResponse {
        game_id: snapshot.game_id,
        attempts_left: snapshot.attempts_left,
        status: snapshot.status,
        difficulty,
    }))
}

/// GET /games/{game_id}
#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let id = parse_game_id(&game_id)?;
    Ok(Json(state.store().get(&id)?))
}

/// POST /games/{game_id}/guess
#[instrument(skip(state, payload))]
pub async fn submit_guess(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessResponse>, ApiError> {
    let id = parse_game_id(&game_id)?;
    let Json(request) = payload?;
    let guess = request.into_code().map_err(GameError::Validation)?;

    let (feedback, snapshot) = state.store().submit_guess(&id, guess)?;
    debug!(status = %snapshot.status, attempts_left = snapshot.attempts_left, "Guess accepted");

    let finished = snapshot.status.is_terminal();
    Ok(Json(GuessResponse {
        attempts_left: snapshot.attempts_left,
        status: snapshot.status,
        feedback,
        note: finished.then(|| format!("Game {}. No more guesses allowed.", snapshot.status)),
        secret: snapshot.secret,
    }))
}

/// GET /games/{game_id}/hint
#[instrument(skip(state))]
pub async fn get_hint(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<HintResponse>, ApiError> {
    let id = parse_game_id(&game_id)?;
    let (hint, snapshot) = state.store().request_hint(&id)?;
    Ok(Json(HintResponse {
        position: hint.position,
        digit: hint.digit,
        attempts_left: snapshot.attempts_left,
        note: "You used your only hint for this game.".to_string(),
    }))
}

/// GET /stats
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats().snapshot())
}

/// POST /stats/reset
#[instrument(skip(state))]
pub async fn reset_stats(State(state): State<AppState>) -> Json<MessageResponse> {
    state.stats().reset();
    Json(MessageResponse {
        message: "Stats reset.".to_string(),
    })
}
