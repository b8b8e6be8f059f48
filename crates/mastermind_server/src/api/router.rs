//! Route table.

use super::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the REST router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/games", post(handlers::create_game))
        .route("/games/{game_id}", get(handlers::get_game))
        .route("/games/{game_id}/guess", post(handlers::submit_guess))
        .route("/games/{game_id}/hint", get(handlers::get_hint))
        .route("/stats", get(handlers::get_stats))
        .route("/stats/reset", post(handlers::reset_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
