//! End-to-end tests of the REST routes, driven through the router in memory.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mastermind_server::{AppState, GameStore, SecretSource, StatsAggregator, router};
use serde_json::{Value, json};
use strictly_mastermind::{Code, DifficultyPreset, GameId, Presets};
use tower::ServiceExt;

/// Always hands out the same digits, truncated or padded to the preset.
#[derive(Debug)]
struct FixedSecret(Code);

#[async_trait]
impl SecretSource for FixedSecret {
    async fn generate(&self, preset: &DifficultyPreset) -> Code {
        self.0.iter().copied().cycle().take(preset.length).collect()
    }
}

fn fixed_app(secret: Code, presets: Presets) -> (AppState, Router) {
    let stats = Arc::new(StatsAggregator::new());
    let store = Arc::new(GameStore::new(presets, Arc::clone(&stats)));
    let state = AppState::new(store, stats, Arc::new(FixedSecret(secret)));
    let app = router(state.clone());
    (state, app)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body readable")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Valid request")
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("Valid request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Valid request")
}

async fn new_game(app: &Router, difficulty: &str) -> String {
    let (status, body) = send(app, post(&format!("/games?difficulty={}", difficulty))).await;
    assert_eq!(status, StatusCode::OK);
    body["game_id"].as_str().expect("game_id").to_string()
}

#[tokio::test]
async fn test_create_game_defaults_to_medium() {
    let (_state, app) = fixed_app(vec![1, 2, 3, 4], Presets::default());
    let (status, body) = send(&app, post("/games")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["difficulty"], "medium");
    assert_eq!(body["attempts_left"], 10);
    assert_eq!(body["status"], "in_progress");
    assert!(body.get("secret").is_none());
}

#[tokio::test]
async fn test_create_game_rejects_unknown_difficulty() {
    let (state, app) = fixed_app(vec![1, 2, 3, 4], Presets::default());
    let (status, body) = send(&app, post("/games?difficulty=nightmare")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().expect("detail").contains("nightmare"));
    assert!(state.store().is_empty());
}

#[tokio::test]
async fn test_get_game_hides_secret_while_playing() {
    let (_state, app) = fixed_app(vec![1, 2, 3], Presets::default());
    let id = new_game(&app, "easy").await;

    let (status, body) = send(&app, get(&format!("/games/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["length"], 3);
    assert_eq!(body["attempts_left"], 8);
    assert_eq!(body["hint_used"], false);
    assert_eq!(body["history"], json!([]));
    assert!(body.get("secret").is_none());
}

#[tokio::test]
async fn test_unknown_game_is_404() {
    let (_state, app) = fixed_app(vec![1, 2, 3, 4], Presets::default());
    let missing = GameId::generate();

    let (status, body) = send(&app, get(&format!("/games/{}", missing))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], format!("Game {} not found", missing));

    let (status, _) = send(&app, get("/games/not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        post_json(
            &format!("/games/{}/guess", missing),
            json!({"guess": [1, 2, 3, 4]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get(&format!("/games/{}/hint", missing))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guess_feedback_and_win() {
    let (state, app) = fixed_app(vec![1, 2, 3, 4], Presets::default());
    let id = new_game(&app, "medium").await;
    let uri = format!("/games/{}/guess", id);

    let (status, body) = send(&app, post_json(&uri, json!({"guess": [4, 3, 2, 1]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attempts_left"], 9);
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["feedback"]["correct_numbers"], 4);
    assert_eq!(body["feedback"]["correct_positions"], 0);
    assert_eq!(
        body["feedback"]["message"],
        "4 correct number(s) and 0 correct location(s)"
    );
    assert!(body.get("secret").is_none());

    let (status, body) = send(&app, post_json(&uri, json!({"guess": [0, 0, 0, 0]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feedback"]["message"], "all incorrect");

    let (status, body) = send(&app, post_json(&uri, json!({"guess": [1, 2, 3, 4]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "won");
    assert_eq!(body["secret"], json!([1, 2, 3, 4]));
    assert_eq!(body["note"], "Game won. No more guesses allowed.");

    let (status, body) = send(&app, get(&format!("/games/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["history"].as_array().expect("history").len(), 3);
    assert_eq!(body["secret"], json!([1, 2, 3, 4]));

    let stats = state.stats().snapshot();
    assert_eq!(stats.games_won, 1);
    assert_eq!(stats.fastest_win_attempts, Some(3));
}

#[tokio::test]
async fn test_guess_after_finish_is_409() {
    let (_state, app) = fixed_app(vec![1, 2, 3, 4], Presets::default());
    let id = new_game(&app, "medium").await;
    let uri = format!("/games/{}/guess", id);

    send(&app, post_json(&uri, json!({"guess": [1, 2, 3, 4]}))).await;
    let (status, body) = send(&app, post_json(&uri, json!({"guess": [1, 2, 3, 4]}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Game won. No more guesses allowed.");

    // A malformed guess against a finished game still reports the conflict.
    let (status, _) = send(&app, post_json(&uri, json!({"guess": [1]}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_losing_reveals_secret() {
    let presets = Presets {
        medium: DifficultyPreset::new(4, 4),
        ..Presets::default()
    };
    let (state, app) = fixed_app(vec![1, 2, 3, 4], presets);
    let id = new_game(&app, "medium").await;
    let uri = format!("/games/{}/guess", id);

    for remaining in (1..4).rev() {
        let (_, body) = send(&app, post_json(&uri, json!({"guess": [5, 5, 5, 5]}))).await;
        assert_eq!(body["attempts_left"], remaining);
        assert_eq!(body["status"], "in_progress");
    }
    let (status, body) = send(&app, post_json(&uri, json!({"guess": [5, 5, 5, 5]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attempts_left"], 0);
    assert_eq!(body["status"], "lost");
    assert_eq!(body["secret"], json!([1, 2, 3, 4]));

    let stats = state.stats().snapshot();
    assert_eq!(stats.games_lost, 1);
    assert_eq!(stats.current_streak, 0);
}

#[tokio::test]
async fn test_invalid_guesses_are_400_and_free() {
    let (_state, app) = fixed_app(vec![1, 2, 3, 4], Presets::default());
    let id = new_game(&app, "medium").await;
    let uri = format!("/games/{}/guess", id);

    let (status, body) = send(&app, post_json(&uri, json!({"guess": [1, 2, 3]}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Guess must have exactly 4 digits for this game.");

    let (status, body) = send(&app, post_json(&uri, json!({"guess": [1, 2, 3, 8]}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Each digit must be between 0 and 7 inclusive.");

    let (status, _) = send(&app, post_json(&uri, json!({"guess": [1, 2, 3, -1]}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, post_json(&uri, json!({"guess": "1234"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method("POST")
        .uri(&uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("Valid request");
    let (status, body) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let (_, body) = send(&app, get(&format!("/games/{}", id))).await;
    assert_eq!(body["attempts_left"], 10);
    assert_eq!(body["history"], json!([]));
}

#[tokio::test]
async fn test_hint_once_then_409() {
    let (_state, app) = fixed_app(vec![6, 6, 6, 6, 6], Presets::default());
    let id = new_game(&app, "hard").await;
    let uri = format!("/games/{}/hint", id);

    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["digit"], 6);
    assert!(body["position"].as_u64().expect("position") < 5);
    assert_eq!(body["attempts_left"], 12);
    assert_eq!(body["note"], "You used your only hint for this game.");

    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Hint already used for this game.");

    let (_, body) = send(&app, get(&format!("/games/{}", id))).await;
    assert_eq!(body["hint_used"], true);
    assert_eq!(body["hint"]["digit"], 6);
}

#[tokio::test]
async fn test_stats_and_reset() {
    let (_state, app) = fixed_app(vec![1, 2, 3], Presets::default());
    let id = new_game(&app, "easy").await;
    new_game(&app, "hard").await;
    send(
        &app,
        post_json(&format!("/games/{}/guess", id), json!({"guess": [1, 2, 3]})),
    )
    .await;

    let (status, body) = send(&app, get("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games_started"], 2);
    assert_eq!(body["games_won"], 1);
    assert_eq!(body["current_streak"], 1);
    assert_eq!(body["average_guesses_to_win"], 1.0);
    assert_eq!(body["by_difficulty"]["easy"]["won"], 1);
    assert_eq!(body["by_difficulty"]["hard"]["started"], 1);

    let (status, body) = send(&app, post("/stats/reset")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Stats reset.");

    let (_, body) = send(&app, get("/stats")).await;
    assert_eq!(body["games_started"], 0);
    assert_eq!(body["games_won"], 0);
    assert!(body["average_guesses_to_win"].is_null());

    // Games survive a stats reset.
    let (status, _) = send(&app, get(&format!("/games/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_local_state_plays_a_full_game() {
    let state = AppState::with_presets(Presets::default());
    let app = router(state.clone());
    let id = new_game(&app, "easy").await;

    let parsed: GameId = id.parse().expect("Valid id");
    assert_eq!(state.store().get(&parsed).expect("Game exists").length, 3);

    let (status, body) = send(
        &app,
        post_json(&format!("/games/{}/guess", id), json!({"guess": [0, 0, 0]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attempts_left"], 7);
}

#[tokio::test]
async fn test_hint_after_finish_is_409() {
    let (_state, app) = fixed_app(vec![1, 2, 3], Presets::default());
    let id = new_game(&app, "easy").await;
    send(
        &app,
        post_json(&format!("/games/{}/guess", id), json!({"guess": [1, 2, 3]})),
    )
    .await;

    let (status, body) = send(&app, get(&format!("/games/{}/hint", id))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Game finished. No hint available.");
}

#[tokio::test]
async fn test_unplayable_preset_refuses_new_game() {
    let presets = Presets {
        medium: DifficultyPreset::new(4, 0),
        ..Presets::default()
    };
    let (state, app) = fixed_app(vec![1, 2, 3, 4], presets);

    let (status, body) = send(&app, post("/games?difficulty=medium")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "max_attempts must be at least 1");
    assert!(state.store().is_empty());
}
