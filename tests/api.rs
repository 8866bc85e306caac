use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use quest_referral_server::{
    app::{AppState, Application},
    config::{
        ApplicationConfig, BotConfig, Config, DatabaseConfig, SaveConfig, StorageBackend,
        StorageConfig,
    },
    repository::MemStore,
};
use secrecy::Secret;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tower::ServiceExt;

const BOT_TOKEN: &str = "test-token";

fn test_config() -> Config {
    Config {
        application: ApplicationConfig {
            host: "127.0.0.1".to_owned(),
            port: 0,
            debug_mode: "info".to_owned(),
        },
        database: DatabaseConfig {
            username: "postgres".to_owned(),
            password: Secret::new("password".to_owned()),
            port: 5432,
            host: "127.0.0.1".to_owned(),
            database_name: "quest".to_owned(),
            require_ssl: false,
        },
        storage: StorageConfig {
            backend: StorageBackend::Memory,
        },
        bot: BotConfig {
            token: Secret::new(BOT_TOKEN.to_owned()),
        },
        save: SaveConfig {
            max_payload_bytes: 1024,
        },
    }
}

fn test_app() -> Router {
    let store = Arc::new(MemStore::new());
    let (tx, _rx) = broadcast::channel(16);
    Application::router(Arc::new(AppState::new(store, tx, test_config())))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn bot_start(user_id: &str, payload: Option<&str>) -> Request<Body> {
    let mut body = json!({ "userId": user_id, "command": "start" });
    if let Some(code) = payload {
        body["payload"] = json!(code);
    }

    Request::builder()
        .method("POST")
        .uri("/bot/update")
        .header(header::AUTHORIZATION, format!("Bearer {BOT_TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn liveness_endpoint_responds_with_plaintext() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn referral_flow_from_start_to_claim() {
    let app = test_app();

    let (status, _) = send(&app, bot_start("200", Some("100"))).await;
    assert_eq!(status, StatusCode::OK);

    // same referred user again: benign no-op
    let (status, _) = send(&app, bot_start("200", Some("100"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/my-referrals/100")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "friendsInvited": 1,
            "unclaimedCount": 1,
            "unclaimedReward": { "money": 50_000, "gems": 5 }
        })
    );

    let (status, body) = send(
        &app,
        json_request("POST", "/claim-rewards", json!({ "userId": "100" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "claimedCount": 1,
            "rewards": { "money": 50_000, "gems": 5 }
        })
    );

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/my-referrals/100")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unclaimedCount"], json!(0));
    assert_eq!(body["friendsInvited"], json!(1));

    let (status, body) = send(
        &app,
        json_request("POST", "/claim-rewards", json!({ "userId": "100" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["claimedCount"], json!(0));
}

#[tokio::test]
async fn stats_for_unknown_referrer_are_all_zero() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/my-referrals/nobody")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "friendsInvited": 0,
            "unclaimedCount": 0,
            "unclaimedReward": { "money": 0, "gems": 0 }
        })
    );
}

#[tokio::test]
async fn claim_without_user_id_is_rejected() {
    let app = test_app();
    let (status, _) = send(&app, json_request("POST", "/claim-rewards", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn self_referral_leaves_no_trace() {
    let app = test_app();
    let (status, body) = send(&app, bot_start("100", Some("100"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Welcome to the game!"));

    let (_, body) = send(
        &app,
        Request::builder()
            .uri("/my-referrals/100")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["friendsInvited"], json!(0));
}

#[tokio::test]
async fn start_without_code_sends_generic_welcome() {
    let app = test_app();
    let (status, body) = send(&app, bot_start("300", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Welcome to the game!"));
}

#[tokio::test]
async fn bot_update_with_bad_token_is_unauthorized() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/bot/update")
        .header(header::AUTHORIZATION, "Bearer wrong-token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "userId": "1", "command": "start" })).unwrap(),
        ))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let app = test_app();
    let state = json!({ "level": 7, "coins": 300 });

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/save",
            json!({ "userId": "player-1", "gameState": state }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/load/player-1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, state);
}

#[tokio::test]
async fn load_for_new_player_is_not_found() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/load/new-player")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("No saved game found"));
}

#[tokio::test]
async fn save_without_game_state_is_rejected() {
    let app = test_app();
    let (status, _) = send(
        &app,
        json_request("POST", "/save", json!({ "userId": "player-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_save_is_rejected_with_distinct_error() {
    let app = test_app();
    let big_state = json!({ "blob": "x".repeat(2048) });

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/save",
            json!({ "userId": "player-1", "gameState": big_state }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // nothing was stored
    let (status, _) = send(
        &app,
        Request::builder()
            .uri("/load/player-1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
