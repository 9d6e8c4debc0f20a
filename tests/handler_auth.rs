mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use novel_likes::api::handlers::auth_handler;
use novel_likes::utils::telegram::sign;
use serde_json::{Map, Value, json};
use sqlx::PgPool;

fn auth_app(pool: PgPool) -> Router {
    let state = common::create_test_state(pool);
    Router::new()
        .route("/api/auth", post(auth_handler))
        .with_state(state)
}

fn signed_payload() -> Map<String, Value> {
    let mut fields = match json!({
        "id": 7,
        "first_name": "Ann",
        "username": "ann",
        "auth_date": 1700000000
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let hash = sign(&fields, common::BOT_TOKEN);
    fields.insert("hash".to_string(), json!(hash));
    fields
}

#[sqlx::test]
async fn test_auth_success(pool: PgPool) {
    let server = TestServer::new(auth_app(pool.clone())).unwrap();

    let response = server.post("/api/auth").json(&signed_payload()).await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Authorization successful");
    assert_eq!(json["user"]["id"], 7);
    assert_eq!(json["user"]["name"], "Ann");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = 7")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn test_auth_tampered_payload(pool: PgPool) {
    let server = TestServer::new(auth_app(pool)).unwrap();

    let mut payload = signed_payload();
    payload.insert("id".to_string(), json!(8));

    let response = server.post("/api/auth").json(&payload).await;

    response.assert_status_forbidden();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "forbidden");
}

#[sqlx::test]
async fn test_auth_missing_hash(pool: PgPool) {
    let server = TestServer::new(auth_app(pool)).unwrap();

    let response = server
        .post("/api/auth")
        .json(&json!({ "id": 7, "first_name": "Ann" }))
        .await;

    response.assert_status_forbidden();
}
