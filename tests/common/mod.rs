#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use marketplace_api::{
    db::run_migrations, middleware::auth::AuthKeys, routes::create_app, state::AppState,
};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Fresh in-memory database with the production schema applied.
pub async fn test_state_with_secret(secret: Option<&str>) -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would otherwise open its own empty database.
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await.expect("connect sqlite");
    run_migrations(&orm).await.expect("migrate");
    let auth = AuthKeys::new(secret.map(str::to_string), 1).expect("auth keys");
    AppState::new(orm, auth)
}

pub async fn test_app() -> Router {
    create_app(test_state_with_secret(Some(SECRET)).await)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Register a user and return `(token, user_id)`.
pub async fn register(app: &Router, first_name: &str, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "first_name": first_name,
            "last_name": "Tester",
            "email": email,
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let id = body["data"]["user"]["id"].as_str().unwrap().to_string();
    (token, id)
}

pub fn desk() -> Value {
    json!({
        "title": "Desk",
        "description": "Wood desk",
        "price": 40,
        "condition": "used",
        "category": "Furniture",
    })
}

/// Create a listing and return its JSON representation.
pub async fn create_listing(app: &Router, token: &str, payload: Value) -> Value {
    let (status, body) = send(app, "POST", "/api/v1/listings", Some(token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["data"].clone()
}
