#![allow(dead_code)]

//! Test infrastructure for onigiri-server API tests

use onigiri_auth::{AuthService, ProviderRegistry, SigningKey, TokenIssuer};
use onigiri_core::{ProviderConfig, ProviderKind, TransformConfig};
use onigiri_db::UserRepository;
use onigiri_server::{AppState, build_router};

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(SqliteConnectOptions::new().filename(":memory:"))
        .await
        .expect("Failed to create test database");

    onigiri_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn github_provider() -> ProviderConfig {
    let mut provider = ProviderConfig::local("github");
    provider.kind = ProviderKind::Oauth2;
    provider.client_id = Some("client-id".into());
    provider.auth_url = Some("https://github.com/login/oauth/authorize".into());
    provider.token_url = Some("https://github.com/login/oauth/access_token".into());
    provider
        .field_mappings
        .insert("login".into(), "display_name".into());
    provider.field_mappings.insert("email".into(), "email".into());
    provider
        .transforms
        .push(TransformConfig::new("lowercase").with_param("field", "email"));
    provider
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let tokens = TokenIssuer::new(&SigningKey::new(TEST_SECRET).unwrap());
    let providers =
        ProviderRegistry::new(vec![ProviderConfig::local("password"), github_provider()]).unwrap();
    let directory = Arc::new(UserRepository::new(pool.clone()));

    AppState::new(AuthService::new(directory, tokens, providers), pool)
}

pub async fn create_test_app() -> (Router, AppState) {
    let state = create_test_app_state().await;
    (build_router(state.clone()), state)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Sign up then log in, returning the session token.
pub async fn sign_up_and_login(app: &Router, email: &str, password: &str) -> String {
    let sign_up = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/sign-up",
            serde_json::json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(sign_up.status(), axum::http::StatusCode::CREATED);

    let login = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    let json = read_json(login).await;
    json["token"].as_str().unwrap().to_string()
}
