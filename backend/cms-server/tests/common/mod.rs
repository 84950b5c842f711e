#![allow(dead_code)]

//! Test infrastructure for cms-server HTTP tests

use cms_auth::{AuthSettings, PasswordConfig, Registration, SigningKey, TokenConfig};
use cms_config::SessionConfig;
use cms_core::{CredentialStore, Role, UserProfile};
use cms_server::{AppState, build_router};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use axum_test::TestServer;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-integration-tests-min-32-bytes-long";
pub const TEST_PASSWORD: &str = "pw123456";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    cms_db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Cheap hashing, no login throttling
pub fn test_auth_settings() -> AuthSettings {
    let token = TokenConfig::new(SigningKey::Configured(TEST_JWT_SECRET.as_bytes().to_vec()));
    AuthSettings {
        password: PasswordConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
            min_length: 8,
        },
        login_rate_limit: None,
        ..AuthSettings::new(token)
    }
}

pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with(test_auth_settings()).await
}

pub async fn create_test_app_state_with(settings: AuthSettings) -> AppState {
    AppState::new(create_test_pool().await, settings).expect("Failed to build app state")
}

pub fn create_test_app(state: AppState) -> Router {
    build_router(state, &SessionConfig::default())
}

/// TestServer that keeps cookies between requests, like a browser
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::builder()
        .save_cookies()
        .build(create_test_app(state))
        .expect("Failed to create test server")
}

pub async fn register_user(state: &AppState, username: &str) -> UserProfile {
    state
        .authenticator
        .register(Registration {
            username: username.to_string(),
            email: format!("{username}@x.com"),
            password: TEST_PASSWORD.to_string(),
            first_name: None,
            last_name: None,
        })
        .await
        .expect("Failed to register test user")
}

pub async fn register_with_role(state: &AppState, username: &str, role: Role) -> UserProfile {
    let profile = register_user(state, username).await;
    let store = state.authenticator.store();
    store.set_role(profile.id, role).await.unwrap();
    store.find_by_id(profile.id).await.unwrap().unwrap().profile()
}

pub async fn deactivate(state: &AppState, username: &str) {
    let store = state.authenticator.store();
    let user = store.find_by_username(username).await.unwrap().unwrap();
    store.set_active(user.id, false).await.unwrap();
}

pub async fn bearer_token(state: &AppState, username: &str) -> String {
    state
        .authenticator
        .login(username, TEST_PASSWORD)
        .await
        .expect("Failed to log in test user")
        .token
        .token
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
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
        .header("authorization", format!("Bearer {token}"));

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response: Response<Body> = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
