//! # Common Test Utilities
//!
//! Shared test infrastructure: an in-memory SQLite database with the schema
//! applied, application state with cheap password hashing, fixtures and
//! helpers for driving the router.

#![allow(dead_code)]

use std::sync::Once;

use auth::{generate_secret, PasswordConfig, SessionConfig};
use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use chrono::NaiveDate;
use entity::{Department, Role};
use http_body_util::BodyExt;
use migration::{connect_to_database, Migrator, MigratorTrait};
use sea_orm::DbConn;
use server::{
    create_app_router,
    dto::{ManagerDto, ProjectDto, TeamMemberDto},
    AppState,
};
use tower::ServiceExt;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

pub const TEST_PASSWORD: &str = "CorrectHorse42Battery";

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Fresh in-memory database with every migration applied.
pub async fn test_db() -> DbConn {
    init_test_env();
    let db = connect_to_database("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Argon2id parameters small enough for tests.
pub fn cheap_password_config() -> PasswordConfig {
    PasswordConfig {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
        ..PasswordConfig::default()
    }
}

/// Application state over a fresh database.
pub async fn test_state() -> AppState {
    let mut session_config = SessionConfig::new(generate_secret());
    session_config.secure_cookie = false;

    AppState::new(test_db().await, session_config).with_password_config(cheap_password_config())
}

/// Router and the state behind it.
pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (create_app_router(state.clone()), state)
}

pub fn manager_fixture(name: &str, email: &str, department: Department) -> ManagerDto {
    ManagerDto {
        id: 0,
        name: name.to_string(),
        email: email.to_string(),
        department,
        picture: None,
    }
}

pub fn project_fixture(name: &str, manager_id: i32) -> ProjectDto {
    ProjectDto {
        id: 0,
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"),
        manager_id,
    }
}

pub fn team_member_fixture(name: &str, project_id: i32) -> TeamMemberDto {
    TeamMemberDto {
        id: 0,
        name: name.to_string(),
        role: Role::Developer,
        email: format!("{}@example.com", name.to_lowercase()),
        project_id,
    }
}

/// Sends one request through a clone of the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("Router is infallible")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// JSON request, optionally carrying a `name=value` session cookie.
pub fn json_request(method: Method, uri: &str, body: Option<serde_json::Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request")
}

/// Form-encoded POST, optionally carrying a `name=value` session cookie.
pub fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("Failed to build request")
}

/// The `name=value` pair of the response's Set-Cookie header.
pub fn cookie_pair(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    value.split(';').next().map(|pair| pair.trim().to_string())
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Registers an account and returns its session cookie pair.
pub async fn register(app: &Router, email: &str) -> String {
    let body = format!(
        "email={email}&user_name={email}&name=Test+User&department=It&password={TEST_PASSWORD}&confirm_password={TEST_PASSWORD}",
        email = email.replace('@', "%40"),
    );
    let response = send(app, form_request("/account/register", &body, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "registration failed");
    cookie_pair(&response).expect("Registration sets the session cookie")
}
