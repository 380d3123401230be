//! Shared harness for API integration tests.
//!
//! Builds the production router over a test pool and provides thin request
//! helpers driven through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use storefront_api::auth::password::hash_password;
use storefront_api::auth::session::SessionConfig;
use storefront_api::config::ServerConfig;
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_db::models::user::{CreateUser, User};
use storefront_db::repositories::UserRepo;

pub const COOKIE_NAME: &str = "storefront_session";
pub const TEST_PASSWORD: &str = "secret123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        session: SessionConfig {
            cookie_name: COOKIE_NAME.to_string(),
            lifetime_mins: 120,
            remember_days: 30,
            secure: false,
        },
        admin: None,
    }
}

/// Build the full application router with all middleware layers over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(cookie)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(cookie)).await
}

pub async fn put_json_with_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(cookie)).await
}

/// Send a request with a raw (possibly malformed) body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect and parse a JSON response body.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Insert an account directly, with [`TEST_PASSWORD`] as its password.
pub async fn create_user(pool: &PgPool, phone: &str, is_admin: bool) -> User {
    let input = CreateUser {
        name: if is_admin { "Admin" } else { "Customer" }.to_string(),
        phone: Some(phone.to_string()),
        telegram_id: None,
        email: None,
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        is_admin,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// The `name=value` pair from a response's `Set-Cookie` header.
pub fn session_cookie_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
}

/// Log in through the API and return the `Cookie` header value to send back.
pub async fn login(app: Router, phone: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "phone": phone, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    session_cookie_pair(&response).expect("login should set a session cookie")
}

/// Create an admin account and return a logged-in cookie for it.
pub async fn admin_cookie(pool: &PgPool, app: Router) -> String {
    create_user(pool, "+70000000000", true).await;
    login(app, "+70000000000", TEST_PASSWORD).await
}
