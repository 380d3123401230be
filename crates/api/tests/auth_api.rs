//! HTTP-level tests for registration, login, logout and the current-user probe.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{
    body_json, create_user, get, get_with_cookie, login, post_json, post_json_with_cookie,
    session_cookie_pair, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;
use storefront_db::repositories::UserRepo;

fn registration(phone: &str, telegram_id: i64) -> serde_json::Value {
    json!({
        "phone": phone,
        "password": "secret123",
        "telegram_id": telegram_id,
        "name": "Ivan"
    })
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_customer_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/auth/register", registration("+79990000001", 111)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["name"], "Ivan");
    assert_eq!(json["user"]["phone"], "+79990000001");
    assert!(json["user"].get("password_hash").is_none());

    let user = UserRepo::find_by_telegram_id(&pool, 111).await.unwrap().unwrap();
    assert!(!user.is_admin);
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_without_name_uses_default(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "phone": "+79990000002", "password": "secret123", "telegram_id": 222 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["user"]["name"], "Customer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_phone_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let first = post_json(app.clone(), "/api/auth/register", registration("+79990000003", 333)).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/auth/register", registration("+79990000003", 334)).await;
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(second).await;
    assert!(json["errors"]["phone"].is_array());
    assert!(json["errors"].get("telegram_id").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_telegram_id_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let first = post_json(app.clone(), "/api/auth/register", registration("+79990000004", 444)).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/auth/register", registration("+79990000005", 444)).await;
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(second).await["errors"]["telegram_id"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "phone": "+79990000006", "password": "123", "telegram_id": 666 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["password"].is_array());
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_sets_http_only_session_cookie(pool: PgPool) {
    let user = create_user(&pool, "+79990000010", false).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "phone": "+79990000010", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("storefront_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Max-Age=7200"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["is_admin"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remember_extends_cookie_lifetime(pool: PgPool) {
    create_user(&pool, "+79990000011", false).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "phone": "+79990000011", "password": TEST_PASSWORD, "remember": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains(&format!("Max-Age={}", 30 * 24 * 60 * 60)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_telegram_id_is_reported_against_field(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/auth/register",
        json!({ "phone": "+79990000015", "password": TEST_PASSWORD, "telegram_id": "abc" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["telegram_id"][0], "The telegram_id field must be an integer.");
    assert!(UserRepo::find_by_phone(&pool, "+79990000015").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_phone_look_identical(pool: PgPool) {
    create_user(&pool, "+79990000012", false).await;
    let app = common::build_test_app(pool);

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "phone": "+79990000012", "password": "not-the-password" }),
    )
    .await;
    let unknown_phone = post_json(
        app,
        "/api/auth/login",
        json!({ "phone": "+79999999999", "password": "whatever1" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(unknown_phone.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(wrong_password.headers().get(SET_COOKIE).is_none());

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_phone).await;
    assert_eq!(a, b);
    assert!(a["errors"]["phone"].is_array());
}

// ---------------------------------------------------------------------------
// Current user / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_user_reflects_session(pool: PgPool) {
    create_user(&pool, "+79990000013", false).await;
    let app = common::build_test_app(pool);

    let anonymous = body_json(get(app.clone(), "/api/auth/user").await).await;
    assert_eq!(anonymous, json!({ "authenticated": false }));

    let cookie = login(app.clone(), "+79990000013", TEST_PASSWORD).await;
    let json = body_json(get_with_cookie(app, "/api/auth/user", &cookie).await).await;
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["user"]["phone"], "+79990000013");
    assert_eq!(json["user"]["is_admin"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_session_and_clears_cookie(pool: PgPool) {
    create_user(&pool, "+79990000014", false).await;
    let app = common::build_test_app(pool);
    let cookie = login(app.clone(), "+79990000014", TEST_PASSWORD).await;

    let response = post_json_with_cookie(app.clone(), "/api/auth/logout", json!({}), &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        session_cookie_pair(&response).as_deref(),
        Some("storefront_session=")
    );
    assert_eq!(body_json(response).await["success"], true);

    let json = body_json(get_with_cookie(app, "/api/auth/user", &cookie).await).await;
    assert_eq!(json["authenticated"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_without_session_still_succeeds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/auth/logout", json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);
}
