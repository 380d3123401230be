//! HTTP-level tests for order placement.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, login, post_json, post_json_with_cookie, post_raw};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use storefront_core::order::OrderStatus;
use storefront_db::repositories::{MaterialRepo, OrderRepo};

fn order_body(materials: serde_json::Value) -> serde_json::Value {
    json!({
        "materials": materials,
        "guest_info": { "name": "Anna", "phone": "+79990000000", "email": "anna@example.com" },
        "total_price": 35000,
        "complexity": "standard",
        "estimated_days": 5
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_order_is_created(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/orders",
        order_body(json!(["loft", "velvet", "warm_beige", "profile"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Order created");

    let order_id = json["order_id"].as_i64().unwrap();
    let order = OrderRepo::find_by_id(&pool, order_id).await.unwrap().unwrap();
    assert_eq!(order.user_id, None);
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.total_price, Decimal::from(35_000));
    assert_eq!(order.estimated_days, Some(5));
    assert_eq!(
        order.guest_info.unwrap().0.email.as_deref(),
        Some("anna@example.com")
    );

    let materials = MaterialRepo::list_for_order(&pool, order_id).await.unwrap();
    assert_eq!(materials.len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_slugs_collapse_to_one_association(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/orders",
        order_body(json!(["velvet", "velvet", "velvet"])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let order_id = body_json(response).await["order_id"].as_i64().unwrap();
    let materials = MaterialRepo::list_for_order(&pool, order_id).await.unwrap();
    assert_eq!(materials.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn caller_status_is_ignored(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let mut body = order_body(json!(["velvet"]));
    body["status"] = json!("paid");

    let response = post_json(app, "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let order_id = body_json(response).await["order_id"].as_i64().unwrap();
    let order = OrderRepo::find_by_id(&pool, order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::New);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_slug_is_rejected_without_writing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/orders",
        order_body(json!(["velvet", "unobtainium"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"]["materials.1"][0],
        "The selected materials.1 is invalid."
    );
    assert!(json["errors"].get("materials.0").is_none());
    assert_eq!(OrderRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_required_fields_are_reported(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/orders", json!({ "materials": [] })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["message"].is_string());
    assert!(json["errors"]["materials"].is_array());
    assert!(json["errors"]["total_price"].is_array());
    assert_eq!(OrderRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_price_and_bad_email_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/orders",
        json!({
            "materials": ["velvet"],
            "total_price": -5,
            "guest_info": { "email": "not-an-email" }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["errors"]["total_price"].is_array());
    assert!(json["errors"]["guest_info.email"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_raw(app, "/api/orders", "{not json").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_price_is_reported_against_field(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/orders",
        json!({ "materials": ["velvet"], "total_price": "abc" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["message"], "The total_price field must be a number.");
    assert_eq!(json["errors"]["total_price"][0], "The total_price field must be a number.");
    assert_eq!(OrderRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scalar_materials_is_reported_against_field(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/orders",
        json!({ "materials": "velvet", "total_price": 100 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["materials"][0], "The materials field must be an array.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_integer_estimated_days_is_reported_against_field(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/orders",
        json!({ "materials": ["velvet"], "total_price": 100, "estimated_days": "five" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"]["estimated_days"][0],
        "The estimated_days field must be an integer."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_info_is_stored_as_submitted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let mut ids = Vec::new();
    for guest_info in [json!({}), json!({ "name": "Anna" })] {
        let response = post_json(
            app.clone(),
            "/api/orders",
            json!({ "materials": ["velvet"], "total_price": 100, "guest_info": guest_info }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(body_json(response).await["order_id"].as_i64().unwrap());
    }

    let stored: Vec<serde_json::Value> = sqlx::query_scalar(
        "SELECT guest_info FROM orders WHERE id = ANY($1) ORDER BY id",
    )
    .bind(&ids)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(stored, vec![json!({}), json!({ "name": "Anna" })]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logged_in_order_is_owned_by_account(pool: PgPool) {
    let user = create_user(&pool, "+79991112233", false).await;
    let app = common::build_test_app(pool.clone());
    let cookie = login(app.clone(), "+79991112233", common::TEST_PASSWORD).await;

    let response =
        post_json_with_cookie(app, "/api/orders", order_body(json!(["classic"])), &cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let order_id = body_json(response).await["order_id"].as_i64().unwrap();
    let order = OrderRepo::find_by_id(&pool, order_id).await.unwrap().unwrap();
    assert_eq!(order.user_id, Some(user.id));
    assert!(order.guest_info.is_some(), "guest info is kept as submitted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_cookie_places_guest_order(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_with_cookie(
        app,
        "/api/orders",
        order_body(json!(["classic"])),
        "storefront_session=not-a-real-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let order_id = body_json(response).await["order_id"].as_i64().unwrap();
    let order = OrderRepo::find_by_id(&pool, order_id).await.unwrap().unwrap();
    assert_eq!(order.user_id, None);
}
