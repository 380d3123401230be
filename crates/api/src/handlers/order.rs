//! Handler for `POST /orders` (guest or authenticated checkout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use storefront_core::error::CoreError;
use storefront_core::order::{unknown_slug_errors, OrderDraft, PlaceOrderRequest};
use storefront_core::types::DbId;
use storefront_db::models::order::{Order, PlaceOrderOutcome};
use storefront_db::repositories::{MaterialRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::RequestContext;
use crate::state::AppState;

/// Body of a successful placement.
#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub order_id: DbId,
}

/// POST /api/orders
pub async fn place_order(
    State(state): State<AppState>,
    ctx: RequestContext,
    AppJson(input): AppJson<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderCreatedResponse>)> {
    let draft = input.validate_draft()?;
    let order = submit_order(&state.pool, &ctx, &draft).await?;

    tracing::info!(
        order_id = order.id,
        user_id = ?order.user_id,
        materials = draft.material_slugs.len(),
        total_price = %order.total_price,
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            success: true,
            message: "Order created",
            order_id: order.id,
        }),
    ))
}

/// Check slugs, then persist the order for the context's account (or as a guest).
pub async fn submit_order(
    pool: &PgPool,
    ctx: &RequestContext,
    draft: &OrderDraft,
) -> AppResult<Order> {
    let missing = MaterialRepo::missing_slugs(pool, &draft.material_slugs).await?;
    if !missing.is_empty() {
        return Err(unknown_materials(draft, &missing));
    }

    match OrderRepo::create_with_materials(pool, ctx.account_id(), draft).await? {
        PlaceOrderOutcome::Created(order) => Ok(order),
        PlaceOrderOutcome::UnknownMaterials(missing) => {
            tracing::warn!(?missing, "Materials disappeared during order placement");
            Err(unknown_materials(draft, &missing))
        }
    }
}

fn unknown_materials(draft: &OrderDraft, missing: &[String]) -> AppError {
    AppError::Core(CoreError::InvalidFields(unknown_slug_errors(
        &draft.material_slugs,
        missing,
    )))
}
