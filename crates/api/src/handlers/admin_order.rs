//! Handlers for `/admin/orders` (admin only).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::error::CoreError;
use storefront_core::order::parse_status_update;
use storefront_core::pagination::{PageRequest, Paginated, ADMIN_ORDERS_PER_PAGE};
use storefront_core::types::DbId;
use storefront_db::models::order::{Order, OrderWithMaterials};
use storefront_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    pub page: Option<i64>,
}

/// Body of `PUT /admin/orders/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdatedResponse {
    pub message: &'static str,
    pub order: Order,
}

/// GET /api/admin/orders?page=N
///
/// Newest first, ten per page, materials included.
pub async fn list_orders(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<OrderListParams>,
) -> AppResult<Json<Paginated<OrderWithMaterials>>> {
    let page = PageRequest::new(params.page, ADMIN_ORDERS_PER_PAGE);
    let total = OrderRepo::count(&state.pool).await?;
    let orders = OrderRepo::list_page(&state.pool, page).await?;
    Ok(Json(Paginated::new(orders, page, total)))
}

/// GET /api/admin/orders/{id}
pub async fn get_order(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<OrderWithMaterials>> {
    let order = OrderRepo::find_with_materials(&state.pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))?;
    Ok(Json(order))
}

/// PUT /api/admin/orders/{id}
///
/// The order must exist before the status is validated.
pub async fn update_order_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<StatusUpdatedResponse>> {
    let current = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))?;

    let status = parse_status_update(input.status.as_deref())?;

    let order = OrderRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| order_not_found(id))?;

    tracing::info!(
        order_id = id,
        admin_id = admin.user_id,
        from = current.status.as_str(),
        to = status.as_str(),
        "Order status updated"
    );

    Ok(Json(StatusUpdatedResponse {
        message: "Status updated",
        order,
    }))
}

fn order_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Order", id })
}
