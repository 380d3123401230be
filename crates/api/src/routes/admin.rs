//! Route definitions for the `/admin` surface. Every handler requires an admin.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin_order;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /orders        -> list_orders
/// GET /orders/{id}   -> get_order
/// PUT /orders/{id}   -> update_order_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin_order::list_orders))
        .route(
            "/orders/{id}",
            get(admin_order::get_order).put(admin_order::update_order_status),
        )
}
