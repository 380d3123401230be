//! Route definitions for the `/orders` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// POST /  -> place_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(order::place_order))
}
