//! Route definitions for the public catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes merged at the `/api` root.
///
/// ```text
/// GET /materials  -> list_materials
/// GET /products   -> list_products
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/materials", get(catalog::list_materials))
        .route("/products", get(catalog::list_products))
}
