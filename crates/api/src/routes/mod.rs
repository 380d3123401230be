pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod order;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /materials                 grouped configurator materials (public)
/// /products                  filtered catalog (public)
///
/// /orders                    place order (POST, guest or logged in)
///
/// /auth/register             register (POST, used by the Telegram bot)
/// /auth/login                login (POST)
/// /auth/logout               logout (POST)
/// /auth/user                 current account (GET)
///
/// /admin/orders              paginated list (admin only)
/// /admin/orders/{id}         get, update status (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/orders", order::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
