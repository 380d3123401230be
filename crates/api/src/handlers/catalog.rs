//! Handlers for the public catalog (`/materials`, `/products`).

use axum::extract::State;
use axum::Json;
use storefront_core::catalog::ProductFilter;
use storefront_db::models::material::MaterialGroups;
use storefront_db::models::product::Product;
use storefront_db::repositories::{MaterialRepo, ProductRepo};

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::state::AppState;

/// GET /api/materials
///
/// All configurator materials grouped by category.
pub async fn list_materials(State(state): State<AppState>) -> AppResult<Json<MaterialGroups>> {
    let materials = MaterialRepo::list(&state.pool).await?;
    Ok(Json(MaterialGroups::from_materials(materials)))
}

/// GET /api/products?search=&category=&opacity[]=&room[]=&color[]=
///
/// Query pairs are taken raw so repeated `key[]` entries accumulate.
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(pairs): AppQuery<Vec<(String, String)>>,
) -> AppResult<Json<Vec<Product>>> {
    let filter = ProductFilter::from_query_pairs(pairs);
    let products = ProductRepo::list_filtered(&state.pool, &filter).await?;
    tracing::debug!(count = products.len(), filtered = !filter.is_empty(), "Listed products");
    Ok(Json(products))
}
