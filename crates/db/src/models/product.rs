//! Product entity model.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use storefront_core::product::ProductProperties;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `products` table. Serialized as-is in catalog listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub category: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub properties: Json<ProductProperties>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
