//! Order entity model and placement outcome.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use storefront_core::order::{GuestInfo, OrderStatus};
use storefront_core::types::{DbId, Timestamp};

use crate::models::material::Material;

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub guest_info: Option<Json<GuestInfo>>,
    pub total_price: Decimal,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub complexity: Option<String>,
    pub estimated_days: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order with its attached materials, as returned by the admin surface.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithMaterials {
    #[serde(flatten)]
    pub order: Order,
    pub materials: Vec<Material>,
}

/// Result of the transactional insert.
#[derive(Debug, Clone)]
pub enum PlaceOrderOutcome {
    Created(Order),
    /// Slugs that no longer resolved inside the transaction. Nothing was written.
    UnknownMaterials(Vec<String>),
}
