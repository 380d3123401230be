//! Repository for the `materials` table and its order association.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::material::{Material, OrderMaterial};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category, slug, name, description, image_url, price, \
                        properties, created_at, updated_at";

/// Same columns qualified with the `m` alias for joins.
const JOIN_COLUMNS: &str = "m.id, m.category, m.slug, m.name, m.description, m.image_url, \
                             m.price, m.properties, m.created_at, m.updated_at";

/// Read access to configurator materials. Materials are seed-managed.
pub struct MaterialRepo;

impl MaterialRepo {
    /// List every material in storage order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials ORDER BY id");
        sqlx::query_as::<_, Material>(&query).fetch_all(pool).await
    }

    /// Find a material by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE slug = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Return the subset of `slugs` with no matching material, deduplicated.
    pub async fn missing_slugs(pool: &PgPool, slugs: &[String]) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT s.slug
             FROM UNNEST($1::TEXT[]) AS s(slug)
             WHERE NOT EXISTS (SELECT 1 FROM materials m WHERE m.slug = s.slug)",
        )
        .bind(slugs)
        .fetch_all(pool)
        .await
    }

    /// Materials attached to one order, in material id order.
    pub async fn list_for_order(pool: &PgPool, order_id: DbId) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS}
             FROM materials m
             JOIN material_order mo ON mo.material_id = m.id
             WHERE mo.order_id = $1
             ORDER BY m.id"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Materials for a batch of orders in a single query.
    pub async fn list_for_orders(
        pool: &PgPool,
        order_ids: &[DbId],
    ) -> Result<Vec<OrderMaterial>, sqlx::Error> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT mo.order_id, {JOIN_COLUMNS}
             FROM material_order mo
             JOIN materials m ON m.id = mo.material_id
             WHERE mo.order_id = ANY($1)
             ORDER BY mo.order_id, m.id"
        );
        sqlx::query_as::<_, OrderMaterial>(&query)
            .bind(order_ids)
            .fetch_all(pool)
            .await
    }
}
