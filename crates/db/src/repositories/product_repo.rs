//! Repository for the `products` table and catalog filtering.

use sqlx::PgPool;
use storefront_core::catalog::ProductFilter;

use crate::models::product::Product;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, price, category, image, description, \
                        properties, created_at, updated_at";

/// Read access to catalog products.
pub struct ProductRepo;

impl ProductRepo {
    /// List products matching every active filter, ordered by id.
    ///
    /// Inactive filters bind `NULL` and short-circuit. Opacity requires every
    /// candidate to be contained in `properties->'opacity'`, room accepts any
    /// candidate, and color matches the scalar `properties->>'color'`.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR category = $2)
               AND ($3::TEXT[] IS NULL OR NOT EXISTS (
                    SELECT 1 FROM UNNEST($3::TEXT[]) AS o(value)
                    WHERE NOT COALESCE(properties -> 'opacity' @> to_jsonb(o.value), false)))
               AND ($4::TEXT[] IS NULL OR EXISTS (
                    SELECT 1 FROM UNNEST($4::TEXT[]) AS r(value)
                    WHERE properties -> 'room' @> to_jsonb(r.value)))
               AND ($5::TEXT[] IS NULL OR properties ->> 'color' = ANY($5::TEXT[]))
             ORDER BY id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(filter.search_pattern())
            .bind(filter.category.as_deref())
            .bind(filter.opacity.as_deref())
            .bind(filter.room.as_deref())
            .bind(filter.color.as_deref())
            .fetch_all(pool)
            .await
    }

    /// Find a product by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE slug = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
