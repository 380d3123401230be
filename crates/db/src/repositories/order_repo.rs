//! Repository for the `orders` table and the `material_order` association.

use std::collections::{HashMap, HashSet};

use sqlx::types::Json;
use sqlx::PgPool;
use storefront_core::order::{OrderDraft, OrderStatus};
use storefront_core::pagination::PageRequest;
use storefront_core::types::DbId;

use crate::models::order::{Order, OrderWithMaterials, PlaceOrderOutcome};
use crate::repositories::MaterialRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, guest_info, total_price, status, complexity, \
                        estimated_days, created_at, updated_at";

/// Provides order placement and admin access to orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert an order and attach its materials in one transaction.
    ///
    /// The status is always `new`. Slugs are resolved under `FOR SHARE`; if any
    /// no longer resolves the transaction is rolled back and the missing slugs
    /// are returned. Duplicate slugs collapse to a single association row.
    pub async fn create_with_materials(
        pool: &PgPool,
        user_id: Option<DbId>,
        draft: &OrderDraft,
    ) -> Result<PlaceOrderOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO orders (user_id, guest_info, total_price, status, complexity, estimated_days)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&insert)
            .bind(user_id)
            .bind(draft.guest_info.clone().map(Json))
            .bind(draft.total_price)
            .bind(OrderStatus::New.as_str())
            .bind(&draft.complexity)
            .bind(draft.estimated_days)
            .fetch_one(&mut *tx)
            .await?;

        let slugs = draft.distinct_slugs();
        let resolved: Vec<(DbId, String)> =
            sqlx::query_as("SELECT id, slug FROM materials WHERE slug = ANY($1) FOR SHARE")
                .bind(&slugs)
                .fetch_all(&mut *tx)
                .await?;

        if resolved.len() != slugs.len() {
            let found: HashSet<&str> = resolved.iter().map(|(_, slug)| slug.as_str()).collect();
            let missing = slugs
                .iter()
                .filter(|slug| !found.contains(slug.as_str()))
                .cloned()
                .collect();
            tx.rollback().await?;
            return Ok(PlaceOrderOutcome::UnknownMaterials(missing));
        }

        let material_ids: Vec<DbId> = resolved.iter().map(|(id, _)| *id).collect();
        sqlx::query(
            "INSERT INTO material_order (order_id, material_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(order.id)
        .bind(&material_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(PlaceOrderOutcome::Created(order))
    }

    /// Find an order by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an order together with its materials.
    pub async fn find_with_materials(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrderWithMaterials>, sqlx::Error> {
        let Some(order) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let materials = MaterialRepo::list_for_order(pool, order.id).await?;
        Ok(Some(OrderWithMaterials { order, materials }))
    }

    /// Total number of orders.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
    }

    /// One page of orders, newest first, with materials batch-loaded.
    pub async fn list_page(
        pool: &PgPool,
        page: PageRequest,
    ) -> Result<Vec<OrderWithMaterials>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let orders = sqlx::query_as::<_, Order>(&query)
            .bind(page.per_page)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
        let mut by_order: HashMap<DbId, Vec<_>> = HashMap::new();
        for row in MaterialRepo::list_for_orders(pool, &ids).await? {
            by_order.entry(row.order_id).or_default().push(row.material);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let materials = by_order.remove(&order.id).unwrap_or_default();
                OrderWithMaterials { order, materials }
            })
            .collect())
    }

    /// Overwrite an order's status. Returns `None` if the order does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("UPDATE orders SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
