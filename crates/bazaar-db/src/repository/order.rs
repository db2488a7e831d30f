//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## Key Operations
//! - Filtered, paged listing of a seller's orders
//! - Ownership-checked reads
//! - Locked, set-once-aware updates
//!
//! ## Listing Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderFilter { status: Some(Shipped), limit: 20, offset: 40 }           │
//! │       │                                                                 │
//! │       ▼  push_filter()                                                  │
//! │  ... FROM orders WHERE seller_id = $1 AND status = $2                   │
//! │       │                                                                 │
//! │       ├──► SELECT cols ... ORDER BY created_at DESC, id                 │
//! │       │                    LIMIT $3 OFFSET $4                           │
//! │       └──► SELECT COUNT(*) ...                                          │
//! │                                                                         │
//! │  Both run inside one REPEATABLE READ, READ ONLY transaction.            │
//! │  Values are always bound, never spliced into the SQL text.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};
use uuid::Uuid;

use bazaar_core::{Order, OrderCounts, OrderFilter, OrderPage, OrderPatch, OrderStatus};

use crate::error::{DbError, DbResult};
use crate::store::OrderStore;

const ORDER_COLUMNS: &str = "id, seller_id, buyer_id, status, total_cents, tracking_number, \
     seller_notes, shipped_at, delivered_at, created_at, updated_at";

/// Row shape of the `orders` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub status: String,
    pub total_cents: i64,
    pub tracking_number: Option<String>,
    pub seller_notes: Option<String>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = DbError;

    fn try_from(row: OrderRecord) -> Result<Self, Self::Error> {
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e| DbError::invalid_row("order", e))?;

        Ok(Order {
            id: row.id,
            seller_id: row.seller_id,
            buyer_id: row.buyer_id,
            status,
            total_cents: row.total_cents,
            tracking_number: row.tracking_number,
            seller_notes: row.seller_notes,
            shipped_at: row.shipped_at,
            delivered_at: row.delivered_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: PgPool) -> Self {
        OrderRepository { pool }
    }
}

// =============================================================================
// Query Construction
// =============================================================================

/// Appends `WHERE seller_id = $n [AND status = $m]` to `builder`.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, seller_id: Uuid, filter: &OrderFilter) {
    builder.push(" WHERE seller_id = ").push_bind(seller_id);
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
}

pub(crate) fn list_query(seller_id: Uuid, filter: &OrderFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {ORDER_COLUMNS} FROM orders"));
    push_filter(&mut builder, seller_id, filter);
    builder
        .push(" ORDER BY created_at DESC, id LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset);
    builder
}

pub(crate) fn count_query(seller_id: Uuid, filter: &OrderFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM orders");
    push_filter(&mut builder, seller_id, filter);
    builder
}

// =============================================================================
// OrderStore
// =============================================================================

#[async_trait]
impl OrderStore for OrderRepository {
    #[instrument(skip(self, filter), fields(status = ?filter.status, limit = filter.limit))]
    async fn list_by_seller(&self, seller_id: Uuid, filter: &OrderFilter) -> DbResult<OrderPage> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let rows = list_query(seller_id, filter)
            .build_query_as::<OrderRecord>()
            .fetch_all(&mut *tx)
            .await?;
        let total: i64 = count_query(seller_id, filter)
            .build_query_scalar()
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        let orders = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = orders.len(), total, "Listed seller orders");
        Ok(OrderPage { orders, total })
    }

    async fn get_by_seller_and_id(&self, seller_id: Uuid, order_id: Uuid) -> DbResult<Order> {
        let row = sqlx::query_as::<_, OrderRecord>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND seller_id = $2"
        ))
        .bind(order_id)
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Order", order_id))?;

        row.try_into()
    }

    #[instrument(skip(self, patch), fields(status = ?patch.status))]
    async fn update(&self, order_id: Uuid, patch: &OrderPatch) -> DbResult<Order> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent transitions of the same order.
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Order", order_id))?;

        let row = sqlx::query_as::<_, OrderRecord>(&format!(
            r#"
            UPDATE orders SET
                status          = COALESCE($2, status),
                tracking_number = COALESCE($3, tracking_number),
                seller_notes    = COALESCE($4, seller_notes),
                shipped_at      = COALESCE(shipped_at, $5),
                delivered_at    = COALESCE(delivered_at, $6),
                updated_at      = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.tracking_number.as_deref())
        .bind(patch.seller_notes.as_deref())
        .bind(patch.shipped_at)
        .bind(patch.delivered_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!("Order updated");
        row.try_into()
    }

    async fn order_counts(&self, seller_id: Uuid) -> DbResult<OrderCounts> {
        let (total, pending): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status IN ('pending', 'confirmed', 'processing'))
            FROM orders
            WHERE seller_id = $1
            "#,
        )
        .bind(seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderCounts { total, pending })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
