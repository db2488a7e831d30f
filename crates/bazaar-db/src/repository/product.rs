//! # Product Repository
//!
//! Product counters for the seller dashboard. Catalog CRUD lives in
//! another service; this backend only reads.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use bazaar_core::ProductCounts;

use crate::error::DbResult;
use crate::store::ProductStore;

/// Repository for product reads.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: PgPool) -> Self {
        ProductRepository { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn product_counts(&self, seller_id: Uuid) -> DbResult<ProductCounts> {
        let (total, active): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active)
            FROM products
            WHERE seller_id = $1
            "#,
        )
        .bind(seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ProductCounts { total, active })
    }
}
