//! # User Repository
//!
//! The only user write this backend performs: buyer → seller promotion.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::DbResult;
use crate::store::UserStore;

/// Repository for user account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: PgPool) -> Self {
        UserRepository { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn promote_to_seller(&self, user_id: Uuid) -> DbResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET role = 'seller', updated_at = NOW() WHERE id = $1 AND role = 'buyer'",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let promoted = result.rows_affected() > 0;
        info!(%user_id, promoted, "User role promotion");
        Ok(promoted)
    }
}
