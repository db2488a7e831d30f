//! # Payment Repository
//!
//! Read access to payments and payout coverage, for reconciliation and the
//! dashboard.
//!
//! ## Settlement Snapshot
//! ```text
//! BEGIN ISOLATION LEVEL REPEATABLE READ, READ ONLY
//!   ├── succeeded payments on the seller's orders
//!   └── order ids in the seller's processing/paid payouts
//! COMMIT
//! ```
//! Both reads see the same snapshot, so a payout that commits in between
//! can never be half-counted.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use bazaar_core::{Money, SettledPayment, SettlementSnapshot};

use crate::error::DbResult;
use crate::store::PaymentLedger;

/// A succeeded payment row joined to its order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SettledPaymentRecord {
    pub order_id: Uuid,
    pub amount_cents: i64,
    pub platform_fee_cents: i64,
}

impl From<SettledPaymentRecord> for SettledPayment {
    fn from(row: SettledPaymentRecord) -> Self {
        SettledPayment {
            order_id: row.order_id,
            amount: Money::from_cents(row.amount_cents),
            platform_fee: Money::from_cents(row.platform_fee_cents),
        }
    }
}

/// Repository for payment and payout reads.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: PgPool) -> Self {
        PaymentRepository { pool }
    }
}

#[async_trait]
impl PaymentLedger for PaymentRepository {
    #[instrument(skip(self))]
    async fn settlement_snapshot(&self, seller_id: Uuid) -> DbResult<SettlementSnapshot> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let settled = sqlx::query_as::<_, SettledPaymentRecord>(
            r#"
            SELECT p.order_id, p.amount_cents, p.platform_fee_cents
            FROM payments p
            JOIN orders o ON o.id = p.order_id
            WHERE o.seller_id = $1 AND p.status = 'succeeded'
            ORDER BY o.created_at, p.order_id
            "#,
        )
        .bind(seller_id)
        .fetch_all(&mut *tx)
        .await?;

        let claimed = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT po.order_id
            FROM payout_orders po
            JOIN payouts pa ON pa.id = po.payout_id
            WHERE pa.seller_id = $1 AND pa.status IN ('processing', 'paid')
            "#,
        )
        .bind(seller_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            settled = settled.len(),
            claimed = claimed.len(),
            "Read settlement snapshot"
        );

        Ok(SettlementSnapshot {
            settled: settled.into_iter().map(SettledPayment::from).collect(),
            claimed: claimed.into_iter().collect::<BTreeSet<_>>(),
        })
    }

    async fn gross_revenue(&self, seller_id: Uuid) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(p.amount_cents), 0)::BIGINT
            FROM payments p
            JOIN orders o ON o.id = p.order_id
            WHERE o.seller_id = $1 AND p.status = 'succeeded'
            "#,
        )
        .bind(seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }
}
