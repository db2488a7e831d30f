//! Pending payout calculation.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use bazaar_core::{payout, PendingPayout};
use bazaar_db::PaymentLedger;

use super::error::{ServiceError, ServiceResult};

/// Computes what a seller can still withdraw.
pub struct PayoutCalculator {
    ledger: Arc<dyn PaymentLedger>,
}

impl PayoutCalculator {
    pub fn new(ledger: Arc<dyn PaymentLedger>) -> Self {
        Self { ledger }
    }

    /// Net of every succeeded payment whose order no processing or paid
    /// payout covers yet.
    pub async fn pending_payout(&self, seller_id: Uuid) -> ServiceResult<PendingPayout> {
        let snapshot = self
            .ledger
            .settlement_snapshot(seller_id)
            .await
            .map_err(|e| ServiceError::storage("read settlements", seller_id, e))?;

        let pending = payout::reconcile(&snapshot)?;
        debug!(
            %seller_id,
            cents = pending.amount.cents(),
            orders = pending.eligible_order_ids.len(),
            "Pending payout reconciled"
        );
        Ok(pending)
    }

    pub async fn pending_payout_cents(&self, seller_id: Uuid) -> ServiceResult<i64> {
        Ok(self.pending_payout(seller_id).await?.amount.cents())
    }
}
