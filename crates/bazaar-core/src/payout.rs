//! # Payout Reconciliation
//!
//! Computes a seller's withdrawable balance from a settlement snapshot.
//!
//! ## Reconciliation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SettlementSnapshot (one REPEATABLE READ transaction)                   │
//! │                                                                         │
//! │   settled:  succeeded payments          claimed: payout_orders of       │
//! │   ┌──────────┬────────┬──────┐          processing/paid payouts         │
//! │   │ order_id │ amount │ fee  │          ┌──────────┐                    │
//! │   ├──────────┼────────┼──────┤          │ order_id │                    │
//! │   │ o1       │ 10000  │ 500  │ ───X──── │ o1       │                    │
//! │   │ o2       │  5000  │ 250  │          └──────────┘                    │
//! │   └──────────┴────────┴──────┘                                          │
//! │                                                                         │
//! │   pending = Σ (amount − fee) over settled orders not in claimed         │
//! │           = 5000 − 250 = 4750                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::SettlementSnapshot;

/// A seller's withdrawable balance and the orders it is made of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PendingPayout {
    pub amount: Money,
    pub eligible_order_ids: Vec<Uuid>,
}

/// Reconciles settled payments against already-claimed orders.
///
/// Each settled order contributes `amount - platform_fee` at most once, and
/// never when a processing or paid payout already covers it. Sums that leave
/// the `i64` range fail with [`CoreError::AmountOverflow`].
pub fn reconcile(snapshot: &SettlementSnapshot) -> CoreResult<PendingPayout> {
    let mut total = Money::zero();
    let mut eligible_order_ids = Vec::new();

    for payment in snapshot
        .settled
        .iter()
        .filter(|p| !snapshot.claimed.contains(&p.order_id))
    {
        let net = payment
            .amount
            .checked_sub(payment.platform_fee)
            .ok_or_else(|| overflow("net payment amount"))?;
        total = total
            .checked_add(net)
            .ok_or_else(|| overflow("pending payout"))?;
        eligible_order_ids.push(payment.order_id);
    }

    Ok(PendingPayout {
        amount: total,
        eligible_order_ids,
    })
}

fn overflow(context: &str) -> CoreError {
    CoreError::AmountOverflow {
        context: context.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
