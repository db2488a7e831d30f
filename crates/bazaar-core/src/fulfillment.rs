//! # Order Fulfillment
//!
//! Plans order status transitions and their side effects.
//!
//! ## Transition Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PATCH /seller/orders/:id/status                                        │
//! │                                                                         │
//! │  1. validate_order_status("shipped")        → OrderStatus / 400         │
//! │  2. FulfillmentExtras::new(tracking, notes) → trimmed extras / 400      │
//! │  3. OrderStore::get_by_seller_and_id        → Order / 404               │
//! │  4. OrderStatusMachine::plan  ← THIS MODULE → OrderPatch / 409          │
//! │  5. OrderStore::update(patch)               → stored Order              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine never touches storage. It only decides what the patch is;
//! the storage layer still guards set-once timestamps on its own.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::{Order, OrderPatch, OrderStatus};
use crate::validation::{
    normalize_optional, ValidationResult, MAX_SELLER_NOTES_LEN, MAX_TRACKING_NUMBER_LEN,
};

// =============================================================================
// Transition Policy
// =============================================================================

/// Which status changes a seller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any known status may be set from any status.
    #[default]
    Permissive,
    /// Only forward moves, cancellation of a live order, or re-issuing the
    /// current status.
    Monotonic,
}

impl TransitionPolicy {
    /// Returns whether `from → to` is allowed under this policy.
    pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Monotonic => {
                if from == to {
                    return true;
                }
                if from.is_terminal() {
                    return false;
                }
                match (from.path_position(), to.path_position()) {
                    (_, None) => true, // cancel
                    (Some(a), Some(b)) => b > a,
                    (None, Some(_)) => false,
                }
            }
        }
    }
}

// =============================================================================
// Fulfillment Extras
// =============================================================================

/// Optional fields that ride along with a status change.
///
/// Blank values mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FulfillmentExtras {
    pub tracking_number: Option<String>,
    pub seller_notes: Option<String>,
}

impl FulfillmentExtras {
    /// Trims and length-checks the raw request fields.
    pub fn new(tracking_number: Option<&str>, seller_notes: Option<&str>) -> ValidationResult<Self> {
        Ok(Self {
            tracking_number: normalize_optional(
                "tracking_number",
                tracking_number,
                MAX_TRACKING_NUMBER_LEN,
            )?,
            seller_notes: normalize_optional("seller_notes", seller_notes, MAX_SELLER_NOTES_LEN)?,
        })
    }
}

// =============================================================================
// Status Machine
// =============================================================================

/// Plans order status transitions.
///
/// ## Example
/// ```rust
/// use bazaar_core::fulfillment::{FulfillmentExtras, OrderStatusMachine};
/// # use bazaar_core::{Order, OrderStatus};
/// # use chrono::Utc;
/// # use uuid::Uuid;
/// # let now = Utc::now();
/// # let order = Order {
/// #     id: Uuid::new_v4(), seller_id: Uuid::new_v4(), buyer_id: Uuid::new_v4(),
/// #     status: OrderStatus::Pending, total_cents: 1000, tracking_number: None,
/// #     seller_notes: None, shipped_at: None, delivered_at: None,
/// #     created_at: now, updated_at: now,
/// # };
///
/// let machine = OrderStatusMachine::default();
/// let patch = machine
///     .plan(&order, OrderStatus::Shipped, FulfillmentExtras::default(), now)
///     .unwrap();
/// assert_eq!(patch.shipped_at, Some(now));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStatusMachine {
    policy: TransitionPolicy,
}

impl OrderStatusMachine {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Produces the patch that moves `order` to `requested`.
    ///
    /// ## Side Effects Planned
    /// - `shipped`: `shipped_at = now` unless already set
    /// - `delivered`: `delivered_at = now` unless already set
    /// - non-blank extras are written, blank ones are left alone
    pub fn plan(
        &self,
        order: &Order,
        requested: OrderStatus,
        extras: FulfillmentExtras,
        now: DateTime<Utc>,
    ) -> CoreResult<OrderPatch> {
        if !self.policy.allows(order.status, requested) {
            return Err(CoreError::InvalidTransition {
                order_id: order.id.to_string(),
                from: order.status,
                to: requested,
            });
        }

        let shipped_at = match requested {
            OrderStatus::Shipped if order.shipped_at.is_none() => Some(now),
            _ => None,
        };
        let delivered_at = match requested {
            OrderStatus::Delivered if order.delivered_at.is_none() => Some(now),
            _ => None,
        };

        Ok(OrderPatch {
            status: Some(requested),
            tracking_number: extras.tracking_number,
            seller_notes: extras.seller_notes,
            shipped_at,
            delivered_at,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
