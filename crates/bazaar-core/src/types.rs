//! # Domain Types
//!
//! Core domain types used throughout the seller backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ SellerProfile   │   │     Order       │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  seller_id      │◄──│  order_id (1:1) │       │
//! │  │  user_id (uniq) │   │  status         │   │  status         │       │
//! │  │  kyc_status     │   │  total_cents    │   │  amount_cents   │       │
//! │  │  commission     │   │  shipped_at     │   │  platform_fee   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                 ▲                                       │
//! │                                 │ payout_orders (insert-only)           │
//! │                        ┌────────┴────────┐                              │
//! │                        │     Payout      │                              │
//! │                        │  status         │                              │
//! │                        │  orders_included│                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::{CommissionRate, Money};

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of a marketplace order.
///
/// ## Fulfillment Path
/// ```text
/// pending ──► confirmed ──► processing ──► shipped ──► delivered
///    │            │             │             │
///    └────────────┴─────────────┴─────────────┴──────► cancelled
/// ```
/// `delivered` and `cancelled` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in fulfillment order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Wire names, in the same order as [`OrderStatus::ALL`].
    pub const NAMES: [&'static str; 6] = [
        "pending",
        "confirmed",
        "processing",
        "shipped",
        "delivered",
        "cancelled",
    ];

    /// Returns the wire/database name of this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// No further transition is expected from a terminal status.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Statuses counted as "pending orders" on the seller dashboard.
    pub const fn awaits_fulfillment(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Processing
        )
    }

    /// Position along the fulfillment path; `None` for `cancelled`.
    pub const fn path_position(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Processing => Some(2),
            OrderStatus::Shipped => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    /// Parses an exact wire name. Case and whitespace are not forgiven.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::not_allowed("status", &OrderStatus::NAMES))
    }
}

// =============================================================================
// KYC Status
// =============================================================================

/// Know-your-customer review state of a seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for KycStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(KycStatus::Pending),
            "verified" => Ok(KycStatus::Verified),
            "rejected" => Ok(KycStatus::Rejected),
            _ => Err(ValidationError::not_allowed(
                "kyc_status",
                &["pending", "verified", "rejected"],
            )),
        }
    }
}

// =============================================================================
// Payment / Payout Status
// =============================================================================

/// Status of the payment attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// Only succeeded payments count as settled revenue.
    pub const fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded)
    }
}

/// Status of a payout batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Requested,
    Processing,
    Paid,
    Failed,
}

impl PayoutStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Requested => "requested",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Paid => "paid",
            PayoutStatus::Failed => "failed",
        }
    }

    /// Orders in a payout with this status are no longer withdrawable.
    pub const fn claims_orders(&self) -> bool {
        matches!(self, PayoutStatus::Processing | PayoutStatus::Paid)
    }
}

// =============================================================================
// User Role
// =============================================================================

/// Marketplace role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => "buyer",
            UserRole::Seller => "seller",
            UserRole::Admin => "admin",
        }
    }
}

// =============================================================================
// Seller Profile
// =============================================================================

/// A seller's storefront profile. One per user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SellerProfile {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub user_id: Uuid,
    pub business_name: String,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
    pub kyc_status: KycStatus,
    pub commission_rate: CommissionRate,
    pub total_sales_cents: i64,
    pub total_orders: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Business details supplied when applying to become a seller.
///
/// Produced by [`crate::validation::validate_seller_application`], so every
/// optional field is already trimmed and non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerApplication {
    pub business_name: String,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
}

impl SellerApplication {
    /// Builds the profile row for `user_id`. New sellers always start
    /// with `kyc_status = pending` and zeroed counters.
    pub fn into_profile(self, user_id: Uuid, now: DateTime<Utc>) -> SellerProfile {
        SellerProfile {
            id: Uuid::new_v4(),
            user_id,
            business_name: self.business_name,
            business_type: self.business_type,
            description: self.description,
            business_email: self.business_email,
            business_phone: self.business_phone,
            business_address: self.business_address,
            kyc_status: KycStatus::Pending,
            commission_rate: CommissionRate::DEFAULT,
            total_sales_cents: 0,
            total_orders: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a seller's business details. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerProfileUpdate {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
}

impl SellerProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == SellerProfileUpdate::default()
    }

    /// Applies the supplied fields to `profile` in place.
    pub fn apply_to(&self, profile: &mut SellerProfile, now: DateTime<Utc>) {
        if let Some(name) = &self.business_name {
            profile.business_name = name.clone();
        }
        let optional = [
            (&self.business_type, &mut profile.business_type),
            (&self.description, &mut profile.description),
            (&self.business_email, &mut profile.business_email),
            (&self.business_phone, &mut profile.business_phone),
            (&self.business_address, &mut profile.business_address),
        ];
        for (new, slot) in optional {
            if let Some(value) = new {
                *slot = Some(value.clone());
            }
        }
        profile.updated_at = now;
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed with a single seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    #[ts(as = "String")]
    pub id: Uuid,
    /// Owning seller. Never changes after checkout.
    #[ts(as = "String")]
    pub seller_id: Uuid,
    #[ts(as = "String")]
    pub buyer_id: Uuid,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub tracking_number: Option<String>,
    pub seller_notes: Option<String>,
    #[ts(as = "Option<String>")]
    pub shipped_at: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A conditional multi-field order update.
///
/// Only `Some` fields are written. Storage layers must treat
/// `shipped_at`/`delivered_at` as set-once: an existing value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub tracking_number: Option<String>,
    pub seller_notes: Option<String>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl OrderPatch {
    /// Applies the patch to an in-memory order, honouring set-once timestamps.
    pub fn apply_to(&self, order: &mut Order, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(tracking) = &self.tracking_number {
            order.tracking_number = Some(tracking.clone());
        }
        if let Some(notes) = &self.seller_notes {
            order.seller_notes = Some(notes.clone());
        }
        if let Some(at) = self.shipped_at {
            order.shipped_at.get_or_insert(at);
        }
        if let Some(at) = self.delivered_at {
            order.delivered_at.get_or_insert(at);
        }
        order.updated_at = now;
    }
}

// =============================================================================
// Order Listing
// =============================================================================

/// Typed filter for listing a seller's orders.
///
/// Build it with [`crate::validation::validate_order_filter`]; the fields are
/// then known to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub limit: i64,
    pub offset: i64,
}

impl OrderFilter {
    /// 1-based page number of this window.
    pub fn page(&self) -> i64 {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit).saturating_add(1)
        }
    }

    /// Number of pages needed for `total` rows (0 when `limit` is 0).
    pub fn pages(&self, total: i64) -> i64 {
        if self.limit == 0 {
            0
        } else {
            total / self.limit + i64::from(total % self.limit != 0)
        }
    }
}

/// One window of a seller's orders plus the unpaged total.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
}

/// Order counters for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCounts {
    pub total: i64,
    /// Orders whose status awaits fulfillment.
    pub pending: i64,
}

/// Product counters for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductCounts {
    pub total: i64,
    pub active: i64,
}

// =============================================================================
// Settlement
// =============================================================================

/// A succeeded payment, reduced to what payout reconciliation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettledPayment {
    pub order_id: Uuid,
    pub amount: Money,
    pub platform_fee: Money,
}

/// Everything payout reconciliation reads, taken from one database snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementSnapshot {
    /// Succeeded payments on the seller's orders.
    pub settled: Vec<SettledPayment>,
    /// Orders covered by the seller's processing or paid payouts.
    pub claimed: BTreeSet<Uuid>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Seller dashboard roll-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SellerStats {
    pub total_orders: i64,
    pub total_revenue_cents: i64,
    pub pending_orders: i64,
    pub total_products: i64,
    pub active_products: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn order() -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            buyer_id: Uuid::new_v4(),
            status: OrderStatus::Pending,
            total_cents: 2500,
            tracking_number: None,
            seller_notes: None,
            shipped_at: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_order_status_round_trips_names() {
        for (status, name) in OrderStatus::ALL.iter().zip(OrderStatus::NAMES) {
            assert_eq!(status.as_str(), name);
            assert_eq!(name.parse::<OrderStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_new_orders_default_to_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_rejects_unknown() {
        assert!("bogus".parse::<OrderStatus>().is_err());
        assert!("Shipped".parse::<OrderStatus>().is_err());
        assert!(" shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_terminal_and_pending_sets() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());

        let pending: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(OrderStatus::awaits_fulfillment)
            .collect();
        assert_eq!(
            pending,
            vec![
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Processing
            ]
        );
    }

    #[test]
    fn test_patch_keeps_existing_timestamps() {
        let mut order = order();
        let first = Utc::now() - Duration::hours(2);
        order.shipped_at = Some(first);

        let patch = OrderPatch {
            status: Some(OrderStatus::Shipped),
            shipped_at: Some(Utc::now()),
            ..OrderPatch::default()
        };
        patch.apply_to(&mut order, Utc::now());

        assert_eq!(order.shipped_at, Some(first));
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_patch_leaves_absent_fields() {
        let mut order = order();
        order.tracking_number = Some("1Z999".to_string());

        let patch = OrderPatch {
            seller_notes: Some("fragile".to_string()),
            ..OrderPatch::default()
        };
        patch.apply_to(&mut order, Utc::now());

        assert_eq!(order.tracking_number.as_deref(), Some("1Z999"));
        assert_eq!(order.seller_notes.as_deref(), Some("fragile"));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_page_math() {
        let filter = OrderFilter {
            status: None,
            limit: 20,
            offset: 40,
        };
        assert_eq!(filter.page(), 3);
        assert_eq!(filter.pages(0), 0);
        assert_eq!(filter.pages(41), 3);
        assert_eq!(filter.pages(60), 3);

        let empty = OrderFilter {
            status: None,
            limit: 0,
            offset: 0,
        };
        assert_eq!(empty.page(), 1);
        assert_eq!(empty.pages(10), 0);
    }

    #[test]
    fn test_page_math_at_extremes() {
        let far = OrderFilter {
            status: None,
            limit: 1,
            offset: i64::MAX,
        };
        assert_eq!(far.page(), i64::MAX);
        assert_eq!(far.pages(i64::MAX), i64::MAX);

        let wide = OrderFilter {
            status: None,
            limit: 100,
            offset: 0,
        };
        assert_eq!(wide.pages(i64::MAX), i64::MAX / 100 + 1);
    }

    #[test]
    fn test_payout_status_claims() {
        assert!(PayoutStatus::Paid.claims_orders());
        assert!(PayoutStatus::Processing.claims_orders());
        assert!(!PayoutStatus::Requested.claims_orders());
        assert!(!PayoutStatus::Failed.claims_orders());
    }

    #[test]
    fn test_profile_update_applies_supplied_fields_only() {
        let mut profile = SellerApplication {
            business_name: "Old Name".to_string(),
            business_phone: Some("555-0100".to_string()),
            ..SellerApplication::default()
        }
        .into_profile(Uuid::new_v4(), Utc::now());

        let update = SellerProfileUpdate {
            business_name: Some("New Name".to_string()),
            description: Some("Handmade goods".to_string()),
            ..SellerProfileUpdate::default()
        };
        update.apply_to(&mut profile, Utc::now());

        assert_eq!(profile.business_name, "New Name");
        assert_eq!(profile.description.as_deref(), Some("Handmade goods"));
        assert_eq!(profile.business_phone.as_deref(), Some("555-0100"));
        assert_eq!(profile.kyc_status, KycStatus::Pending);
    }
}
