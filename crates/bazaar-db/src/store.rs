//! # Store Traits
//!
//! The persistence seams the seller services depend on.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   trait OrderStore ─────┬──► OrderRepository    (PostgreSQL)            │
//! │   trait PaymentLedger   │                                               │
//! │   trait SellerStore     ├──► PaymentRepository  (PostgreSQL)            │
//! │   trait UserStore       │    SellerRepository, UserRepository, ...      │
//! │   trait ProductStore    │                                               │
//! │                         └──► MemoryStore        (feature = "memory")    │
//! │                                                                         │
//! │   Services hold `Arc<dyn Trait>`; main wires PostgreSQL, tests wire     │
//! │   the in-memory store.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use bazaar_core::{
    Money, Order, OrderCounts, OrderFilter, OrderPage, OrderPatch, ProductCounts, SellerProfile,
    SellerProfileUpdate, SettlementSnapshot,
};

use crate::error::DbResult;

/// Persistence boundary for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// One window of the seller's orders, newest first, plus the total
    /// count for the same filter. Both are read from one snapshot.
    async fn list_by_seller(&self, seller_id: Uuid, filter: &OrderFilter) -> DbResult<OrderPage>;

    /// Fetches an order owned by `seller_id`.
    ///
    /// Orders of other sellers are reported as `NotFound`.
    async fn get_by_seller_and_id(&self, seller_id: Uuid, order_id: Uuid) -> DbResult<Order>;

    /// Applies `patch` and returns the stored order.
    ///
    /// `shipped_at`/`delivered_at` are only written when still empty;
    /// `updated_at` is always refreshed.
    async fn update(&self, order_id: Uuid, patch: &OrderPatch) -> DbResult<Order>;

    /// Total orders and orders awaiting fulfillment.
    async fn order_counts(&self, seller_id: Uuid) -> DbResult<OrderCounts>;
}

/// Read access to payments and payout claims.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Succeeded payments and claimed orders for one seller, read from a
    /// single consistent snapshot.
    async fn settlement_snapshot(&self, seller_id: Uuid) -> DbResult<SettlementSnapshot>;

    /// Gross sum of succeeded payment amounts on the seller's orders.
    async fn gross_revenue(&self, seller_id: Uuid) -> DbResult<Money>;
}

/// Seller profile persistence.
#[async_trait]
pub trait SellerStore: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Option<SellerProfile>>;

    /// Inserts a new profile. A second profile for the same user fails with
    /// `DbError::UniqueViolation`.
    async fn create(&self, profile: &SellerProfile) -> DbResult<SellerProfile>;

    /// Writes the supplied business fields and returns the stored profile.
    async fn update_profile(
        &self,
        seller_id: Uuid,
        update: &SellerProfileUpdate,
    ) -> DbResult<SellerProfile>;
}

/// User account operations owned by this backend.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Promotes a buyer to seller. Returns `false` when nothing changed
    /// (already a seller, or an admin).
    async fn promote_to_seller(&self, user_id: Uuid) -> DbResult<bool>;
}

/// Read-only product counters.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn product_counts(&self, seller_id: Uuid) -> DbResult<ProductCounts>;
}
