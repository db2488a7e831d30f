//! # In-Memory Store
//!
//! A single-process implementation of every store trait, for service and
//! API tests. Enabled with the `memory` feature.
//!
//! All data sits behind one `RwLock`, so every read is a consistent
//! snapshot and every write is atomic, matching what the PostgreSQL
//! repositories get from transactions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use bazaar_core::{
    Money, Order, OrderCounts, OrderFilter, OrderPage, OrderPatch, OrderStatus, PaymentStatus,
    PayoutStatus, ProductCounts, SellerProfile, SellerProfileUpdate, SettledPayment,
    SettlementSnapshot, UserRole,
};

use crate::error::{DbError, DbResult};
use crate::store::{OrderStore, PaymentLedger, ProductStore, SellerStore, UserStore};

#[derive(Debug, Clone)]
struct PaymentRow {
    status: PaymentStatus,
    amount: Money,
    platform_fee: Money,
}

#[derive(Debug, Clone)]
struct PayoutRow {
    seller_id: Uuid,
    status: PayoutStatus,
    order_ids: Vec<Uuid>,
}

#[derive(Debug, Clone)]
struct ProductRow {
    seller_id: Uuid,
    is_active: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, UserRole>,
    sellers: HashMap<Uuid, SellerProfile>,
    orders: HashMap<Uuid, Order>,
    /// Keyed by order id (one payment per order).
    payments: HashMap<Uuid, PaymentRow>,
    payouts: Vec<PayoutRow>,
    products: Vec<ProductRow>,
}

/// In-memory store shared by clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Registers a user account with the given role.
    pub async fn insert_user(&self, user_id: Uuid, role: UserRole) {
        self.state.write().await.users.insert(user_id, role);
    }

    /// Returns the role of a user, if known.
    pub async fn user_role(&self, user_id: Uuid) -> Option<UserRole> {
        self.state.read().await.users.get(&user_id).copied()
    }

    /// Inserts a seller profile directly, bypassing the unique check.
    pub async fn insert_seller(&self, profile: SellerProfile) {
        self.state.write().await.sellers.insert(profile.id, profile);
    }

    /// Inserts a new order for `seller_id` in the given status.
    pub async fn insert_order(
        &self,
        seller_id: Uuid,
        status: OrderStatus,
        total_cents: i64,
        created_at: DateTime<Utc>,
    ) -> Order {
        let order = Order {
            id: Uuid::new_v4(),
            seller_id,
            buyer_id: Uuid::new_v4(),
            status,
            total_cents,
            tracking_number: None,
            seller_notes: None,
            shipped_at: None,
            delivered_at: None,
            created_at,
            updated_at: created_at,
        };
        self.state
            .write()
            .await
            .orders
            .insert(order.id, order.clone());
        order
    }

    /// Records the payment for an order, replacing any previous one.
    pub async fn insert_payment(
        &self,
        order_id: Uuid,
        status: PaymentStatus,
        amount_cents: i64,
        platform_fee_cents: i64,
    ) {
        self.state.write().await.payments.insert(
            order_id,
            PaymentRow {
                status,
                amount: Money::from_cents(amount_cents),
                platform_fee: Money::from_cents(platform_fee_cents),
            },
        );
    }

    /// Records a payout covering `order_ids`.
    pub async fn insert_payout(&self, seller_id: Uuid, status: PayoutStatus, order_ids: &[Uuid]) {
        self.state.write().await.payouts.push(PayoutRow {
            seller_id,
            status,
            order_ids: order_ids.to_vec(),
        });
    }

    /// Adds a product for `seller_id`.
    pub async fn insert_product(&self, seller_id: Uuid, is_active: bool) {
        self.state.write().await.products.push(ProductRow {
            seller_id,
            is_active,
        });
    }

    /// Reads an order regardless of owner.
    pub async fn order(&self, order_id: Uuid) -> Option<Order> {
        self.state.read().await.orders.get(&order_id).cloned()
    }
}

// =============================================================================
// Store Implementations
// =============================================================================

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list_by_seller(&self, seller_id: Uuid, filter: &OrderFilter) -> DbResult<OrderPage> {
        let state = self.state.read().await;

        let mut matching: Vec<&Order> = state
            .orders
            .values()
            .filter(|o| o.seller_id == seller_id)
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as i64;
        let orders = matching
            .into_iter()
            .skip(usize::try_from(filter.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(filter.limit).unwrap_or(0))
            .cloned()
            .collect();

        Ok(OrderPage { orders, total })
    }

    async fn get_by_seller_and_id(&self, seller_id: Uuid, order_id: Uuid) -> DbResult<Order> {
        self.state
            .read()
            .await
            .orders
            .get(&order_id)
            .filter(|o| o.seller_id == seller_id)
            .cloned()
            .ok_or_else(|| DbError::not_found("Order", order_id))
    }

    async fn update(&self, order_id: Uuid, patch: &OrderPatch) -> DbResult<Order> {
        let mut state = self.state.write().await;
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| DbError::not_found("Order", order_id))?;

        patch.apply_to(order, Utc::now());
        Ok(order.clone())
    }

    async fn order_counts(&self, seller_id: Uuid) -> DbResult<OrderCounts> {
        let state = self.state.read().await;
        let mut counts = OrderCounts::default();
        for order in state.orders.values().filter(|o| o.seller_id == seller_id) {
            counts.total += 1;
            if order.status.awaits_fulfillment() {
                counts.pending += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl PaymentLedger for MemoryStore {
    async fn settlement_snapshot(&self, seller_id: Uuid) -> DbResult<SettlementSnapshot> {
        let state = self.state.read().await;

        let mut seller_orders: Vec<&Order> = state
            .orders
            .values()
            .filter(|o| o.seller_id == seller_id)
            .collect();
        seller_orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let settled = seller_orders
            .into_iter()
            .filter_map(|o| {
                let payment = state.payments.get(&o.id)?;
                payment.status.is_settled().then_some(SettledPayment {
                    order_id: o.id,
                    amount: payment.amount,
                    platform_fee: payment.platform_fee,
                })
            })
            .collect();

        let claimed = state
            .payouts
            .iter()
            .filter(|p| p.seller_id == seller_id && p.status.claims_orders())
            .flat_map(|p| p.order_ids.iter().copied())
            .collect();

        Ok(SettlementSnapshot { settled, claimed })
    }

    async fn gross_revenue(&self, seller_id: Uuid) -> DbResult<Money> {
        let state = self.state.read().await;
        let amounts = state
            .orders
            .values()
            .filter(|o| o.seller_id == seller_id)
            .filter_map(|o| state.payments.get(&o.id))
            .filter(|p| p.status.is_settled())
            .map(|p| p.amount);

        Money::checked_sum(amounts)
            .ok_or_else(|| DbError::QueryFailed("bigint out of range".to_string()))
    }
}

#[async_trait]
impl SellerStore for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Option<SellerProfile>> {
        Ok(self
            .state
            .read()
            .await
            .sellers
            .values()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn create(&self, profile: &SellerProfile) -> DbResult<SellerProfile> {
        let mut state = self.state.write().await;
        if state.sellers.values().any(|s| s.user_id == profile.user_id) {
            return Err(DbError::UniqueViolation {
                constraint: "seller_profiles_user_id_key".to_string(),
            });
        }
        state.sellers.insert(profile.id, profile.clone());
        Ok(profile.clone())
    }

    async fn update_profile(
        &self,
        seller_id: Uuid,
        update: &SellerProfileUpdate,
    ) -> DbResult<SellerProfile> {
        let mut state = self.state.write().await;
        let profile = state
            .sellers
            .get_mut(&seller_id)
            .ok_or_else(|| DbError::not_found("SellerProfile", seller_id))?;

        update.apply_to(profile, Utc::now());
        Ok(profile.clone())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn promote_to_seller(&self, user_id: Uuid) -> DbResult<bool> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user_id) {
            Some(role) if *role == UserRole::Buyer => {
                *role = UserRole::Seller;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn product_counts(&self, seller_id: Uuid) -> DbResult<ProductCounts> {
        let state = self.state.read().await;
        let mut counts = ProductCounts::default();
        for product in state.products.iter().filter(|p| p.seller_id == seller_id) {
            counts.total += 1;
            if product.is_active {
                counts.active += 1;
            }
        }
        Ok(counts)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
