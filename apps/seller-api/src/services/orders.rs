//! # Order Fulfillment Service
//!
//! Lists a seller's orders and drives status transitions.
//!
//! ## Transition
//! ```text
//! PATCH /seller/orders/:id/status {status, tracking_number?, seller_notes?}
//!      │
//!      ├─ 1. parse status          ── unknown ──► InvalidInput (no write)
//!      ├─ 2. trim/limit extras     ── too long ─► InvalidInput (no write)
//!      ├─ 3. load owned order      ── foreign ──► NotFound
//!      ├─ 4. OrderStatusMachine    ── policy ───► InvalidTransition
//!      └─ 5. OrderStore::update    ──► stored order
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use bazaar_core::validation::{validate_order_filter, validate_order_status, PageLimits};
use bazaar_core::{FulfillmentExtras, Order, OrderFilter, OrderPage, OrderStatusMachine};
use bazaar_db::OrderStore;

use super::error::{ServiceError, ServiceResult};

/// Raw listing parameters as received from the query string.
#[derive(Debug, Clone, Default)]
pub struct ListOrdersParams<'a> {
    pub status: Option<&'a str>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Raw status change request.
#[derive(Debug, Clone, Default)]
pub struct StatusChange<'a> {
    pub status: &'a str,
    pub tracking_number: Option<&'a str>,
    pub seller_notes: Option<&'a str>,
}

pub struct OrderFulfillmentService {
    orders: Arc<dyn OrderStore>,
    machine: OrderStatusMachine,
    limits: PageLimits,
}

impl OrderFulfillmentService {
    pub fn new(orders: Arc<dyn OrderStore>, machine: OrderStatusMachine, limits: PageLimits) -> Self {
        Self {
            orders,
            machine,
            limits,
        }
    }

    /// One page of the seller's orders plus the filter that produced it.
    pub async fn list(
        &self,
        seller_id: Uuid,
        params: ListOrdersParams<'_>,
    ) -> ServiceResult<(OrderPage, OrderFilter)> {
        let filter = validate_order_filter(params.status, params.limit, params.offset, self.limits)?;

        let page = self
            .orders
            .list_by_seller(seller_id, &filter)
            .await
            .map_err(|e| ServiceError::storage("list orders", seller_id, e))?;

        Ok((page, filter))
    }

    /// A single order owned by the seller.
    pub async fn get(&self, seller_id: Uuid, order_id: Uuid) -> ServiceResult<Order> {
        self.orders
            .get_by_seller_and_id(seller_id, order_id)
            .await
            .map_err(|e| ServiceError::storage("get order", seller_id, e))
    }

    /// Moves an owned order to a new status and returns the stored order.
    #[instrument(skip(self, change), fields(status = change.status))]
    pub async fn transition(
        &self,
        seller_id: Uuid,
        order_id: Uuid,
        change: StatusChange<'_>,
    ) -> ServiceResult<Order> {
        let requested = validate_order_status(change.status)?;
        let extras = FulfillmentExtras::new(change.tracking_number, change.seller_notes)?;

        let order = self.get(seller_id, order_id).await?;
        let patch = self.machine.plan(&order, requested, extras, Utc::now())?;

        let updated = self
            .orders
            .update(order.id, &patch)
            .await
            .map_err(|e| ServiceError::storage("update order", seller_id, e))?;

        info!(from = %order.status, to = %updated.status, "Order status changed");
        Ok(updated)
    }
}
