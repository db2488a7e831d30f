//! Request and response bodies of the seller API.
//!
//! Everything here exports a TypeScript definition for the seller
//! dashboard. Amounts are integer cents; `*_display` fields are preformatted
//! strings such as `"$142.50"`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use bazaar_core::{
    Money, Order, OrderFilter, OrderPage, PendingPayout, SellerProfile, SellerProfileUpdate,
    SellerStats,
};

// =============================================================================
// Seller
// =============================================================================

/// Body of `POST /seller/apply` and `PUT /seller/profile`.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct SellerDetailsRequest {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
}

impl From<SellerDetailsRequest> for SellerProfileUpdate {
    fn from(req: SellerDetailsRequest) -> Self {
        SellerProfileUpdate {
            business_name: req.business_name,
            business_type: req.business_type,
            description: req.description,
            business_email: req.business_email,
            business_phone: req.business_phone,
            business_address: req.business_address,
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SellerProfileResponse {
    pub seller_profile: SellerProfile,
}

// =============================================================================
// Orders
// =============================================================================

/// Query string of `GET /seller/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body of `PATCH /seller/orders/:id/status`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub tracking_number: Option<String>,
    pub seller_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl OrderListResponse {
    pub fn new(page: OrderPage, filter: &OrderFilter) -> Self {
        Self {
            page: filter.page(),
            pages: filter.pages(page.total),
            total: page.total,
            orders: page.orders,
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct OrderResponse {
    pub order: Order,
}

// =============================================================================
// Dashboard & Payouts
// =============================================================================

/// `GET /seller/dashboard/stats`.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DashboardStatsResponse {
    pub total_orders: i64,
    pub total_revenue_cents: i64,
    pub pending_orders: i64,
    pub total_products: i64,
    pub active_products: i64,
    pub pending_payout_cents: i64,
    pub pending_payout_display: String,
}

impl DashboardStatsResponse {
    pub fn new(stats: SellerStats, pending: Money) -> Self {
        Self {
            total_orders: stats.total_orders,
            total_revenue_cents: stats.total_revenue_cents,
            pending_orders: stats.pending_orders,
            total_products: stats.total_products,
            active_products: stats.active_products,
            pending_payout_cents: pending.cents(),
            pending_payout_display: pending.to_string(),
        }
    }
}

/// `GET /seller/payouts/pending`.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PendingPayoutResponse {
    pub pending_payout_cents: i64,
    pub pending_payout_display: String,
    #[ts(as = "Vec<String>")]
    pub order_ids: Vec<uuid::Uuid>,
}

impl From<PendingPayout> for PendingPayoutResponse {
    fn from(pending: PendingPayout) -> Self {
        Self {
            pending_payout_cents: pending.amount.cents(),
            pending_payout_display: pending.amount.to_string(),
            order_ids: pending.eligible_order_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_paging() {
        let filter = OrderFilter {
            status: None,
            limit: 20,
            offset: 40,
        };
        let response = OrderListResponse::new(
            OrderPage {
                orders: Vec::new(),
                total: 41,
            },
            &filter,
        );
        assert_eq!(response.page, 3);
        assert_eq!(response.pages, 3);
        assert_eq!(response.total, 41);
    }

    #[test]
    fn test_dashboard_display_is_exact() {
        let response = DashboardStatsResponse::new(SellerStats::default(), Money::from_cents(14_250));
        assert_eq!(response.pending_payout_cents, 14_250);
        assert_eq!(response.pending_payout_display, "$142.50");
    }
}
