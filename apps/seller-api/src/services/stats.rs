//! Seller dashboard statistics.

use std::sync::Arc;

use uuid::Uuid;

use bazaar_core::{stats, SellerStats};
use bazaar_db::{OrderStore, PaymentLedger, ProductStore};

use super::error::{ServiceError, ServiceResult};

/// Rolls order, product and revenue counters into [`SellerStats`].
///
/// The three reads are independent and run concurrently.
pub struct SellerStatsAggregator {
    orders: Arc<dyn OrderStore>,
    products: Arc<dyn ProductStore>,
    ledger: Arc<dyn PaymentLedger>,
}

impl SellerStatsAggregator {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        products: Arc<dyn ProductStore>,
        ledger: Arc<dyn PaymentLedger>,
    ) -> Self {
        Self {
            orders,
            products,
            ledger,
        }
    }

    pub async fn stats(&self, seller_id: Uuid) -> ServiceResult<SellerStats> {
        let (orders, products, revenue) = tokio::try_join!(
            async {
                self.orders
                    .order_counts(seller_id)
                    .await
                    .map_err(|e| ServiceError::storage("count orders", seller_id, e))
            },
            async {
                self.products
                    .product_counts(seller_id)
                    .await
                    .map_err(|e| ServiceError::storage("count products", seller_id, e))
            },
            async {
                self.ledger
                    .gross_revenue(seller_id)
                    .await
                    .map_err(|e| ServiceError::storage("sum revenue", seller_id, e))
            },
        )?;

        Ok(stats::roll_up(orders, products, revenue))
    }
}
