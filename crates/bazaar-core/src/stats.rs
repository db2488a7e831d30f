//! Dashboard roll-up for a seller.

use crate::money::Money;
use crate::types::{OrderCounts, ProductCounts, SellerStats};

/// Combines the independently-read counters into one dashboard record.
///
/// `revenue` is the gross amount of the seller's succeeded payments.
pub fn roll_up(orders: OrderCounts, products: ProductCounts, revenue: Money) -> SellerStats {
    SellerStats {
        total_orders: orders.total,
        total_revenue_cents: revenue.cents(),
        pending_orders: orders.pending,
        total_products: products.total,
        active_products: products.active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rows_give_zeroed_stats() {
        let stats = roll_up(
            OrderCounts::default(),
            ProductCounts::default(),
            Money::zero(),
        );
        assert_eq!(stats, SellerStats::default());
    }

    #[test]
    fn test_fields_map_through() {
        let stats = roll_up(
            OrderCounts {
                total: 7,
                pending: 3,
            },
            ProductCounts {
                total: 12,
                active: 9,
            },
            Money::from_cents(15_000),
        );
        assert_eq!(stats.total_orders, 7);
        assert_eq!(stats.pending_orders, 3);
        assert_eq!(stats.total_products, 12);
        assert_eq!(stats.active_products, 9);
        assert_eq!(stats.total_revenue_cents, 15_000);
    }
}
