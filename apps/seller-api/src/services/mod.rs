//! Seller services.
//!
//! Each service holds only `Arc<dyn Store>` handles and is shared by every
//! request; none keeps mutable state of its own.

pub mod error;
pub mod orders;
pub mod payouts;
pub mod sellers;
pub mod stats;

pub use error::{ServiceError, ServiceResult};
pub use orders::{ListOrdersParams, OrderFulfillmentService, StatusChange};
pub use payouts::PayoutCalculator;
pub use sellers::SellerApplicationService;
pub use stats::SellerStatsAggregator;
