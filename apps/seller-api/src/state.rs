//! # Application State
//!
//! Shared state handed to every route handler via axum's `State`.
//!
//! ```text
//! Stores (Arc<dyn Trait>) ──► services ──► AppState ──► handlers
//!    ▲
//!    ├── Stores::postgres(&Database)     (main)
//!    └── Stores::shared(MemoryStore)     (tests)
//! ```

use std::sync::Arc;
use std::time::Duration;

use bazaar_core::OrderStatusMachine;
use bazaar_db::{Database, OrderStore, PaymentLedger, ProductStore, SellerStore, UserStore};

use crate::auth::AuthGate;
use crate::config::ServiceOptions;
use crate::services::{
    OrderFulfillmentService, PayoutCalculator, SellerApplicationService, SellerStatsAggregator,
};

/// The store handles the services are built from.
#[derive(Clone)]
pub struct Stores {
    pub orders: Arc<dyn OrderStore>,
    pub ledger: Arc<dyn PaymentLedger>,
    pub sellers: Arc<dyn SellerStore>,
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
}

impl Stores {
    /// All five seams backed by one store value.
    pub fn shared<S>(store: S) -> Self
    where
        S: OrderStore + PaymentLedger + SellerStore + UserStore + ProductStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            orders: store.clone(),
            ledger: store.clone(),
            sellers: store.clone(),
            users: store.clone(),
            products: store,
        }
    }

    /// PostgreSQL repositories sharing the database pool.
    pub fn postgres(db: &Database) -> Self {
        Self {
            orders: Arc::new(db.orders()),
            ledger: Arc::new(db.payments()),
            sellers: Arc::new(db.sellers()),
            users: Arc::new(db.users()),
            products: Arc::new(db.products()),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<OrderFulfillmentService>,
    pub payouts: Arc<PayoutCalculator>,
    pub stats: Arc<SellerStatsAggregator>,
    pub sellers: Arc<SellerApplicationService>,
    pub auth: Arc<dyn AuthGate>,
    /// Present when running against PostgreSQL; readiness pings it.
    pub db: Option<Database>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(stores: Stores, auth: Arc<dyn AuthGate>, options: ServiceOptions) -> Self {
        Self {
            orders: Arc::new(OrderFulfillmentService::new(
                stores.orders.clone(),
                OrderStatusMachine::new(options.policy),
                options.page_limits,
            )),
            payouts: Arc::new(PayoutCalculator::new(stores.ledger.clone())),
            stats: Arc::new(SellerStatsAggregator::new(
                stores.orders,
                stores.products,
                stores.ledger,
            )),
            sellers: Arc::new(SellerApplicationService::new(stores.sellers, stores.users)),
            auth,
            db: None,
            request_timeout: options.request_timeout,
        }
    }

    pub fn with_database(mut self, db: Database) -> Self {
        self.db = Some(db);
        self
    }
}
