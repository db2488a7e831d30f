//! # bazaar-db: Database Layer for the Bazaar Seller Backend
//!
//! This crate provides database access for the seller backend.
//! It uses PostgreSQL with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Seller Data Flow                                 │
//! │                                                                         │
//! │  seller-api service (OrderService::transition)                         │
//! │       │                                                                 │
//! │       ▼  Arc<dyn OrderStore>                                            │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bazaar-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (store.rs    │    │  (embedded)  │  │   │
//! │  │   │               │    │   traits)     │    │              │  │   │
//! │  │   │ PgPool        │    │ OrderRepo     │    │ 0001_market  │  │   │
//! │  │   │ statement_    │◄───│ PaymentRepo   │    │  place.sql   │  │   │
//! │  │   │  timeout      │    │ SellerRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   MemoryStore (feature "memory") implements the same traits     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     PostgreSQL                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`store`] - Store traits consumed by the services
//! - [`repository`] - PostgreSQL repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bazaar_db::{Database, DbConfig, OrderStore};
//!
//! let db = Database::new(DbConfig::new("postgres://localhost/bazaar")).await?;
//! let order = db.orders().get_by_seller_and_id(seller_id, order_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use store::{OrderStore, PaymentLedger, ProductStore, SellerStore, UserStore};

// Repository re-exports for convenience
pub use repository::order::OrderRepository;
pub use repository::payment::PaymentRepository;
pub use repository::product::ProductRepository;
pub use repository::seller::SellerRepository;
pub use repository::user::UserRepository;
