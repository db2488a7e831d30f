//! # Repository Module
//!
//! PostgreSQL implementations of the store traits.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Service (seller-api)                                                  │
//! │       │                                                                 │
//! │       │  orders.get_by_seller_and_id(seller, id)                       │
//! │       ▼                                                                 │
//! │  dyn OrderStore ──► OrderRepository                                    │
//! │                     ├── list_by_seller(&self, seller, filter)          │
//! │                     ├── get_by_seller_and_id(&self, seller, id)        │
//! │                     ├── update(&self, id, patch)                       │
//! │                     └── order_counts(&self, seller)                    │
//! │       │                                                                 │
//! │       │  SQL (bound parameters), FromRow records                        │
//! │       ▼                                                                 │
//! │  PostgreSQL                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`order::OrderRepository`] - Order listing, reads, fulfillment updates
//! - [`payment::PaymentRepository`] - Settlement snapshots and revenue
//! - [`seller::SellerRepository`] - Seller profiles
//! - [`user::UserRepository`] - Role promotion
//! - [`product::ProductRepository`] - Product counters

pub mod order;
pub mod payment;
pub mod product;
pub mod seller;
pub mod user;
