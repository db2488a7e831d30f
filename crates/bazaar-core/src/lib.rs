//! # bazaar-core: Pure Business Logic for the Bazaar Seller Backend
//!
//! This crate holds the seller-side business rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bazaar Seller Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Seller Dashboard (React)                        │   │
//! │  │    Orders ──► Fulfillment ──► Stats ──► Payouts                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  seller-api (axum)                              │   │
//! │  │    auth gate, services, routes                                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   money   │  │ fulfillment │  │  payout  │  │   │
//! │  │   │  Order    │  │   Money   │  │ StatusMach. │  │ reconcile│  │   │
//! │  │   │  Seller   │  │ Commission│  │   Policy    │  │          │  │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  bazaar-db (Database Layer)                     │   │
//! │  │           PostgreSQL queries, migrations, repositories          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, SellerProfile, settlement snapshot)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules for filters and seller details
//! - [`fulfillment`] - Order status machine
//! - [`payout`] - Withdrawable balance reconciliation
//! - [`stats`] - Dashboard roll-up
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let net = Money::from_cents(10_000) - Money::from_cents(500);
//! assert_eq!(net.to_string(), "$95.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fulfillment;
pub mod money;
pub mod payout;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use fulfillment::{FulfillmentExtras, OrderStatusMachine, TransitionPolicy};
pub use money::{CommissionRate, Money};
pub use payout::PendingPayout;
pub use types::*;
