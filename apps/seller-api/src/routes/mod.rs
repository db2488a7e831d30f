//! # Seller API Routes
//!
//! | Path                              | Module        |
//! |-----------------------------------|---------------|
//! | `/seller/apply`, `/seller/profile`| [`seller`]    |
//! | `/seller/orders/*`                | [`orders`]    |
//! | `/seller/dashboard/stats`         | [`dashboard`] |
//! | `/seller/payouts/pending`         | [`payouts`]   |
//!
//! Every route authenticates through the [`crate::auth`] extractors.

pub mod dashboard;
pub mod orders;
pub mod payouts;
pub mod seller;

use axum::Router;

use crate::state::AppState;

/// All seller routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(seller::router())
        .merge(orders::router())
        .merge(dashboard::router())
        .merge(payouts::router())
}
