//! # Bazaar Seller API
//!
//! HTTP server for seller order fulfillment and payout reconciliation.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Seller API                                     │
//! │                                                                         │
//! │  TraceLayer → TimeoutLayer → auth extractors → handler                  │
//! │                                                                         │
//! │  ┌──────────────────────┐  ┌──────────────────────┐                     │
//! │  │ OrderFulfillment     │  │ PayoutCalculator     │                     │
//! │  │ • list / get         │  │ • pending payout     │                     │
//! │  │ • transition         │  │                      │                     │
//! │  └──────────────────────┘  └──────────────────────┘                     │
//! │  ┌──────────────────────┐  ┌──────────────────────┐                     │
//! │  │ SellerStatsAggregator│  │ SellerApplication    │                     │
//! │  │ • dashboard stats    │  │ • apply / profile    │                     │
//! │  └──────────────────────┘  └──────────────────────┘                     │
//! │                                                                         │
//! │  Stores: PostgreSQL (bazaar-db) or the in-memory store in tests         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::Settings`]; every key can be overridden with
//! `BAZAAR__<SECTION>__<KEY>` environment variables.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::Settings;
pub use error::ApiError;
pub use state::{AppState, Stores};

/// Assemble the application router.
///
/// Health probes are mounted outside the request timeout and need no token.
pub fn app(state: AppState) -> Router {
    let api = routes::router()
        .layer(TimeoutLayer::new(state.request_timeout))
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .with_state(state);

    Router::new()
        .merge(health)
        .merge(api)
        .layer(TraceLayer::new_for_http())
}

/// Liveness probe: 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the database answers.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match &state.db {
        Some(db) if !db.health_check().await => (StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
        _ => (StatusCode::OK, "ready"),
    }
}
