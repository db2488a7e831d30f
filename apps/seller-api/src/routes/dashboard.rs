//! # Seller Dashboard API

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::CurrentSeller;
use crate::dto::DashboardStatsResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/seller/dashboard/stats", get(stats))
}

/// GET /seller/dashboard/stats: counters plus the pending payout.
async fn stats(
    State(state): State<AppState>,
    seller: CurrentSeller,
) -> Result<Json<DashboardStatsResponse>, ApiError> {
    let seller_id = seller.seller_id();
    let (stats, pending) = tokio::try_join!(
        state.stats.stats(seller_id),
        state.payouts.pending_payout(seller_id),
    )?;

    Ok(Json(DashboardStatsResponse::new(stats, pending.amount)))
}
