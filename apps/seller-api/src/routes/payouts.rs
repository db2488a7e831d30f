//! # Seller Payouts API

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::CurrentSeller;
use crate::dto::PendingPayoutResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/seller/payouts/pending", get(pending))
}

/// GET /seller/payouts/pending: withdrawable balance and its orders.
async fn pending(
    State(state): State<AppState>,
    seller: CurrentSeller,
) -> Result<Json<PendingPayoutResponse>, ApiError> {
    let pending = state.payouts.pending_payout(seller.seller_id()).await?;
    Ok(Json(pending.into()))
}
