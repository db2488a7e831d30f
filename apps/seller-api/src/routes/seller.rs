//! # Seller Profile API
//!
//! Applying to become a seller and maintaining the business details.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use bazaar_core::SellerProfileUpdate;

use crate::auth::{AuthenticatedUser, CurrentSeller};
use crate::dto::{SellerDetailsRequest, SellerProfileResponse};
use crate::error::{extract_json, ApiError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/seller/apply", post(apply))
        .route("/seller/profile", get(profile).put(update_profile))
}

/// POST /seller/apply: create the caller's seller profile.
async fn apply(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    body: Result<Json<SellerDetailsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SellerProfileResponse>), ApiError> {
    let fields: SellerProfileUpdate = extract_json(body)?.into();
    let seller_profile = state.sellers.apply(user.user_id, &fields).await?;
    Ok((StatusCode::CREATED, Json(SellerProfileResponse { seller_profile })))
}

/// GET /seller/profile
async fn profile(seller: CurrentSeller) -> Json<SellerProfileResponse> {
    Json(SellerProfileResponse {
        seller_profile: seller.profile,
    })
}

/// PUT /seller/profile: change only the supplied fields.
async fn update_profile(
    State(state): State<AppState>,
    seller: CurrentSeller,
    body: Result<Json<SellerDetailsRequest>, JsonRejection>,
) -> Result<Json<SellerProfileResponse>, ApiError> {
    let fields: SellerProfileUpdate = extract_json(body)?.into();
    let seller_profile = state.sellers.update_profile(seller.profile, &fields).await?;
    Ok(Json(SellerProfileResponse { seller_profile }))
}
