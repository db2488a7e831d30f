//! # Seller Orders API
//!
//! Listing, reading and fulfilling the caller's orders. Orders of other
//! sellers answer 404 exactly like missing ones.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

use crate::auth::CurrentSeller;
use crate::dto::{ListOrdersQuery, OrderListResponse, OrderResponse, UpdateStatusRequest};
use crate::error::{extract_json, extract_path, extract_query, ApiError};
use crate::services::{ListOrdersParams, StatusChange};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/seller/orders", get(list_orders))
        .route("/seller/orders/:id", get(get_order))
        .route("/seller/orders/:id/status", patch(update_status))
}

/// GET /seller/orders?status=&limit=&offset=
async fn list_orders(
    State(state): State<AppState>,
    seller: CurrentSeller,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> Result<Json<OrderListResponse>, ApiError> {
    let query = extract_query(query)?;
    let (page, filter) = state
        .orders
        .list(
            seller.seller_id(),
            ListOrdersParams {
                status: query.status.as_deref(),
                limit: query.limit,
                offset: query.offset,
            },
        )
        .await?;

    Ok(Json(OrderListResponse::new(page, &filter)))
}

/// GET /seller/orders/:id
async fn get_order(
    State(state): State<AppState>,
    seller: CurrentSeller,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = extract_path(path)?;
    let order = state.orders.get(seller.seller_id(), order_id).await?;
    Ok(Json(OrderResponse { order }))
}

/// PATCH /seller/orders/:id/status
async fn update_status(
    State(state): State<AppState>,
    seller: CurrentSeller,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = extract_path(path)?;
    let req = extract_json(body)?;

    let order = state
        .orders
        .transition(
            seller.seller_id(),
            order_id,
            StatusChange {
                status: &req.status,
                tracking_number: req.tracking_number.as_deref(),
                seller_notes: req.seller_notes.as_deref(),
            },
        )
        .await?;

    Ok(Json(OrderResponse { order }))
}
