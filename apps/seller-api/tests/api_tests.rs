//! End-to-end tests for the seller API.
//!
//! Each test drives the real router with `oneshot`, backed by the in-memory
//! store and real HS256 tokens.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use bazaar_core::{
    OrderStatus, PaymentStatus, PayoutStatus, SellerApplication, SellerProfile, TransitionPolicy,
    UserRole,
};
use bazaar_db::MemoryStore;
use bazaar_seller_api::auth::JwtAuthGate;
use bazaar_seller_api::config::ServiceOptions;
use bazaar_seller_api::{app, AppState, Stores};

// -- Helpers ------------------------------------------------------------------

const SECRET: &str = "integration-test-secret";

struct Harness {
    store: MemoryStore,
    gate: Arc<JwtAuthGate>,
    app: Router,
}

impl Harness {
    fn new() -> Self {
        Self::with_options(ServiceOptions::default())
    }

    fn with_options(options: ServiceOptions) -> Self {
        let store = MemoryStore::new();
        let gate = Arc::new(JwtAuthGate::new(SECRET, 3600));
        let state = AppState::new(Stores::shared(store.clone()), gate.clone(), options);
        Self {
            store,
            gate,
            app: app(state),
        }
    }

    /// A buyer account and its token.
    async fn buyer(&self) -> (Uuid, String) {
        let user = Uuid::new_v4();
        self.store.insert_user(user, UserRole::Buyer).await;
        let token = self.gate.issue_token(user, UserRole::Buyer).unwrap();
        (user, token)
    }

    /// A seller with a profile, and its token.
    async fn seller(&self, name: &str) -> (SellerProfile, String) {
        let user = Uuid::new_v4();
        self.store.insert_user(user, UserRole::Seller).await;
        let profile = SellerApplication {
            business_name: name.to_string(),
            ..SellerApplication::default()
        }
        .into_profile(user, Utc::now());
        self.store.insert_seller(profile.clone()).await;
        let token = self.gate.issue_token(user, UserRole::Seller).unwrap();
        (profile, token)
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    async fn patch_status(&self, order_id: Uuid, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Method::PATCH,
            &format!("/seller/orders/{order_id}/status"),
            Some(token),
            Some(body),
        )
        .await
    }
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

// -- Health -------------------------------------------------------------------

#[tokio::test]
async fn health_probes_need_no_token() {
    let h = Harness::new();

    let (status, body) = h.send(Method::GET, "/health/liveness", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));

    let (status, body) = h.send(Method::GET, "/health/readiness", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ready".to_string()));
}

// -- Authentication -----------------------------------------------------------

#[tokio::test]
async fn missing_or_bad_token_is_unauthenticated() {
    let h = Harness::new();

    let (status, body) = h.send(Method::GET, "/seller/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHENTICATED");

    let foreign = JwtAuthGate::new("someone-else", 3600)
        .issue_token(Uuid::new_v4(), UserRole::Seller)
        .unwrap();
    let (status, _) = h.get("/seller/orders", &foreign).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_without_profile_gets_not_found() {
    let h = Harness::new();
    let (_, token) = h.buyer().await;

    let (status, body) = h.get("/seller/dashboard/stats", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "seller profile not found");
}

// -- Seller application -------------------------------------------------------

#[tokio::test]
async fn apply_creates_profile_and_promotes_user() {
    let h = Harness::new();
    let (user, token) = h.buyer().await;

    let (status, body) = h
        .send(
            Method::POST,
            "/seller/apply",
            Some(&token),
            Some(json!({
                "business_name": "  Clay & Co  ",
                "business_email": "hi@clay.example",
                "business_phone": "   "
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let profile = &body["seller_profile"];
    assert_eq!(profile["business_name"], "Clay & Co");
    assert_eq!(profile["kyc_status"], "pending");
    assert_eq!(profile["business_phone"], Value::Null);
    assert_eq!(profile["user_id"], user.to_string());
    assert_eq!(h.store.user_role(user).await, Some(UserRole::Seller));

    let (status, body) = h.get("/seller/profile", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seller_profile"]["business_name"], "Clay & Co");
}

#[tokio::test]
async fn apply_twice_conflicts() {
    let h = Harness::new();
    let (_, token) = h.buyer().await;
    let body = json!({ "business_name": "Clay & Co" });

    let (first, _) = h
        .send(Method::POST, "/seller/apply", Some(&token), Some(body.clone()))
        .await;
    let (second, err) = h
        .send(Method::POST, "/seller/apply", Some(&token), Some(body))
        .await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(error_code(&err), "CONFLICT");
}

#[tokio::test]
async fn concurrent_applications_yield_one_profile() {
    let h = Harness::new();
    let (_, token) = h.buyer().await;
    let body = json!({ "business_name": "Clay & Co" });

    let (a, b) = tokio::join!(
        h.send(Method::POST, "/seller/apply", Some(&token), Some(body.clone())),
        h.send(Method::POST, "/seller/apply", Some(&token), Some(body.clone())),
    );

    let mut statuses = [a.0.as_u16(), b.0.as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [201, 409]);
}

#[tokio::test]
async fn apply_without_business_name_is_invalid() {
    let h = Harness::new();
    let (_, token) = h.buyer().await;

    let (status, body) = h
        .send(
            Method::POST,
            "/seller/apply",
            Some(&token),
            Some(json!({ "description": "no name" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let h = Harness::new();
    let (_, token) = h.buyer().await;

    let (status, body) = h
        .send(
            Method::POST,
            "/seller/apply",
            Some(&token),
            Some(json!({ "business_name": 42 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn profile_update_changes_only_supplied_fields() {
    let h = Harness::new();
    let (_, token) = h.seller("Clay & Co").await;

    let (status, body) = h
        .send(
            Method::PUT,
            "/seller/profile",
            Some(&token),
            Some(json!({ "description": "Stoneware" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seller_profile"]["business_name"], "Clay & Co");
    assert_eq!(body["seller_profile"]["description"], "Stoneware");

    let (status, _) = h
        .send(
            Method::PUT,
            "/seller/profile",
            Some(&token),
            Some(json!({ "business_email": "not-an-email" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// -- Orders -------------------------------------------------------------------

#[tokio::test]
async fn list_orders_pages_newest_first() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    let start = Utc::now() - Duration::days(1);
    let mut ids = Vec::new();
    for n in 0..5 {
        let order = h
            .store
            .insert_order(seller.id, OrderStatus::Pending, 1_000, start + Duration::minutes(n))
            .await;
        ids.push(order.id);
    }

    let (status, body) = h.get("/seller/orders?limit=2&offset=2", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["page"], 2);
    assert_eq!(body["pages"], 3);
    let listed: Vec<&str> = body["orders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, [ids[2].to_string(), ids[1].to_string()]);
}

#[tokio::test]
async fn list_orders_past_the_end_reports_saturated_page() {
    let h = Harness::new();
    let (seller, token) = h.seller("Far Shelf").await;
    h.store
        .insert_order(seller.id, OrderStatus::Pending, 1_000, Utc::now())
        .await;

    let uri = format!("/seller/orders?limit=1&offset={}", i64::MAX);
    let (status, body) = h.get(&uri, &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], i64::MAX);
    assert_eq!(body["pages"], 1);
    assert!(body["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_orders_filters_by_status() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    h.store
        .insert_order(seller.id, OrderStatus::Pending, 1_000, Utc::now())
        .await;
    let shipped = h
        .store
        .insert_order(seller.id, OrderStatus::Shipped, 1_000, Utc::now())
        .await;

    let (status, body) = h.get("/seller/orders?status=shipped", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["orders"][0]["id"], shipped.id.to_string());
}

#[tokio::test]
async fn list_orders_rejects_bad_parameters() {
    let h = Harness::new();
    let (_, token) = h.seller("Clay & Co").await;

    let (status, body) = h.get("/seller/orders?status=lost", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");

    let (status, body) = h.get("/seller/orders?offset=-1", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");

    let (status, body) = h.get("/seller/orders?limit=many", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn shipping_twice_keeps_first_shipped_at() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    let order = h
        .store
        .insert_order(seller.id, OrderStatus::Pending, 1_000, Utc::now())
        .await;

    let (status, first) = h
        .patch_status(order.id, &token, json!({ "status": "shipped" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let shipped_at = first["order"]["shipped_at"].clone();
    assert!(shipped_at.is_string());

    let (status, second) = h
        .patch_status(
            order.id,
            &token,
            json!({ "status": "shipped", "tracking_number": "1Z999AA1" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["order"]["shipped_at"], shipped_at);
    assert_eq!(second["order"]["tracking_number"], "1Z999AA1");
}

#[tokio::test]
async fn delivering_sets_delivered_at_and_keeps_notes() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    let order = h
        .store
        .insert_order(seller.id, OrderStatus::Shipped, 1_000, Utc::now())
        .await;

    let (_, body) = h
        .patch_status(
            order.id,
            &token,
            json!({ "status": "processing", "seller_notes": "gift wrap" }),
        )
        .await;
    assert_eq!(body["order"]["seller_notes"], "gift wrap");

    let (status, body) = h
        .patch_status(order.id, &token, json!({ "status": "delivered", "seller_notes": "" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["status"], "delivered");
    assert!(body["order"]["delivered_at"].is_string());
    assert_eq!(body["order"]["seller_notes"], "gift wrap");
}

#[tokio::test]
async fn bogus_status_is_rejected_without_write() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    let order = h
        .store
        .insert_order(seller.id, OrderStatus::Pending, 1_000, Utc::now())
        .await;

    let (status, body) = h
        .patch_status(
            order.id,
            &token,
            json!({ "status": "bogus", "tracking_number": "1Z" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");
    assert_eq!(h.store.order(order.id).await.unwrap(), order);
}

#[tokio::test]
async fn other_sellers_orders_are_not_found() {
    let h = Harness::new();
    let (owner, _) = h.seller("Clay & Co").await;
    let (_, intruder) = h.seller("Glass Works").await;
    let order = h
        .store
        .insert_order(owner.id, OrderStatus::Pending, 1_000, Utc::now())
        .await;

    let (status, _) = h.get(&format!("/seller/orders/{}", order.id), &intruder).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = h
        .patch_status(order.id, &intruder, json!({ "status": "cancelled" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
    assert_eq!(h.store.order(order.id).await.unwrap(), order);

    let (status, _) = h
        .get(&format!("/seller/orders/{}", Uuid::new_v4()), &intruder)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_order_id_is_bad_request() {
    let h = Harness::new();
    let (_, token) = h.seller("Clay & Co").await;

    let (status, body) = h.get("/seller/orders/not-a-uuid", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[tokio::test]
async fn permissive_policy_allows_moving_back() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    let order = h
        .store
        .insert_order(seller.id, OrderStatus::Processing, 1_000, Utc::now())
        .await;

    let (status, body) = h
        .patch_status(order.id, &token, json!({ "status": "pending" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["status"], "pending");
}

#[tokio::test]
async fn monotonic_policy_refuses_moving_back() {
    let h = Harness::with_options(ServiceOptions {
        policy: TransitionPolicy::Monotonic,
        ..ServiceOptions::default()
    });
    let (seller, token) = h.seller("Clay & Co").await;
    let order = h
        .store
        .insert_order(seller.id, OrderStatus::Delivered, 1_000, Utc::now())
        .await;

    let (status, body) = h
        .patch_status(order.id, &token, json!({ "status": "pending" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "INVALID_TRANSITION");
    assert_eq!(
        h.store.order(order.id).await.unwrap().status,
        OrderStatus::Delivered
    );
}

// -- Dashboard & payouts ------------------------------------------------------

#[tokio::test]
async fn pending_payout_excludes_paid_orders() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    let first = h
        .store
        .insert_order(seller.id, OrderStatus::Delivered, 10_000, Utc::now())
        .await;
    let second = h
        .store
        .insert_order(seller.id, OrderStatus::Delivered, 5_000, Utc::now())
        .await;
    h.store
        .insert_payment(first.id, PaymentStatus::Succeeded, 10_000, 500)
        .await;
    h.store
        .insert_payment(second.id, PaymentStatus::Succeeded, 5_000, 250)
        .await;

    let (status, body) = h.get("/seller/dashboard/stats", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pending_payout_cents"], 14_250);
    assert_eq!(body["pending_payout_display"], "$142.50");

    h.store
        .insert_payout(seller.id, PayoutStatus::Paid, &[first.id])
        .await;

    let (_, body) = h.get("/seller/dashboard/stats", &token).await;
    assert_eq!(body["pending_payout_cents"], 4_750);
    assert_eq!(body["pending_payout_display"], "$47.50");

    let (status, body) = h.get("/seller/payouts/pending", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pending_payout_cents"], 4_750);
    assert_eq!(body["order_ids"], json!([second.id.to_string()]));
}

#[tokio::test]
async fn requested_and_failed_payouts_do_not_claim_orders() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    let order = h
        .store
        .insert_order(seller.id, OrderStatus::Delivered, 2_000, Utc::now())
        .await;
    h.store
        .insert_payment(order.id, PaymentStatus::Succeeded, 2_000, 200)
        .await;
    h.store
        .insert_payout(seller.id, PayoutStatus::Requested, &[order.id])
        .await;
    h.store
        .insert_payout(seller.id, PayoutStatus::Failed, &[order.id])
        .await;

    let (_, body) = h.get("/seller/payouts/pending", &token).await;
    assert_eq!(body["pending_payout_cents"], 1_800);
}

#[tokio::test]
async fn dashboard_stats_roll_up_counters() {
    let h = Harness::new();
    let (seller, token) = h.seller("Clay & Co").await;
    let (other, _) = h.seller("Glass Works").await;

    for status in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ] {
        let order = h
            .store
            .insert_order(seller.id, status, 3_000, Utc::now())
            .await;
        let payment = if status == OrderStatus::Cancelled {
            PaymentStatus::Refunded
        } else {
            PaymentStatus::Succeeded
        };
        h.store.insert_payment(order.id, payment, 3_000, 300).await;
    }
    h.store
        .insert_order(other.id, OrderStatus::Pending, 9_999, Utc::now())
        .await;
    h.store.insert_product(seller.id, true).await;
    h.store.insert_product(seller.id, true).await;
    h.store.insert_product(seller.id, false).await;

    let (status, body) = h.get("/seller/dashboard/stats", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_orders"], 4);
    assert_eq!(body["pending_orders"], 2);
    assert_eq!(body["total_revenue_cents"], 9_000);
    assert_eq!(body["total_products"], 3);
    assert_eq!(body["active_products"], 2);
    assert_eq!(body["pending_payout_cents"], 8_100);
    assert_eq!(body["pending_payout_display"], "$81.00");
}

#[tokio::test]
async fn new_seller_dashboard_is_zeroed() {
    let h = Harness::new();
    let (_, token) = h.seller("Clay & Co").await;

    let (status, body) = h.get("/seller/dashboard/stats", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_orders"], 0);
    assert_eq!(body["pending_payout_cents"], 0);
    assert_eq!(body["pending_payout_display"], "$0.00");
}
