//! # Seller Application Service
//!
//! Turns a user account into a seller and maintains the seller's profile.
//!
//! ## Apply
//! ```text
//! POST /seller/apply
//!      │
//!      ├─ validate fields                 ── bad ─────► InvalidInput
//!      ├─ SellerStore::find_by_user       ── exists ──► Conflict
//!      ├─ SellerStore::create             ── unique ──► Conflict (lost race)
//!      └─ UserStore::promote_to_seller    (after the profile row exists)
//! ```

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use bazaar_core::validation::{validate_profile_update, validate_seller_application};
use bazaar_core::{SellerProfile, SellerProfileUpdate};
use bazaar_db::{DbError, SellerStore, UserStore};

use super::error::{ServiceError, ServiceResult};

const ALREADY_A_SELLER: &str = "a seller profile already exists for this user";

pub struct SellerApplicationService {
    sellers: Arc<dyn SellerStore>,
    users: Arc<dyn UserStore>,
}

impl SellerApplicationService {
    pub fn new(sellers: Arc<dyn SellerStore>, users: Arc<dyn UserStore>) -> Self {
        Self { sellers, users }
    }

    /// Creates the caller's seller profile and promotes the account.
    #[instrument(skip(self, fields))]
    pub async fn apply(
        &self,
        user_id: Uuid,
        fields: &SellerProfileUpdate,
    ) -> ServiceResult<SellerProfile> {
        let application = validate_seller_application(fields)?;

        let existing = self
            .sellers
            .find_by_user(user_id)
            .await
            .map_err(|e| ServiceError::user_storage("find seller", user_id, e))?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(ALREADY_A_SELLER.to_string()));
        }

        let profile = match self
            .sellers
            .create(&application.into_profile(user_id, Utc::now()))
            .await
        {
            Ok(profile) => profile,
            Err(DbError::UniqueViolation { constraint }) => {
                warn!(%user_id, constraint = %constraint, "Concurrent seller application lost");
                return Err(ServiceError::Conflict(ALREADY_A_SELLER.to_string()));
            }
            Err(e) => return Err(ServiceError::user_storage("create seller", user_id, e)),
        };

        let promoted = self
            .users
            .promote_to_seller(user_id)
            .await
            .map_err(|e| ServiceError::user_storage("promote user", user_id, e))?;

        info!(seller_id = %profile.id, promoted, "Seller profile created");
        Ok(profile)
    }

    /// The seller profile owned by `user_id`.
    pub async fn current_seller(&self, user_id: Uuid) -> ServiceResult<SellerProfile> {
        self.sellers
            .find_by_user(user_id)
            .await
            .map_err(|e| ServiceError::user_storage("find seller", user_id, e))?
            .ok_or_else(|| ServiceError::NotFound("seller profile not found".to_string()))
    }

    /// Writes the supplied business fields. An empty update returns the
    /// profile unchanged.
    pub async fn update_profile(
        &self,
        profile: SellerProfile,
        fields: &SellerProfileUpdate,
    ) -> ServiceResult<SellerProfile> {
        let update = validate_profile_update(fields)?;
        if update.is_empty() {
            return Ok(profile);
        }

        self.sellers
            .update_profile(profile.id, &update)
            .await
            .map_err(|e| ServiceError::storage("update seller", profile.id, e))
    }
}
