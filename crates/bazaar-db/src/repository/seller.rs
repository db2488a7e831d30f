//! # Seller Repository
//!
//! Database operations for seller profiles.
//!
//! One profile per user is enforced by `UNIQUE (user_id)`; a racing second
//! insert surfaces as [`DbError::UniqueViolation`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use bazaar_core::{CommissionRate, KycStatus, SellerProfile, SellerProfileUpdate};

use crate::error::{DbError, DbResult};
use crate::store::SellerStore;

const SELLER_COLUMNS: &str = "id, user_id, business_name, business_type, description, \
     business_email, business_phone, business_address, kyc_status, commission_rate, \
     total_sales_cents, total_orders, created_at, updated_at";

/// Row shape of the `seller_profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SellerRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
    pub kyc_status: String,
    pub commission_rate: i32,
    pub total_sales_cents: i64,
    pub total_orders: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SellerRecord> for SellerProfile {
    type Error = DbError;

    fn try_from(row: SellerRecord) -> Result<Self, Self::Error> {
        let kyc_status: KycStatus = row
            .kyc_status
            .parse()
            .map_err(|e| DbError::invalid_row("seller_profile", e))?;
        let bps = u32::try_from(row.commission_rate)
            .map_err(|_| DbError::invalid_row("seller_profile", "negative commission_rate"))?;

        Ok(SellerProfile {
            id: row.id,
            user_id: row.user_id,
            business_name: row.business_name,
            business_type: row.business_type,
            description: row.description,
            business_email: row.business_email,
            business_phone: row.business_phone,
            business_address: row.business_address,
            kyc_status,
            commission_rate: CommissionRate::from_bps(bps),
            total_sales_cents: row.total_sales_cents,
            total_orders: row.total_orders,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for seller profile operations.
#[derive(Debug, Clone)]
pub struct SellerRepository {
    pool: PgPool,
}

impl SellerRepository {
    /// Creates a new SellerRepository.
    pub fn new(pool: PgPool) -> Self {
        SellerRepository { pool }
    }
}

#[async_trait]
impl SellerStore for SellerRepository {
    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Option<SellerProfile>> {
        let row = sqlx::query_as::<_, SellerRecord>(&format!(
            "SELECT {SELLER_COLUMNS} FROM seller_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SellerProfile::try_from).transpose()
    }

    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    async fn create(&self, profile: &SellerProfile) -> DbResult<SellerProfile> {
        let commission_rate = i32::try_from(profile.commission_rate.bps())
            .map_err(|_| DbError::invalid_row("seller_profile", "commission_rate out of range"))?;

        let row = sqlx::query_as::<_, SellerRecord>(&format!(
            r#"
            INSERT INTO seller_profiles (
                id, user_id, business_name, business_type, description,
                business_email, business_phone, business_address,
                kyc_status, commission_rate, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {SELLER_COLUMNS}
            "#
        ))
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.business_name)
        .bind(profile.business_type.as_deref())
        .bind(profile.description.as_deref())
        .bind(profile.business_email.as_deref())
        .bind(profile.business_phone.as_deref())
        .bind(profile.business_address.as_deref())
        .bind(profile.kyc_status.as_str())
        .bind(commission_rate)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;

        info!(seller_id = %row.id, "Seller profile created");
        row.try_into()
    }

    #[instrument(skip(self, update))]
    async fn update_profile(
        &self,
        seller_id: Uuid,
        update: &SellerProfileUpdate,
    ) -> DbResult<SellerProfile> {
        let row = sqlx::query_as::<_, SellerRecord>(&format!(
            r#"
            UPDATE seller_profiles SET
                business_name    = COALESCE($2, business_name),
                business_type    = COALESCE($3, business_type),
                description      = COALESCE($4, description),
                business_email   = COALESCE($5, business_email),
                business_phone   = COALESCE($6, business_phone),
                business_address = COALESCE($7, business_address),
                updated_at       = NOW()
            WHERE id = $1
            RETURNING {SELLER_COLUMNS}
            "#
        ))
        .bind(seller_id)
        .bind(update.business_name.as_deref())
        .bind(update.business_type.as_deref())
        .bind(update.description.as_deref())
        .bind(update.business_email.as_deref())
        .bind(update.business_phone.as_deref())
        .bind(update.business_address.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("SellerProfile", seller_id))?;

        debug!("Seller profile updated");
        row.try_into()
    }
}
