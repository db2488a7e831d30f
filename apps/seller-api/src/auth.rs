//! JWT authentication.
//!
//! Bearer tokens are issued by the marketplace's account service and signed
//! with a shared HS256 secret. This module only verifies them and turns the
//! claims into an [`AuthIdentity`]; the route extractors below do the rest.
//!
//! ```text
//! Authorization: Bearer <jwt>
//!      │
//!      ▼
//! AuthGate::verify ──► AuthIdentity { user_id, role }   (AuthenticatedUser)
//!      │
//!      ▼
//! SellerApplicationService::current_seller ──► SellerProfile   (CurrentSeller)
//! ```

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_core::{SellerProfile, UserRole};

use crate::error::ApiError;
use crate::services::ServiceError;
use crate::state::AppState;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Marketplace role at issue time
    pub role: UserRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// A verified caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Maps a bearer token to a verified identity.
pub trait AuthGate: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthIdentity, ServiceError>;
}

/// HS256 JWT gate.
pub struct JwtAuthGate {
    secret: String,
    lifetime_secs: i64,
}

impl JwtAuthGate {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        JwtAuthGate {
            secret: secret.into(),
            lifetime_secs,
        }
    }

    /// Issues a token for `user_id`. Used by the seed tooling and tests.
    pub fn issue_token(&self, user_id: Uuid, role: UserRole) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ServiceError::Internal(format!("Failed to generate token: {}", e)))
    }
}

impl AuthGate for JwtAuthGate {
    fn verify(&self, token: &str) -> Result<AuthIdentity, ServiceError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| ServiceError::Unauthenticated(format!("Invalid token: {}", e)))?
        .claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthenticated("Invalid token subject".to_string()))?;

        Ok(AuthIdentity {
            user_id,
            role: claims.role,
        })
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// Extractors
// =============================================================================

/// Any caller holding a valid token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub AuthIdentity);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .ok_or_else(|| ServiceError::Unauthenticated("missing bearer token".to_string()))?;

        Ok(AuthenticatedUser(state.auth.verify(token)?))
    }
}

/// A caller that owns a seller profile.
#[derive(Debug, Clone)]
pub struct CurrentSeller {
    pub profile: SellerProfile,
}

impl CurrentSeller {
    pub fn seller_id(&self) -> Uuid {
        self.profile.id
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentSeller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;
        let profile = state.sellers.current_seller(user.user_id).await?;
        Ok(CurrentSeller { profile })
    }
}
