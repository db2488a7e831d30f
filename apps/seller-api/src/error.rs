//! # API Error Types
//!
//! Maps service errors to HTTP status codes and a JSON body:
//!
//! ```json
//! {"error": {"code": "NOT_FOUND", "message": "Order not found"}}
//! ```
//!
//! Internal failures are logged and answered with a fixed message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::services::ServiceError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "NOT_FOUND", "INVALID_INPUT").
    pub code: String,
    pub message: String,
}

/// Errors returned by route handlers and extractors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid bearer token (401).
    #[error("{0}")]
    Unauthenticated(String),

    /// No such resource, or not owned by the caller (404).
    #[error("{0}")]
    NotFound(String),

    /// Field-level validation failed (400).
    #[error("{0}")]
    InvalidInput(String),

    /// Body, path or query could not be parsed (400).
    #[error("{0}")]
    BadRequest(String),

    /// Status change refused by the transition policy (409).
    #[error("{0}")]
    InvalidTransition(String),

    /// Conflict with current resource state (409).
    #[error("{0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::InvalidTransition(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthenticated(msg) => Self::Unauthenticated(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::InvalidInput(msg) => Self::InvalidInput(msg),
            ServiceError::InvalidTransition(msg) => Self::InvalidTransition(msg),
            ServiceError::Conflict(msg) => Self::Conflict(msg),
            err @ ServiceError::StorageFailure { .. } => Self::Internal(err.to_string()),
            ServiceError::Internal(msg) => Self::Internal(msg),
        }
    }
}

// =============================================================================
// Extraction Helpers
// =============================================================================

/// Extract a JSON body, mapping deserialization errors to [`ApiError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., ApiError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| ApiError::BadRequest(err.body_text()))
}

/// Path parameters; a malformed id is a 400, not axum's plain-text reply.
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| ApiError::BadRequest(err.body_text()))
}

pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| ApiError::BadRequest(err.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_db::DbError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::Unauthenticated("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (ApiError::InvalidInput("x".into()), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (ApiError::InvalidTransition("x".into()), StatusCode::CONFLICT, "INVALID_TRANSITION"),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[test]
    fn test_storage_failure_becomes_internal() {
        let err: ApiError = ServiceError::StorageFailure {
            operation: "list orders",
            source: DbError::PoolExhausted,
        }
        .into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
