//! Service-layer error kinds.

use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use bazaar_core::{CoreError, ValidationError};
use bazaar_db::DbError;

/// What a seller service can report.
///
/// | Variant             | HTTP |
/// |---------------------|------|
/// | `Unauthenticated`   | 401  |
/// | `NotFound`          | 404  |
/// | `InvalidInput`      | 400  |
/// | `InvalidTransition` | 409  |
/// | `Conflict`          | 409  |
/// | `StorageFailure`    | 500  |
/// | `Internal`          | 500  |
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Conflict(String),

    /// Storage failed. The message is for logs only.
    #[error("{operation} failed: {source}")]
    StorageFailure {
        operation: &'static str,
        #[source]
        source: DbError,
    },

    #[error("{0}")]
    Internal(String),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Maps a storage error for `operation` on behalf of `seller_id`.
    ///
    /// `NotFound` stays `NotFound`; anything else becomes an opaque
    /// `StorageFailure`, logged here with its context.
    pub fn storage(operation: &'static str, seller_id: Uuid, err: DbError) -> Self {
        Self::from_storage(operation, err, |e| {
            error!(%seller_id, operation, error = %e, "Storage failure");
        })
    }

    /// Same as [`ServiceError::storage`] for calls made before a seller
    /// profile exists, keyed by the account's `user_id`.
    pub fn user_storage(operation: &'static str, user_id: Uuid, err: DbError) -> Self {
        Self::from_storage(operation, err, |e| {
            error!(%user_id, operation, error = %e, "Storage failure");
        })
    }

    fn from_storage(operation: &'static str, err: DbError, log: impl FnOnce(&DbError)) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ServiceError::NotFound(format!("{entity} not found")),
            other => {
                log(&other);
                ServiceError::StorageFailure {
                    operation,
                    source: other,
                }
            }
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTransition { .. } => ServiceError::InvalidTransition(err.to_string()),
            CoreError::Validation(inner) => inner.into(),
            CoreError::AmountOverflow { .. } => {
                error!(error = %err, "Monetary overflow");
                ServiceError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::OrderStatus;

    #[test]
    fn test_db_not_found_stays_not_found() {
        let err = ServiceError::storage("get order", Uuid::new_v4(), DbError::not_found("Order", 1));
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Order not found"));
    }

    #[test]
    fn test_other_db_errors_are_storage_failures() {
        let err = ServiceError::storage("list orders", Uuid::new_v4(), DbError::PoolExhausted);
        assert!(matches!(
            err,
            ServiceError::StorageFailure {
                operation: "list orders",
                ..
            }
        ));
    }

    #[test]
    fn test_user_scoped_storage_errors_map_the_same_way() {
        let err = ServiceError::user_storage("find seller", Uuid::new_v4(), DbError::PoolExhausted);
        assert!(matches!(
            err,
            ServiceError::StorageFailure {
                operation: "find seller",
                ..
            }
        ));

        let err = ServiceError::user_storage(
            "promote user",
            Uuid::new_v4(),
            DbError::not_found("User", 7),
        );
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "User not found"));
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ServiceError = CoreError::InvalidTransition {
            order_id: "o-1".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        }
        .into();
        assert!(matches!(err, ServiceError::InvalidTransition(_)));

        let err: ServiceError = CoreError::Validation(ValidationError::Required {
            field: "status".to_string(),
        })
        .into();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m == "status is required"));
    }
}
