//! # Validation Module
//!
//! Input validation for the seller API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (seller-api)                                 │
//! │  ├── JSON shape / query string types                                   │
//! │  └── Malformed body → 400                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Status names, paging windows                                      │
//! │  ├── Business fields (trim, blank → absent, lengths)                   │
//! │  └── Runs before any write                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (PostgreSQL)                                        │
//! │  ├── CHECK constraints on status columns                               │
//! │  ├── UNIQUE (seller_profiles.user_id, payments.order_id)               │
//! │  └── Triggers (orders.seller_id, payout_orders)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::validation::{validate_order_filter, PageLimits};
//! use bazaar_core::OrderStatus;
//!
//! let filter = validate_order_filter(Some("shipped"), None, None, PageLimits::default()).unwrap();
//! assert_eq!(filter.status, Some(OrderStatus::Shipped));
//! assert_eq!(filter.limit, 20);
//! ```

use crate::error::ValidationError;
use crate::types::{OrderFilter, OrderStatus, SellerApplication, SellerProfileUpdate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum tracking number length, in characters.
pub const MAX_TRACKING_NUMBER_LEN: usize = 100;

/// Maximum seller notes length, in characters.
pub const MAX_SELLER_NOTES_LEN: usize = 2000;

const BUSINESS_NAME_MIN: usize = 2;
const BUSINESS_NAME_MAX: usize = 200;
const BUSINESS_TYPE_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 2000;
const EMAIL_MAX: usize = 254;
const PHONE_MAX: usize = 40;
const ADDRESS_MAX: usize = 500;

// =============================================================================
// Order Status & Paging
// =============================================================================

/// Parses a requested order status.
///
/// Unknown names fail with `NotAllowed`, listing the accepted values.
pub fn validate_order_status(status: &str) -> ValidationResult<OrderStatus> {
    status.parse()
}

/// Page size bounds for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Used when the caller gives no limit.
    pub default_limit: i64,
    /// Larger requested limits are capped to this.
    pub max_limit: i64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// Builds a typed order listing filter from raw query parameters.
///
/// ## Rules
/// - `status`: absent or blank means "any"; otherwise must be a known status
/// - `limit`: defaults to `limits.default_limit`, capped at `limits.max_limit`
/// - `limit` and `offset` must not be negative
pub fn validate_order_filter(
    status: Option<&str>,
    limit: Option<i64>,
    offset: Option<i64>,
    limits: PageLimits,
) -> ValidationResult<OrderFilter> {
    let status = match status.map(str::trim) {
        Some(s) if !s.is_empty() => Some(validate_order_status(s)?),
        _ => None,
    };

    let limit = limit.unwrap_or(limits.default_limit);
    if limit < 0 {
        return Err(ValidationError::Negative {
            field: "limit".to_string(),
        });
    }

    let offset = offset.unwrap_or(0);
    if offset < 0 {
        return Err(ValidationError::Negative {
            field: "offset".to_string(),
        });
    }

    Ok(OrderFilter {
        status,
        limit: limit.min(limits.max_limit),
        offset,
    })
}

// =============================================================================
// Free-Text Fields
// =============================================================================

/// Trims an optional text field. Blank input is treated as absent.
///
/// Returns an error when the trimmed value exceeds `max` characters.
pub fn normalize_optional(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(Some(value.to_string()))
}

/// Validates a business name.
///
/// ## Rules
/// - Trimmed before checking
/// - Between 2 and 200 characters
pub fn validate_business_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "business_name".to_string(),
        });
    }

    let len = name.chars().count();
    if len < BUSINESS_NAME_MIN {
        return Err(ValidationError::TooShort {
            field: "business_name".to_string(),
            min: BUSINESS_NAME_MIN,
        });
    }
    if len > BUSINESS_NAME_MAX {
        return Err(ValidationError::TooLong {
            field: "business_name".to_string(),
            max: BUSINESS_NAME_MAX,
        });
    }

    Ok(name.to_string())
}

/// Checks that an address looks like `local@domain.tld`.
///
/// This is a shape check, not deliverability.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "business_email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be of the form local@domain.tld"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid("domain must be of the form domain.tld"));
    }

    Ok(())
}

// =============================================================================
// Seller Details
// =============================================================================

/// Validates a seller application.
///
/// `business_name` is required; every other field is optional and blank
/// values are dropped.
pub fn validate_seller_application(
    raw: &SellerProfileUpdate,
) -> ValidationResult<SellerApplication> {
    let business_name = match raw.business_name.as_deref() {
        Some(name) => validate_business_name(name)?,
        None => {
            return Err(ValidationError::Required {
                field: "business_name".to_string(),
            })
        }
    };

    let details = validate_optional_details(raw)?;

    Ok(SellerApplication {
        business_name,
        business_type: details.business_type,
        description: details.description,
        business_email: details.business_email,
        business_phone: details.business_phone,
        business_address: details.business_address,
    })
}

/// Validates a partial profile update.
///
/// A supplied `business_name` must still satisfy the name rules, so a
/// profile can never lose its name.
pub fn validate_profile_update(raw: &SellerProfileUpdate) -> ValidationResult<SellerProfileUpdate> {
    let business_name = raw
        .business_name
        .as_deref()
        .map(validate_business_name)
        .transpose()?;

    Ok(SellerProfileUpdate {
        business_name,
        ..validate_optional_details(raw)?
    })
}

fn validate_optional_details(raw: &SellerProfileUpdate) -> ValidationResult<SellerProfileUpdate> {
    let business_email = normalize_optional("business_email", raw.business_email.as_deref(), EMAIL_MAX)?;
    if let Some(email) = &business_email {
        validate_email(email)?;
    }

    Ok(SellerProfileUpdate {
        business_name: None,
        business_type: normalize_optional(
            "business_type",
            raw.business_type.as_deref(),
            BUSINESS_TYPE_MAX,
        )?,
        description: normalize_optional("description", raw.description.as_deref(), DESCRIPTION_MAX)?,
        business_email,
        business_phone: normalize_optional("business_phone", raw.business_phone.as_deref(), PHONE_MAX)?,
        business_address: normalize_optional(
            "business_address",
            raw.business_address.as_deref(),
            ADDRESS_MAX,
        )?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: Option<&str>) -> SellerProfileUpdate {
        SellerProfileUpdate {
            business_name: name.map(str::to_string),
            ..SellerProfileUpdate::default()
        }
    }

    #[test]
    fn test_validate_order_status() {
        assert_eq!(validate_order_status("shipped").unwrap(), OrderStatus::Shipped);
        assert!(validate_order_status("bogus").is_err());
        assert!(validate_order_status("").is_err());
    }

    #[test]
    fn test_order_filter_defaults() {
        let filter = validate_order_filter(None, None, None, PageLimits::default()).unwrap();
        assert_eq!(filter.status, None);
        assert_eq!(filter.limit, 20);
        assert_eq!(filter.offset, 0);

        let filter = validate_order_filter(Some("  "), None, None, PageLimits::default()).unwrap();
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_order_filter_caps_limit() {
        let filter = validate_order_filter(None, Some(500), Some(40), PageLimits::default()).unwrap();
        assert_eq!(filter.limit, 100);
        assert_eq!(filter.offset, 40);

        let filter = validate_order_filter(None, Some(0), None, PageLimits::default()).unwrap();
        assert_eq!(filter.limit, 0);
    }

    #[test]
    fn test_order_filter_rejects_bad_input() {
        let limits = PageLimits::default();
        assert!(validate_order_filter(Some("bogus"), None, None, limits).is_err());
        assert!(validate_order_filter(None, Some(-1), None, limits).is_err());
        assert!(validate_order_filter(None, None, Some(-5), limits).is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional("f", None, 10).unwrap(), None);
        assert_eq!(normalize_optional("f", Some("   "), 10).unwrap(), None);
        assert_eq!(
            normalize_optional("f", Some("  abc "), 10).unwrap(),
            Some("abc".to_string())
        );
        assert!(normalize_optional("f", Some(&"x".repeat(11)), 10).is_err());
        // Length is counted in characters, not bytes.
        assert!(normalize_optional("f", Some("ééééé"), 5).is_ok());
    }

    #[test]
    fn test_validate_business_name() {
        assert_eq!(validate_business_name("  Acme Goods ").unwrap(), "Acme Goods");
        assert!(validate_business_name("").is_err());
        assert!(validate_business_name("A").is_err());
        assert!(validate_business_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("shop@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.co").is_ok());

        assert!(validate_email("shop.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("shop@example").is_err());
        assert!(validate_email("shop@example.").is_err());
        assert!(validate_email("shop@@example.com").is_err());
        assert!(validate_email("shop @example.com").is_err());
    }

    #[test]
    fn test_seller_application_requires_name() {
        assert!(matches!(
            validate_seller_application(&raw(None)),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_seller_application(&raw(Some("   "))).is_err());
    }

    #[test]
    fn test_seller_application_drops_blank_fields() {
        let input = SellerProfileUpdate {
            business_name: Some(" Acme ".to_string()),
            business_type: Some("   ".to_string()),
            business_email: Some(" shop@example.com ".to_string()),
            description: Some(String::new()),
            ..SellerProfileUpdate::default()
        };

        let app = validate_seller_application(&input).unwrap();
        assert_eq!(app.business_name, "Acme");
        assert_eq!(app.business_type, None);
        assert_eq!(app.description, None);
        assert_eq!(app.business_email.as_deref(), Some("shop@example.com"));
    }

    #[test]
    fn test_seller_application_rejects_bad_email() {
        let input = SellerProfileUpdate {
            business_name: Some("Acme".to_string()),
            business_email: Some("not-an-email".to_string()),
            ..SellerProfileUpdate::default()
        };
        assert!(validate_seller_application(&input).is_err());
    }

    #[test]
    fn test_profile_update_keeps_absent_name() {
        let input = SellerProfileUpdate {
            business_phone: Some(" 555-0100 ".to_string()),
            ..SellerProfileUpdate::default()
        };
        let update = validate_profile_update(&input).unwrap();
        assert_eq!(update.business_name, None);
        assert_eq!(update.business_phone.as_deref(), Some("555-0100"));

        assert!(validate_profile_update(&raw(Some(""))).is_err());
    }
}
