//! # API Error Types
//!
//! The single error shape every command returns to the front end.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Conversion Flow                           │
//! │                                                                         │
//! │  brew-core          brew-fixtures        terminal config                │
//! │  ─────────          ─────────────        ───────────────                │
//! │  CoreError          FixtureError         ConfigError                    │
//! │       │                  │                    │                         │
//! │       └──────────────────┼────────────────────┘                         │
//! │                          ▼                                              │
//! │                ┌───────────────────┐                                    │
//! │                │     ApiError      │                                    │
//! │                │  code + message   │                                    │
//! │                └─────────┬─────────┘                                    │
//! │                          │ serde_json                                   │
//! │                          ▼                                              │
//! │      { "code": "PAYMENT_ERROR", "message": "Insufficient ..." }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::{CoreError, ValidationError};
use brew_fixtures::FixtureError;
use serde::Serialize;

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Menu item not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await call('confirm_payment');
/// } catch (e) {
///   switch (e.code) {
///     case 'PAYMENT_ERROR':
///       showAlert(e.message);
///       break;
///     case 'VALIDATION_ERROR':
///       highlightField(e.message);
///       break;
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Menu item, add-on, member or reward does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed (unavailable item, size not offered, empty order)
    CartError,

    /// Loyalty rule refused (points, minimum purchase, inactive member)
    LoyaltyError,

    /// Payment method or amount problem
    PaymentError,

    /// Operation not allowed in the current checkout stage
    InvalidStage,

    /// Login failed
    Unauthorized,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts engine errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        let code = match err {
            CoreError::ItemUnavailable { .. }
            | CoreError::SizeNotOffered { .. }
            | CoreError::EmptyOrder => ErrorCode::CartError,
            CoreError::MemberInactive { .. }
            | CoreError::MemberRequired
            | CoreError::RewardInactive { .. }
            | CoreError::InsufficientPoints { .. }
            | CoreError::MinimumPurchaseNotMet { .. }
            | CoreError::RewardAlreadySelected { .. } => ErrorCode::LoyaltyError,
            CoreError::PaymentMethodRequired
            | CoreError::PaymentMethodDisabled { .. }
            | CoreError::InsufficientPayment { .. } => ErrorCode::PaymentError,
            CoreError::InvalidStage { .. } | CoreError::CheckoutClosed => ErrorCode::InvalidStage,
            CoreError::Validation(e) => return ApiError::from(e),
        };
        ApiError::new(code, message)
    }
}

/// Converts input parsing failures (size, method, amount) to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts fixture management errors to API errors.
impl From<FixtureError> for ApiError {
    fn from(err: FixtureError) -> Self {
        match err {
            FixtureError::MenuItemNotFound(id) => ApiError::not_found("Menu item", &id),
            FixtureError::AddOnNotFound(id) => ApiError::not_found("Add-on", &id),
            FixtureError::DuplicatePhone(_) => ApiError::validation(err.to_string()),
            FixtureError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Configuration error: {}", err);
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::{Money, PaymentMethod};

    #[test]
    fn test_core_error_codes() {
        let err = ApiError::from(CoreError::InsufficientPayment {
            paid: Money::from_pesos(400),
            total: Money::from_pesos(500),
        });
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert!(err.message.contains("Insufficient payment amount"));

        let err = ApiError::from(CoreError::PaymentMethodDisabled {
            method: PaymentMethod::Gcash,
        });
        assert_eq!(err.code, ErrorCode::PaymentError);

        assert_eq!(ApiError::from(CoreError::EmptyOrder).code, ErrorCode::CartError);
        assert_eq!(ApiError::from(CoreError::CheckoutClosed).code, ErrorCode::InvalidStage);
    }

    #[test]
    fn test_validation_keeps_inner_message() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!err.message.starts_with("Validation error"));
    }

    #[test]
    fn test_fixture_not_found() {
        let err = ApiError::from(FixtureError::AddOnNotFound("oat-milk".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Add-on not found: oat-milk");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::validation("bad")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "bad");
    }
}
