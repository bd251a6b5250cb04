//! # Error Types
//!
//! Domain-specific error types for brew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brew-core errors (this file)                                          │
//! │  ├── CoreError        - Cart / checkout rule violations                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  terminal errors (in app)                                              │
//! │  ├── ConfigError      - Config file / env failures                     │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog data gaps (missing size price, unknown add-on) are NOT errors.
//! They degrade to a zero contribution and surface as
//! [`PriceWarning`](crate::pricing::PriceWarning) values instead.

use thiserror::Error;

use crate::checkout::CheckoutStage;
use crate::money::Money;
use crate::types::{PaymentMethod, Size};

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout rule violations.
///
/// Every operation that returns one of these leaves cart and checkout state
/// exactly as it was before the call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item is marked unavailable and cannot be ordered.
    #[error("{name} is currently unavailable")]
    ItemUnavailable { menu_id: String, name: String },

    /// Requested size has no price on this item.
    #[error("{name} is not offered in size {size}")]
    SizeNotOffered { name: String, size: Size },

    /// Checkout was started with nothing in the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Proceed to Payment" with empty cart
    ///      │
    ///      ▼
    /// EmptyOrder
    ///      │
    ///      ▼
    /// UI shows: "Please add items to the order before proceeding to payment"
    /// ```
    #[error("Please add items to the order before proceeding to payment")]
    EmptyOrder,

    /// Loyalty member is not active.
    #[error("Loyalty member {member_id} is not active")]
    MemberInactive { member_id: String },

    /// Reward operations need an attached loyalty member.
    #[error("Attach a loyalty member before selecting rewards")]
    MemberRequired,

    /// Reward is switched off in the rewards catalog.
    #[error("Reward {reward_id} is not active")]
    RewardInactive { reward_id: String },

    /// Member cannot afford the reward on top of what is already selected.
    #[error("Not enough points for {reward_id}: {available} available, {required} required")]
    InsufficientPoints {
        reward_id: String,
        available: u32,
        required: u32,
    },

    /// Order subtotal is below the reward's minimum purchase.
    #[error("Reward {reward_id} requires a minimum purchase of {minimum}, order is {subtotal}")]
    MinimumPurchaseNotMet {
        reward_id: String,
        minimum: Money,
        subtotal: Money,
    },

    /// Reward is already part of the selection.
    #[error("Reward {reward_id} is already selected")]
    RewardAlreadySelected { reward_id: String },

    /// Confirmation attempted before a payment method was chosen.
    #[error("Select a payment method")]
    PaymentMethodRequired,

    /// Payment method exists but is switched off.
    #[error("{method} payments are currently unavailable")]
    PaymentMethodDisabled { method: PaymentMethod },

    /// Cash tendered does not cover the total.
    #[error("Insufficient payment amount: paid {paid}, total {total}")]
    InsufficientPayment { paid: Money, total: Money },

    /// Operation is not valid in the current checkout stage.
    #[error("Cannot {action} while checkout is in {stage:?}")]
    InvalidStage {
        action: &'static str,
        stage: CheckoutStage,
    },

    /// Checkout already produced its payment record.
    #[error("Checkout is already confirmed")]
    CheckoutClosed,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when operator input doesn't meet requirements and are
/// raised before any business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed amount, phone, email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPayment {
            paid: Money::from_centavos(40_000),
            total: Money::from_centavos(44_800),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment amount: paid ₱400.00, total ₱448.00"
        );

        let err = CoreError::SizeNotOffered {
            name: "Cappuccino".to_string(),
            size: Size::Large,
        };
        assert_eq!(err.to_string(), "Cappuccino is not offered in size large");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
