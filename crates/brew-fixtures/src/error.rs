//! # Fixture Error Types
//!
//! Failures of the management operations on the in-memory providers.

use brew_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    /// No menu item with this id.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// No add-on with this id.
    #[error("Add-on not found: {0}")]
    AddOnNotFound(String),

    /// An active member already uses this phone number.
    #[error("A loyalty member with phone {0} already exists")]
    DuplicatePhone(String),

    /// Enrollment form failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

pub type FixtureResult<T> = Result<T, FixtureError>;
