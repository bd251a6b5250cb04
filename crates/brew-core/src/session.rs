//! # Session Types
//!
//! Who is operating the terminal. The engine never looks this up itself;
//! callers pass the operator into [`Checkout::confirm`](crate::checkout::Checkout::confirm).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Name shown when nobody is logged in.
pub const GUEST_NAME: &str = "Guest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Cashier,
    Barista,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffRole::Admin => f.write_str("Admin"),
            StaffRole::Cashier => f.write_str("Cashier"),
            StaffRole::Barista => f.write_str("Barista"),
        }
    }
}

/// A staff account as held by the staff directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffUser {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: StaffRole,
    pub is_active: bool,
    pub phone: Option<String>,
    #[ts(as = "String")]
    pub hire_date: NaiveDate,
}

/// The logged-in staff member, as stored by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: StaffRole,
}

impl CurrentUser {
    /// `"First Last"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&StaffUser> for CurrentUser {
    fn from(user: &StaffUser) -> Self {
        CurrentUser {
            id: user.id.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
        }
    }
}

/// Display name for an optional session, `"Guest"` when logged out.
pub fn display_name(user: Option<&CurrentUser>) -> String {
    user.map_or_else(|| GUEST_NAME.to_string(), CurrentUser::display_name)
}

/// Operator attribution recorded on a finalized payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OperatorRef {
    /// `None` for a guest session.
    pub user_id: Option<String>,
    pub display_name: String,
    pub role: Option<StaffRole>,
}

impl OperatorRef {
    pub fn guest() -> Self {
        OperatorRef {
            user_id: None,
            display_name: GUEST_NAME.to_string(),
            role: None,
        }
    }
}

impl From<Option<&CurrentUser>> for OperatorRef {
    fn from(user: Option<&CurrentUser>) -> Self {
        match user {
            Some(user) => OperatorRef {
                user_id: Some(user.id.clone()),
                display_name: user.display_name(),
                role: Some(user.role),
            },
            None => OperatorRef::guest(),
        }
    }
}
