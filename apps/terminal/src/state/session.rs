//! # Session Store
//!
//! Who is logged in at this terminal.
//!
//! The store is a string key-value map with the same contract as browser
//! local storage, so a web front end and this shell agree on the layout:
//! the logged-in user lives as camelCase JSON under [`CURRENT_USER_KEY`].
//!
//! ```text
//! login("cashier", "cashier123")
//!      │  StaffDirectory::authenticate
//!      ▼
//! "currentUser" ─► {"id":"2","username":"cashier","firstName":"John",...}
//!      │
//!      ├── current()  ─► Some(CurrentUser)   (None if missing or corrupt)
//!      └── logout()   ─► key removed
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use brew_core::session::display_name;
use brew_core::{CurrentUser, OperatorRef};
use brew_fixtures::StaffDirectory;
use tracing::{info, warn};

/// Storage key for the logged-in user.
pub const CURRENT_USER_KEY: &str = "currentUser";

#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<Mutex<HashMap<String, String>>>,
    staff: StaffDirectory,
}

impl SessionStore {
    pub fn new(staff: StaffDirectory) -> Self {
        SessionStore {
            storage: Arc::new(Mutex::new(HashMap::new())),
            staff,
        }
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        let storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        storage.get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: impl Into<String>) {
        let mut storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        storage.insert(key.to_string(), value.into());
    }

    pub fn remove_item(&self, key: &str) {
        let mut storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        storage.remove(key);
    }

    /// Checks the credentials and stores the user on success.
    pub fn login(&self, username: &str, password: &str) -> Option<CurrentUser> {
        let user = match self.staff.authenticate(username.trim(), password) {
            Some(user) => user,
            None => {
                warn!(username = username.trim(), "Login rejected");
                return None;
            }
        };

        match serde_json::to_string(&user) {
            Ok(json) => self.set_item(CURRENT_USER_KEY, json),
            Err(e) => {
                warn!(error = %e, "Could not store session user");
                return None;
            }
        }

        info!(user_id = %user.id, role = %user.role, "Staff logged in");
        Some(user)
    }

    pub fn logout(&self) {
        if let Some(user) = self.current() {
            info!(user_id = %user.id, "Staff logged out");
        }
        self.remove_item(CURRENT_USER_KEY);
    }

    /// The stored user. A value that does not parse is logged and treated
    /// as nobody logged in.
    pub fn current(&self) -> Option<CurrentUser> {
        let raw = self.get_item(CURRENT_USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored session user is corrupt");
                None
            }
        }
    }

    /// `"First Last"`, or `"Guest"` when nobody is logged in.
    pub fn display_name(&self) -> String {
        display_name(self.current().as_ref())
    }

    /// The operator to stamp on a payment.
    pub fn operator(&self) -> OperatorRef {
        OperatorRef::from(self.current().as_ref())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new(StaffDirectory::seeded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::StaffRole;

    #[test]
    fn test_login_and_logout() {
        let session = SessionStore::default();
        assert_eq!(session.display_name(), "Guest");

        let user = session.login("barista", "barista123").unwrap();
        assert_eq!(user.role, StaffRole::Barista);
        assert_eq!(session.display_name(), "Ana Garcia");
        assert!(session.get_item(CURRENT_USER_KEY).unwrap().contains("\"firstName\":\"Ana\""));

        session.logout();
        assert!(session.current().is_none());
        assert_eq!(session.operator(), OperatorRef::guest());
    }

    #[test]
    fn test_failed_login_keeps_previous_user() {
        let session = SessionStore::default();
        session.login("admin", "admin123").unwrap();

        assert!(session.login("admin", "wrong").is_none());
        assert_eq!(session.display_name(), "Maria Santos");
    }

    #[test]
    fn test_corrupt_value_reads_as_guest() {
        let session = SessionStore::default();
        session.set_item(CURRENT_USER_KEY, "{not json");

        assert!(session.current().is_none());
        assert_eq!(session.display_name(), "Guest");
    }
}
