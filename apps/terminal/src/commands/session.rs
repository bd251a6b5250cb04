//! # Session Commands
//!
//! Staff login for the terminal.

use brew_core::CurrentUser;
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionStore;

/// Logs a staff member in.
///
/// ## Errors
/// `UNAUTHORIZED` for an unknown or inactive user or a wrong password. The
/// previous session, if any, is kept.
pub fn login(session: &SessionStore, username: &str, password: &str) -> Result<CurrentUser, ApiError> {
    debug!(username, "login command");
    session
        .login(username, password)
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))
}

pub fn logout(session: &SessionStore) {
    debug!("logout command");
    session.logout();
}

pub fn get_current_user(session: &SessionStore) -> Option<CurrentUser> {
    debug!("get_current_user command");
    session.current()
}

/// Header text: `"First Last"` or `"Guest"`.
pub fn get_operator_name(session: &SessionStore) -> String {
    session.display_name()
}
