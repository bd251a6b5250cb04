//! # Staff Fixtures
//!
//! Staff accounts and their demo passwords.
//!
//! Passwords are plain text and compared directly. This is a demo login
//! gate for a single terminal, not an authentication system.

use brew_core::session::StaffUser;
use brew_core::{CurrentUser, StaffRole};
use chrono::NaiveDate;
use tracing::debug;

type StaffRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    StaffRole,
    bool,
    &'static str,
    (i32, u32, u32),
);

const STAFF: &[StaffRow] = &[
    ("1", "admin", "Maria", "Santos", StaffRole::Admin, true, "+63 912 345 6789", (2023, 1, 15)),
    ("2", "cashier", "John", "Dela Cruz", StaffRole::Cashier, true, "+63 917 123 4567", (2023, 3, 20)),
    ("3", "barista", "Ana", "Garcia", StaffRole::Barista, true, "+63 918 987 6543", (2023, 5, 10)),
    ("4", "carlos.rodriguez", "Carlos", "Rodriguez", StaffRole::Cashier, true, "+63 919 456 7890", (2023, 7, 8)),
    ("5", "lisa.martinez", "Lisa", "Martinez", StaffRole::Barista, false, "+63 920 111 2222", (2023, 9, 12)),
    ("6", "michael.tan", "Michael", "Tan", StaffRole::Admin, true, "+63 921 333 4444", (2022, 11, 5)),
];

const PASSWORDS: &[(&str, &str)] = &[
    ("admin", "admin123"),
    ("cashier", "cashier123"),
    ("barista", "barista123"),
    ("carlos.rodriguez", "cashier123"),
    ("lisa.martinez", "barista123"),
    ("michael.tan", "admin123"),
];

/// Staff email in the fixture convention, `first.last@coffeeshop.com`.
fn staff_email(first: &str, last: &str) -> String {
    format!(
        "{}.{}@coffeeshop.com",
        first.to_lowercase(),
        last.to_lowercase().replace(' ', "")
    )
}

pub fn staff() -> Vec<StaffUser> {
    STAFF
        .iter()
        .filter_map(|(id, username, first, last, role, active, phone, (y, m, d))| {
            let hire_date = NaiveDate::from_ymd_opt(*y, *m, *d)?;
            Some(StaffUser {
                id: id.to_string(),
                username: username.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: staff_email(first, last),
                role: *role,
                is_active: *active,
                phone: Some(phone.to_string()),
                hire_date,
            })
        })
        .collect()
}

/// Staff accounts with a credential check.
#[derive(Debug, Clone, Default)]
pub struct StaffDirectory {
    users: Vec<StaffUser>,
    passwords: Vec<(String, String)>,
}

impl StaffDirectory {
    pub fn seeded() -> Self {
        StaffDirectory {
            users: staff(),
            passwords: PASSWORDS
                .iter()
                .map(|(u, p)| (u.to_string(), p.to_string()))
                .collect(),
        }
    }

    pub fn users(&self) -> &[StaffUser] {
        &self.users
    }

    pub fn find(&self, username: &str) -> Option<&StaffUser> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Returns the session user for an active account whose password matches.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<CurrentUser> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username && u.is_active)?;

        let matches = self
            .passwords
            .iter()
            .any(|(u, p)| u == username && p == password);
        if !matches {
            debug!(username, "Password mismatch");
            return None;
        }

        Some(CurrentUser::from(user))
    }
}
