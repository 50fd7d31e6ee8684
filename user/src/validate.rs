//! Field predicates run on every profile write.
use chrono::{DateTime, Utc};

pub const USERNAME_FIELD: &str = "username";
pub const EMAIL_FIELD: &str = "email";
pub const LAST_LOGIN_FIELD: &str = "last_login";

/// The username is valid when something is left after trimming whitespace.
pub fn validate_username(username: &str) -> bool {
    !username.trim().is_empty()
}

/// The email only has to contain an `@` and a `.` somewhere.
pub fn validate_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// An absent last login is valid, a present one must be an RFC 3339 timestamp.
pub fn validate_last_login(last_login: Option<&str>) -> bool {
    match last_login {
        None => true,
        Some(last_login) => parse_last_login(last_login).is_some(),
    }
}

pub(crate) fn parse_last_login(last_login: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(last_login.trim())
        .ok()
        .map(|last_login| last_login.with_timezone(&Utc))
}
