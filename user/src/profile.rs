use crate::error::UserError;
use crate::validate::{
    EMAIL_FIELD, LAST_LOGIN_FIELD, USERNAME_FIELD, parse_last_login, validate_email,
    validate_username,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;
use tracing::warn;
use uuid::Uuid;

/// The last login reported for profiles that never logged in.
pub static DEFAULT_LAST_LOGIN: LazyLock<DateTime<Utc>> = LazyLock::new(|| {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .expect("2000-01-01T00:00:00Z is a valid timestamp")
});

/// The identity token of a profile instance, unrelated to the username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(Uuid);

impl ProfileId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ProfileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user profile
///
/// Every write goes through the field validators, a rejected
/// write keeps the previous value.
#[derive(Serialize, Deserialize, Debug)]
#[serde(try_from = "ProfileRecord")]
pub struct Profile {
    #[serde(skip)]
    id: ProfileId,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login: Option<DateTime<Utc>>,
}

impl Profile {
    /// Create an unregistered profile.
    ///
    /// The email is only applied when a username is given as well.
    pub fn new(
        username: Option<&str>,
        email: Option<&str>,
        last_login: Option<DateTime<Utc>>,
    ) -> Result<Self, UserError> {
        let mut profile = Self {
            id: ProfileId::generate(),
            username: None,
            email: None,
            last_login: None,
        };
        profile.set_last_login(last_login);
        if let Some(username) = username {
            profile.set_username(username)?;
            if let Some(email) = email {
                profile.set_email(email)?;
            }
        }
        Ok(profile)
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn last_login(&self) -> Option<&DateTime<Utc>> {
        self.last_login.as_ref()
    }

    /// The stored last login, or [`DEFAULT_LAST_LOGIN`] when there is none.
    pub fn effective_last_login(&self) -> DateTime<Utc> {
        self.last_login.unwrap_or(*DEFAULT_LAST_LOGIN)
    }

    pub fn set_username(&mut self, username: &str) -> Result<(), UserError> {
        if !validate_username(username) {
            return Err(reject(USERNAME_FIELD, username));
        }
        self.username = Some(username.to_owned());
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), UserError> {
        if !validate_email(email) {
            return Err(reject(EMAIL_FIELD, email));
        }
        self.email = Some(email.to_owned());
        Ok(())
    }

    pub fn set_last_login(&mut self, last_login: Option<DateTime<Utc>>) {
        self.last_login = last_login;
    }

    /// Set the last login from an RFC 3339 timestamp.
    pub fn set_last_login_str(&mut self, last_login: &str) -> Result<(), UserError> {
        let Some(parsed) = parse_last_login(last_login) else {
            return Err(reject(LAST_LOGIN_FIELD, last_login));
        };
        self.last_login = Some(parsed);
        Ok(())
    }
}

fn reject(field: &'static str, value: &str) -> UserError {
    warn!("Reject invalid value for {field}: {value:?}");
    UserError::InvalidFieldValue {
        field,
        value: value.to_owned(),
    }
}

#[derive(Deserialize)]
struct ProfileRecord {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    last_login: Option<DateTime<Utc>>,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = UserError;
    fn try_from(value: ProfileRecord) -> Result<Self, Self::Error> {
        Profile::new(
            value.username.as_deref(),
            value.email.as_deref(),
            value.last_login,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, hour, 30, 0).unwrap()
    }

    #[test]
    fn new_with_all_fields() {
        let profile = Profile::new(Some("alice"), Some("a@b.com"), Some(login_at(8))).unwrap();
        assert_eq!(profile.username(), Some("alice"));
        assert_eq!(profile.email(), Some("a@b.com"));
        assert_eq!(profile.last_login(), Some(&login_at(8)));
    }

    #[test]
    fn email_is_ignored_without_username() {
        let profile = Profile::new(None, Some("not an email"), None).unwrap();
        assert_eq!(profile.username(), None);
        assert_eq!(profile.email(), None);
    }

    #[test]
    fn last_login_is_kept_without_username() {
        let profile = Profile::new(None, None, Some(login_at(9))).unwrap();
        assert_eq!(profile.effective_last_login(), login_at(9));
    }

    #[test]
    fn new_rejects_blank_username() {
        let error = Profile::new(Some("   "), None, None).unwrap_err();
        assert!(matches!(
            error,
            UserError::InvalidFieldValue { field: "username", ref value } if value == "   "
        ));
    }

    #[test]
    fn new_rejects_invalid_email() {
        let error = Profile::new(Some("alice"), Some("alice-at-home"), None).unwrap_err();
        assert!(matches!(
            error,
            UserError::InvalidFieldValue { field: "email", .. }
        ));
    }

    #[test]
    fn invalid_writes_keep_previous_values() {
        let mut profile = Profile::new(Some("alice"), Some("a@b.com"), None).unwrap();
        assert!(profile.set_username("").is_err());
        assert!(profile.set_email("nowhere").is_err());
        assert!(profile.set_last_login_str("last tuesday").is_err());
        assert_eq!(profile.username(), Some("alice"));
        assert_eq!(profile.email(), Some("a@b.com"));
        assert_eq!(profile.last_login(), None);
    }

    #[test]
    fn corrected_write_after_rejection_succeeds() {
        let mut profile = Profile::new(Some("alice"), None, None).unwrap();
        assert!(profile.set_email("alice").is_err());
        profile.set_email("alice@example.org").unwrap();
        assert_eq!(profile.email(), Some("alice@example.org"));
    }

    #[test]
    fn effective_last_login_falls_back_to_default() {
        let mut profile = Profile::new(Some("alice"), None, None).unwrap();
        assert_eq!(profile.effective_last_login(), *DEFAULT_LAST_LOGIN);
        assert_eq!(DEFAULT_LAST_LOGIN.to_rfc3339(), "2000-01-01T00:00:00+00:00");
        profile.set_last_login(Some(login_at(10)));
        assert_eq!(profile.effective_last_login(), login_at(10));
        profile.set_last_login(None);
        assert_eq!(profile.effective_last_login(), *DEFAULT_LAST_LOGIN);
    }

    #[test]
    fn set_last_login_str_parses_offsets() {
        let mut profile = Profile::new(None, None, None).unwrap();
        profile.set_last_login_str("2024-03-09T10:30:00+02:00").unwrap();
        assert_eq!(profile.last_login(), Some(&login_at(8)));
    }

    #[test]
    fn every_profile_has_its_own_id() {
        let first = Profile::new(Some("alice"), None, None).unwrap();
        let second = Profile::new(Some("alice"), None, None).unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn deserialize_runs_validators() {
        let profile: Profile = toml::from_str(
            r#"
            username = "carol"
            email = "carol@example.com"
            last_login = "2024-03-09T08:30:00Z"
            "#,
        )
        .unwrap();
        assert_eq!(profile.username(), Some("carol"));
        assert_eq!(profile.last_login(), Some(&login_at(8)));

        let rejected = toml::from_str::<Profile>(
            r#"
            username = "carol"
            email = "carol"
            "#,
        );
        assert!(rejected.is_err());
    }

    #[test]
    fn serialize_skips_identity_and_absent_fields() {
        let profile = Profile::new(Some("dave"), None, None).unwrap();
        let content = toml::to_string(&profile).unwrap();
        assert_eq!(content.trim(), r#"username = "dave""#);
    }
}
