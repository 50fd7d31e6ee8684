pub mod weak;
use crate::config::ProfileRepositoryConfig;
use crate::error::UserError;
use crate::profile::{Profile, ProfileId};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// The strong handle callers keep, the repository only holds weak ones.
pub type ProfileHandle = Rc<RefCell<Profile>>;

/// The key of a repository entry.
///
/// - Username: registered by construction or by the factory.
/// - Identity: registered explicitly with the profile identity token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Username(String),
    Identity(ProfileId),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Username(username) => write!(f, "username:{username}"),
            CacheKey::Identity(id) => write!(f, "identity:{id}"),
        }
    }
}

/// The profile repository
pub trait ProfileRepository
where
    Self: Sized + 'static,
{
    type ProfileRepoConfigType: ProfileRepositoryConfig + 'static;
    /// Create a profile repository
    fn new(config: Arc<Self::ProfileRepoConfigType>) -> Self;
    /// Find the live profile stored under the key
    fn find_profile(&self, key: &CacheKey) -> Option<ProfileHandle>;
    /// List all the live profiles, each profile once
    fn list_profiles(&self) -> Vec<ProfileHandle>;
    /// Save a profile under the key, replacing whatever was there
    fn save_profile(&self, key: CacheKey, profile: &ProfileHandle);

    fn lookup_by_username(&self, username: &str) -> Option<ProfileHandle> {
        self.find_profile(&CacheKey::Username(username.to_owned()))
    }

    fn lookup_by_identity(&self, id: ProfileId) -> Option<ProfileHandle> {
        self.find_profile(&CacheKey::Identity(id))
    }

    /// Register the profile under its identity token.
    ///
    /// # Panics
    /// Panics if the profile is mutably borrowed by the caller.
    fn register_by_identity(&self, profile: &ProfileHandle) {
        let id = profile.borrow().id();
        self.save_profile(CacheKey::Identity(id), profile);
    }

    /// Create a profile, registering it under its username when there is one.
    fn construct(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        last_login: Option<DateTime<Utc>>,
    ) -> Result<ProfileHandle, UserError> {
        let profile = Rc::new(RefCell::new(Profile::new(username, email, last_login)?));
        if let Some(username) = username {
            self.save_profile(CacheKey::Username(username.to_owned()), &profile);
        }
        Ok(profile)
    }

    /// Return the live profile of the username untouched, or construct a new one.
    fn get_or_create(
        &self,
        username: &str,
        email: &str,
        last_login: Option<DateTime<Utc>>,
    ) -> Result<ProfileHandle, UserError> {
        if let Some(existing) = self.lookup_by_username(username) {
            debug!("Reuse cached profile of {username}");
            return Ok(existing);
        }
        self.construct(Some(username), Some(email), last_login)
    }
}
