use crate::config::{ProfileRepositoryConfig, UserProfileConfig};
use crate::profile::Profile;
use crate::repo::{CacheKey, ProfileHandle, ProfileRepository};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tracing::debug;
/// Profile repository holding every entry weakly, an entry
/// is gone as soon as the last handle outside the repository drops.
pub struct WeakProfileRepository<C>
where
    C: ProfileRepositoryConfig + 'static,
{
    storage: RefCell<HashMap<CacheKey, Weak<RefCell<Profile>>>>,
    saves_since_sweep: Cell<usize>,
    config: Arc<C>,
}

/// The repository with the default configuration type.
pub type ProfileStore = WeakProfileRepository<UserProfileConfig>;

impl<C> WeakProfileRepository<C>
where
    C: ProfileRepositoryConfig + 'static,
{
    /// Drop the entries whose profile is gone, returns how many were dropped.
    pub fn sweep_expired(&self) -> usize {
        let mut storage = self.storage.borrow_mut();
        let before = storage.len();
        storage.retain(|_, profile| profile.strong_count() > 0);
        let swept = before - storage.len();
        self.saves_since_sweep.set(0);
        debug!(
            "store/{}: swept {swept} expired entries, {} left",
            self.config.store_label(),
            storage.len()
        );
        swept
    }

    /// Number of live entries over both key spaces.
    pub fn len(&self) -> usize {
        self.storage
            .borrow()
            .values()
            .filter(|profile| profile.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Usernames with a live entry, sorted.
    pub fn live_usernames(&self) -> Vec<String> {
        let mut usernames: Vec<String> = self
            .storage
            .borrow()
            .iter()
            .filter_map(|(key, profile)| match key {
                CacheKey::Username(username) if profile.strong_count() > 0 => {
                    Some(username.clone())
                }
                _ => None,
            })
            .collect();
        usernames.sort();
        usernames
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn count_save(&self) {
        let threshold = self.config.sweep_threshold();
        if threshold == 0 {
            return;
        }
        let saves = self.saves_since_sweep.get() + 1;
        if saves >= threshold {
            self.sweep_expired();
        } else {
            self.saves_since_sweep.set(saves);
        }
    }
}

impl<C> ProfileRepository for WeakProfileRepository<C>
where
    C: ProfileRepositoryConfig + 'static,
{
    type ProfileRepoConfigType = C;
    fn new(config: Arc<Self::ProfileRepoConfigType>) -> Self {
        debug!("store/{}: initialized", config.store_label());
        Self {
            storage: RefCell::new(HashMap::new()),
            saves_since_sweep: Cell::new(0),
            config,
        }
    }

    fn find_profile(&self, key: &CacheKey) -> Option<ProfileHandle> {
        let label = self.config.store_label();
        let profile = self.storage.borrow().get(key).map(Weak::upgrade);
        match profile {
            None => {
                debug!("store/{label}: no entry for {key}");
                None
            }
            Some(None) => {
                debug!("store/{label}: entry for {key} expired");
                self.storage.borrow_mut().remove(key);
                None
            }
            Some(Some(profile)) => Some(profile),
        }
    }

    fn list_profiles(&self) -> Vec<ProfileHandle> {
        let mut profiles: Vec<ProfileHandle> = Vec::new();
        for profile in self.storage.borrow().values().filter_map(Weak::upgrade) {
            if !profiles.iter().any(|listed| Rc::ptr_eq(listed, &profile)) {
                profiles.push(profile);
            }
        }
        profiles
    }

    fn save_profile(&self, key: CacheKey, profile: &ProfileHandle) {
        let label = self.config.store_label();
        let replaced = self
            .storage
            .borrow_mut()
            .insert(key.clone(), Rc::downgrade(profile));
        match replaced.and_then(|previous| previous.upgrade()) {
            Some(previous) if !Rc::ptr_eq(&previous, profile) => {
                debug!("store/{label}: replaced live entry for {key}");
            }
            _ => debug!("store/{label}: registered {key}"),
        }
        self.count_save();
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(Arc::new(UserProfileConfig::default()))
    }
}
