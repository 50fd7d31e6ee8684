mod config;
mod error;
mod profile;
mod repo;
pub mod validate;
pub use config::ProfileRepositoryConfig;
pub use config::UserProfileConfig;
pub use error::UserError;
pub use profile::{DEFAULT_LAST_LOGIN, Profile, ProfileId};
pub use repo::weak::{ProfileStore, WeakProfileRepository};
pub use repo::{CacheKey, ProfileHandle, ProfileRepository};
pub use user_profile_common::{BaseError, LogConfig, init_log};
