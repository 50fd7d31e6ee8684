use crate::error::UserError;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use user_profile_common::{BaseError, LogConfig};
pub trait ProfileRepositoryConfig {
    /// Label used to prefix the repository log lines
    fn store_label(&self) -> &str;
    /// Registrations between two sweeps of expired entries, 0 disables the sweep
    fn sweep_threshold(&self) -> usize;
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct UserProfileConfig {
    log_directory: PathBuf,
    log_name_prefix: String,
    max_log_level: String,
    store_label: String,
    sweep_threshold: usize,
}

impl Default for UserProfileConfig {
    fn default() -> Self {
        Self {
            log_directory: PathBuf::from("log"),
            log_name_prefix: "user-profile.log".to_owned(),
            max_log_level: "INFO".to_owned(),
            store_label: "profiles".to_owned(),
            sweep_threshold: 64,
        }
    }
}

impl UserProfileConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, UserError> {
        let config = toml::from_str::<UserProfileConfig>(content).map_err(BaseError::from)?;
        Ok(config)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UserError> {
        let content = read_to_string(path).map_err(BaseError::from)?;
        Self::from_toml_str(&content)
    }
    pub fn with_store_label(mut self, store_label: impl Into<String>) -> Self {
        self.store_label = store_label.into();
        self
    }
    pub fn with_sweep_threshold(mut self, sweep_threshold: usize) -> Self {
        self.sweep_threshold = sweep_threshold;
        self
    }
}

impl LogConfig for UserProfileConfig {
    fn log_directory(&self) -> &Path {
        &self.log_directory
    }
    fn log_name_prefix(&self) -> &str {
        &self.log_name_prefix
    }
    fn max_log_level(&self) -> &str {
        &self.max_log_level
    }
}

impl ProfileRepositoryConfig for UserProfileConfig {
    fn store_label(&self) -> &str {
        &self.store_label
    }
    fn sweep_threshold(&self) -> usize {
        self.sweep_threshold
    }
}
