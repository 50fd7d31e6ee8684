mod config;
mod error;
mod log;
pub use config::LogConfig;
pub use error::BaseError;
pub use log::init_log;
