use crate::config::LogConfig;
use crate::error::BaseError;
use std::str::FromStr;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
/// Install the global log subscriber, the returned guard
/// must be kept alive until the process stops logging.
pub fn init_log<C: LogConfig>(config: &C) -> Result<WorkerGuard, BaseError> {
    let max_level = Level::from_str(config.max_log_level())?;
    let (log_file_appender, log_appender_guard) = tracing_appender::non_blocking(
        tracing_appender::rolling::daily(config.log_directory(), config.log_name_prefix()),
    );
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(log_file_appender)
        .with_line_number(true)
        .with_level(true)
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false)
        .try_init()?;
    Ok(log_appender_guard)
}
