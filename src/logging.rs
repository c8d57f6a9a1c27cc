use std::path::Path;

use color_eyre::{Result, eyre::eyre};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Sends `tracing` output to the log file, since the terminal belongs to
/// the UI. `RUST_LOG` overrides the configured level. Keep the returned
/// guard alive until exit so buffered lines are flushed.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>> {
    let Some(path) = config.log_path() else {
        return Ok(None);
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("log path {} has no file name", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(
            dir, file_name,
        ));
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.logging.level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;

    Ok(Some(guard))
}
