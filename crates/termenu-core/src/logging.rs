//! Logging configuration using tracing
//!
//! A menu owns the terminal it draws on, so log output always goes to a
//! file, never to stdout or stderr.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding the log filter directive
pub const LOG_ENV_VAR: &str = "TERMENU_LOG";

const LOG_FILE_PREFIX: &str = "termenu.log";

/// Initialize the logging subsystem
///
/// Logs are written to `<data dir>/termenu/logs/`.
/// Log level is controlled by the `TERMENU_LOG` environment variable.
///
/// # Examples
/// ```bash
/// TERMENU_LOG=debug cargo run
/// TERMENU_LOG=termenu_engine=trace cargo run
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("termenu=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("termenu starting, log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
pub fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("termenu").join("logs")
}
