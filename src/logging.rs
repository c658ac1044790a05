//! Logging setup for dtprobe.
//!
//! Diagnostics go through `tracing` and end up in two places:
//!
//! - **stderr**: compact lines, so they never interleave with the report on
//!   stdout
//! - **file**: `dtprobe.<date>.log` in the app data directory, rotated daily
//!   with 10 files kept
//!
//! The level defaults to `info` and can be overridden with `RUST_LOG`.
//!
//! ```no_run
//! dtprobe::logging::init().expect("Failed to initialize logging");
//! tracing::info!("Probe started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/dtprobe/logs`
/// - macOS: `~/Library/Application Support/dtprobe/logs`
/// - Linux: `~/.local/share/dtprobe/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base_dir.join("dtprobe").join("logs"))
}

/// Initializes the logging system with stderr and file output.
///
/// # Errors
///
/// Returns error if the log directory cannot be created, the file appender
/// fails, or a global subscriber is already set.
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("dtprobe")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create file appender")?;

    // Default to INFO, allow override with RUST_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Logging initialized, log directory: {}", log_dir.display());
    Ok(())
}
