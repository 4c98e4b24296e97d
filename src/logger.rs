//! Log dispatch setup.
//!
//! Everything in the crate logs through the `log` macros. [`init`] installs a
//! `fern` dispatcher that writes timestamped lines to a file under the user's
//! local data directory, optionally mirrored to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Parse a configured level name.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| anyhow::anyhow!("Invalid log level '{level}', expected off, error, warn, info, debug or trace"))
}

/// Location of the log file
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))
        .map(|dir| dir.join("smartshopr").join("smartshopr.log"))
}

fn dispatch(config: &LoggingConfig) -> Result<fern::Dispatch> {
    let level = parse_level(&config.level)?;
    Ok(fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Warn)
        .level_for("smartshopr", level))
}

/// Install the global logger. Returns the log file path when logging is
/// enabled, `None` when it is disabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let path = get_log_file_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let mut dispatch = dispatch(config)?
        .chain(fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?);
    if config.stderr {
        dispatch = dispatch.chain(std::io::stderr());
    }
    dispatch.apply().context("A global logger is already installed")?;

    Ok(Some(path))
}
