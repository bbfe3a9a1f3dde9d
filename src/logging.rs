//! Log file setup
//!
//! The terminal belongs to the UI, so logs go to `~/.overlay-tui/overlay-tui.log`.
//! `OVERLAY_TUI_LOG` takes an `EnvFilter` directive (default `info`).

use crate::config::Config;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "OVERLAY_TUI_LOG";

pub fn log_path() -> Option<PathBuf> {
    Config::config_dir().map(|dir| dir.join("overlay-tui.log"))
}

/// Install the global subscriber. Returns the log file path.
pub fn init() -> Result<PathBuf> {
    let path = log_path().context("Could not determine log directory")?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(path)
}
