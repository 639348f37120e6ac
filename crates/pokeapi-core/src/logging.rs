//! Tracing setup for the CLI: an append-only log file under the XDG state
//! dir, or stderr when that is unavailable. The library itself only emits
//! events and never installs a subscriber.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,pokeapi_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/pokeapi/pokeapi.log`
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pokeapi")?;
    Ok(xdg_dirs.get_state_home().join("pokeapi").join("pokeapi.log"))
}

/// Create parent dirs and open `path` for appending.
fn open_log(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Install a global subscriber writing to [`log_path`].
///
/// Errors leave no subscriber installed, so the caller can still fall back
/// to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = Arc::new(open_log(&path)?);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(file)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

/// Stderr-only subscriber. A no-op if one is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
