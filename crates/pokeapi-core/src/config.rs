use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::retry::{DEFAULT_BACKOFF, DEFAULT_RETRY_ATTEMPTS};
use crate::transport::{TransportBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Upper bound applied to `[retry] backoff_ms`.
pub const MAX_BACKOFF_MS: u64 = 60_000;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total tries per request, including the first.
    pub attempts: u32,
    /// Base delay in milliseconds; attempt `n` waits `n` times this plus jitter.
    /// Values above [`MAX_BACKOFF_MS`] are clamped.
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            backoff_ms: DEFAULT_BACKOFF.as_millis() as u64,
        }
    }
}

/// Client configuration loaded from `~/.config/pokeapi/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-attempt deadline in milliseconds.
    pub timeout_ms: u64,
    /// Extra headers sent with every request; override built-in defaults.
    pub headers: BTreeMap<String, String>,
    /// Entries kept per resource kind.
    pub cache_capacity: usize,
    /// Run semantic checks on decoded resources.
    pub validate_responses: bool,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            headers: BTreeMap::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            validate_responses: false,
            retry: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Transport builder carrying every transport-level setting in this config.
    pub fn transport_builder(&self) -> TransportBuilder {
        let retry = self.retry.clone().unwrap_or_default();
        if retry.backoff_ms > MAX_BACKOFF_MS {
            tracing::warn!(
                backoff_ms = retry.backoff_ms,
                max = MAX_BACKOFF_MS,
                "retry backoff clamped"
            );
        }
        let backoff = Duration::from_millis(retry.backoff_ms.min(MAX_BACKOFF_MS));
        let builder = self
            .headers
            .iter()
            .fold(TransportBuilder::default(), |b, (name, value)| b.header(name, value));
        builder
            .base_url(&self.base_url)
            .timeout(self.timeout())
            .attempts(retry.attempts)
            .backoff(backoff)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pokeapi")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClientConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file; missing keys take defaults.
pub fn load_from(path: &Path) -> Result<ClientConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ClientConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
