//! Library configuration.
//!
//! Plain serde structs with sensible defaults. Callers may load overrides
//! from a JSON file or from the environment; nothing here is required to
//! use the pipeline with a custom [`Downloader`](crate::downloader::Downloader).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

/// Settings for the default HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// User agent sent with every request.
    pub user_agent: String,

    /// Per-request timeout.
    pub timeout_seconds: u64,

    /// Upper bound on outgoing requests per second.
    pub max_requests_per_second: u32,

    /// Follow redirects (bounded), or surface them to the adapter.
    pub follow_redirects: bool,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("medialens/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: 30,
            max_requests_per_second: 4,
            follow_redirects: true,
        }
    }
}

/// Top-level configuration for the extraction pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub downloader: DownloaderConfig,
}

impl ExtractorConfig {
    /// Load configuration from a JSON file.
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        info!(path = %path.display(), "loaded extractor configuration");
        Ok(config)
    }

    /// Persist the current configuration as pretty-printed JSON.
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, raw)
            .await
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Apply `MEDIALENS_USER_AGENT`, `MEDIALENS_TIMEOUT_SECS` and
    /// `MEDIALENS_RPS` environment overrides on top of the current values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(ua) = std::env::var("MEDIALENS_USER_AGENT") {
            if !ua.is_empty() {
                self.downloader.user_agent = ua;
            }
        }
        if let Some(timeout) = std::env::var("MEDIALENS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.downloader.timeout_seconds = timeout;
        }
        if let Some(rps) = std::env::var("MEDIALENS_RPS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.downloader.max_requests_per_second = rps;
        }
    }
}
