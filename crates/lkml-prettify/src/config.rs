//! Application configuration loaded from environment variables.

use std::time::Duration;

use crate::validate::DEFAULT_TRUSTED_PREFIX;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Literal prefix every submitted URL must start with.
    pub trusted_prefix: String,

    /// Upper bound on the upstream fetch. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `LKML_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `LKML_TRUSTED_PREFIX`: Accepted URL prefix (default: "https://lore.kernel.org/lkml/")
    /// - `LKML_FETCH_TIMEOUT_SECS`: Upstream timeout in seconds (default: none)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("LKML_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let trusted_prefix = std::env::var("LKML_TRUSTED_PREFIX")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRUSTED_PREFIX.to_string());

        let fetch_timeout = std::env::var("LKML_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        tracing::info!(
            bind_addr = %bind_addr,
            trusted_prefix = %trusted_prefix,
            fetch_timeout_secs = fetch_timeout.map(|d| d.as_secs()),
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            trusted_prefix,
            fetch_timeout,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            trusted_prefix: DEFAULT_TRUSTED_PREFIX.to_string(),
            fetch_timeout: None,
        }
    }
}
