//! Application state shared across all request handlers.

use std::sync::Arc;

use anyhow::Context;
use moka::future::Cache;

use crate::config::Config;

/// Rendered thread, the view model for a successful lookup.
#[derive(Clone, Debug)]
pub struct Email {
    /// Validated source URL.
    pub url: String,
    /// Diff markup produced by [`crate::markup::prettify`].
    pub content: String,
    /// When the thread was fetched from the archive.
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Type alias for the thread cache, keyed by source URL.
pub type EmailCache = Cache<String, Email>;

/// Cache capacity (number of threads).
const CACHE_CAPACITY: u64 = 1_000;

/// Cache TTL. Archived threads rarely change once posted.
const CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(600);

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for archive fetches.
    pub http: reqwest::Client,

    /// Application configuration.
    pub config: Arc<Config>,

    /// In-memory cache of prettified threads.
    pub cache: EmailCache,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("lkml-prettify/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.fetch_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        tracing::info!(
            cache_capacity = CACHE_CAPACITY,
            cache_ttl_secs = CACHE_TTL.as_secs(),
            "application state initialized"
        );

        Ok(Self {
            http,
            config: Arc::new(config),
            cache,
        })
    }
}
