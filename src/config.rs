//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::upstream::ResourceKind;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://www.patreon.com";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Port of the separate metrics listener
    pub metrics_port: u16,
    /// Scheme and host the upstream URL templates are joined to
    pub upstream_base_url: String,
    /// Overall upstream request timeout in seconds; `None` keeps the
    /// transport default (no timeout)
    pub upstream_timeout: Option<u64>,
    /// Maximum number of entries per resource kind
    pub cache_max_entries: usize,
    /// Campaign metadata TTL in seconds
    pub campaign_ttl: u64,
    /// Post list TTL in seconds
    pub posts_ttl: u64,
    /// Search results TTL in seconds
    pub search_ttl: u64,
}

fn var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `METRICS_PORT` - Metrics listener port (default: 2112)
    /// - `UPSTREAM_BASE_URL` - Upstream origin (default: https://www.patreon.com)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: unset)
    /// - `CACHE_MAX_ENTRIES` - Entries per resource kind (default: 1000)
    /// - `CAMPAIGN_TTL_SECS` - Campaign TTL (default: 86400)
    /// - `POSTS_TTL_SECS` - Post list TTL (default: 900)
    /// - `SEARCH_TTL_SECS` - Search TTL (default: 3600)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: var("SERVER_PORT").unwrap_or(defaults.server_port),
            metrics_port: var("METRICS_PORT").unwrap_or(defaults.metrics_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: var("UPSTREAM_TIMEOUT_SECS").filter(|secs| *secs > 0),
            cache_max_entries: var("CACHE_MAX_ENTRIES").unwrap_or(defaults.cache_max_entries),
            campaign_ttl: var("CAMPAIGN_TTL_SECS").unwrap_or(defaults.campaign_ttl),
            posts_ttl: var("POSTS_TTL_SECS").unwrap_or(defaults.posts_ttl),
            search_ttl: var("SEARCH_TTL_SECS").unwrap_or(defaults.search_ttl),
        }
    }

    /// TTL for one resource kind.
    pub fn ttl(&self, kind: ResourceKind) -> Duration {
        let secs = match kind {
            ResourceKind::Campaign => self.campaign_ttl,
            ResourceKind::Posts => self.posts_ttl,
            ResourceKind::Search => self.search_ttl,
        };
        Duration::from_secs(secs)
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            metrics_port: 2112,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: None,
            cache_max_entries: DEFAULT_CAPACITY,
            campaign_ttl: 24 * 60 * 60,
            posts_ttl: 15 * 60,
            search_ttl: 60 * 60,
        }
    }
}
