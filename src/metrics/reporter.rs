//! Event Reporter
//!
//! Side-channel counters for cache hits and misses per resource kind.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;
use tracing::debug;

use crate::upstream::ResourceKind;

pub const CACHE_CHECK_METRIC: &str = "upstream_api_cache_check";
const CACHE_CHECK_HELP: &str =
    "Number of hits/misses for the app's in-memory cache of upstream API results";

// == Cache Outcome ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

impl CacheOutcome {
    fn is_hit(self) -> bool {
        matches!(self, CacheOutcome::Hit)
    }

    /// Value of the `hit` label.
    pub fn label(self) -> &'static str {
        if self.is_hit() {
            "true"
        } else {
            "false"
        }
    }
}

// == Event Reporter ==
/// Observer notified of every cache probe.
///
/// Implementations must not block or fail; the resolver ignores them for
/// control flow.
pub trait EventReporter: Send + Sync {
    fn report(&self, kind: ResourceKind, key: &str, outcome: CacheOutcome);
}

// == Kind Counts ==
/// Point-in-time hit/miss counts for one resource kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KindCounts {
    pub hits: u64,
    pub misses: u64,
}

impl KindCounts {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was probed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Metrics Reporter ==
/// Hit/miss counter labelled by `type` and `hit`, registered in a registry
/// owned by the reporter.
#[derive(Clone)]
pub struct MetricsReporter {
    registry: Registry,
    cache_checks: IntCounterVec,
}

impl MetricsReporter {
    /// Creates the counter and registers it.
    ///
    /// Every `(type, hit)` series is created up front so a scrape shows
    /// zeroes before the first request.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let cache_checks = IntCounterVec::new(
            Opts::new(CACHE_CHECK_METRIC, CACHE_CHECK_HELP),
            &["type", "hit"],
        )?;
        registry.register(Box::new(cache_checks.clone()))?;

        for kind in ResourceKind::ALL {
            for outcome in [CacheOutcome::Hit, CacheOutcome::Miss] {
                cache_checks.with_label_values(&[kind.as_str(), outcome.label()]);
            }
        }

        Ok(Self {
            registry,
            cache_checks,
        })
    }

    fn count(&self, kind: ResourceKind, outcome: CacheOutcome) -> u64 {
        self.cache_checks
            .with_label_values(&[kind.as_str(), outcome.label()])
            .get()
    }

    /// Current counts for `kind`.
    pub fn snapshot(&self, kind: ResourceKind) -> KindCounts {
        KindCounts {
            hits: self.count(kind, CacheOutcome::Hit),
            misses: self.count(kind, CacheOutcome::Miss),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes the registry in the Prometheus text exposition format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for MetricsReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsReporter")
            .field("metric", &CACHE_CHECK_METRIC)
            .finish()
    }
}

impl EventReporter for MetricsReporter {
    fn report(&self, kind: ResourceKind, key: &str, outcome: CacheOutcome) {
        self.cache_checks
            .with_label_values(&[kind.as_str(), outcome.label()])
            .inc();
        debug!(kind = %kind, key, hit = outcome.is_hit(), "cache check");
    }
}
