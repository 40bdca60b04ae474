//! Response DTOs for the JSON endpoints
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::metrics::KindCounts;
use crate::upstream::ResourceKind;

/// Cache figures for one resource kind
#[derive(Debug, Clone, Serialize)]
pub struct KindStats {
    pub kind: ResourceKind,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Current number of entries, expired ones included
    pub entries: usize,
    pub capacity: usize,
    pub ttl_secs: u64,
}

impl KindStats {
    pub fn new(
        kind: ResourceKind,
        counts: KindCounts,
        store: CacheStats,
        capacity: usize,
        ttl_secs: u64,
    ) -> Self {
        Self {
            kind,
            hits: counts.hits,
            misses: counts.misses,
            hit_rate: counts.hit_rate(),
            evictions: store.evictions,
            entries: store.total_entries,
            capacity,
            ttl_secs,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub caches: Vec<KindStats>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
