//! Cache Statistics Module
//!
//! Tracks store-level bookkeeping: evictions and current size.
//! Hit/miss accounting belongs to the event reporter.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of entries evicted to make room for new keys
    pub evictions: u64,
    /// Current number of entries in the store, expired ones included
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
