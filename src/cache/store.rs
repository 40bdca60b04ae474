//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking
//! and lazy TTL expiration.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, Clock, InsertionOrder, SystemClock};

// == Cache Store ==
/// Size-bounded, TTL-bounded key/value store.
///
/// The store is agnostic over `(K, V)`: it never inspects keys or values.
/// Expiry is lazy. An expired entry is reported as absent by `get` but stays
/// in place, still counting toward capacity, until it is replaced or evicted.
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Insertion order tracker
    order: InsertionOrder<K>,
    /// Eviction and size bookkeeping
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifetime of every entry
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore that reads time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            capacity,
            ttl,
            clock,
        }
    }

    // == Get ==
    /// Returns the live value for `key`, if any.
    ///
    /// Never-inserted, evicted and expired keys all read as `None`. A read
    /// has no side effect: it does not refresh recency or remove anything.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Stores a value under `key`.
    ///
    /// An existing key gets a fresh entry: new value, age zero, and it becomes
    /// the newest insertion. A new key arriving at capacity first evicts the
    /// least recently inserted entry, expired or not.
    pub fn put(&mut self, key: K, value: V) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
            }
        }

        let entry = CacheEntry::new(value, self.clock.now());
        self.entries.insert(key.clone(), entry);
        if is_overwrite {
            self.order.refresh(key);
        } else {
            self.order.record(key);
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K, V> std::fmt::Debug for CacheStore<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("stats", &self.stats)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const HOUR: Duration = Duration::from_secs(3600);

    fn manual_store<K, V>(capacity: usize, ttl: Duration) -> (CacheStore<K, V>, Arc<ManualClock>)
    where
        K: Hash + Eq + Clone,
        V: Clone,
    {
        let clock = Arc::new(ManualClock::new());
        let store = CacheStore::with_clock(capacity, ttl, clock.clone());
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<u64, String> = CacheStore::new(100, HOUR);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.ttl(), HOUR);
    }

    #[test]
    fn test_store_zero_capacity_is_clamped() {
        let mut store: CacheStore<u64, &str> = CacheStore::new(0, HOUR);
        store.put(1, "a");
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.get(&1), Some("a"));
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new(100, HOUR);

        store.put("key1".to_string(), "value1".to_string());

        assert_eq!(store.get(&"key1".to_string()), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store: CacheStore<u64, String> = CacheStore::new(100, HOUR);
        assert_eq!(store.get(&7), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100, HOUR);

        store.put(1u64, "value1");
        store.put(1u64, "value2");

        assert_eq!(store.get(&1), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let (mut store, clock) = manual_store(100, HOUR);

        store.put(1u64, "value1");
        assert_eq!(store.get(&1), Some("value1"));

        clock.advance(HOUR);

        assert_eq!(store.get(&1), None);
        // Lazy: nothing is swept on read
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_age() {
        let (mut store, clock) = manual_store(100, HOUR);

        store.put(1u64, "old");
        clock.advance(Duration::from_secs(3000));
        store.put(1u64, "new");
        clock.advance(Duration::from_secs(3000));

        assert_eq!(store.get(&1), Some("new"));
    }

    #[test]
    fn test_store_capacity_scenario() {
        let mut store = CacheStore::new(2, HOUR);

        store.put(1u64, "A");
        store.put(2u64, "B");
        store.put(3u64, "C");

        assert_eq!(store.get(&1), None);
        assert_eq!(store.get(&2), Some("B"));
        assert_eq!(store.get(&3), Some("C"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_get_does_not_refresh_recency() {
        let mut store = CacheStore::new(3, HOUR);

        store.put(1u64, "a");
        store.put(2u64, "b");
        store.put(3u64, "c");

        // Reading key 1 must not save it from eviction
        assert!(store.get(&1).is_some());
        store.put(4u64, "d");

        assert_eq!(store.get(&1), None);
        assert!(store.get(&2).is_some());
    }

    #[test]
    fn test_store_overwrite_refreshes_recency() {
        let mut store = CacheStore::new(3, HOUR);

        store.put(1u64, "a");
        store.put(2u64, "b");
        store.put(3u64, "c");
        store.put(1u64, "a2");
        store.put(4u64, "d");

        assert_eq!(store.get(&1), Some("a2"));
        assert_eq!(store.get(&2), None);
    }

    #[test]
    fn test_store_order_tracks_each_key_once() {
        let mut store = CacheStore::new(2, HOUR);

        store.put(1u64, "a");
        store.put(2u64, "b");
        store.put(1u64, "a2");
        store.put(1u64, "a3");
        assert_eq!(store.order.len(), store.len());

        // 2 is now the oldest insertion, then 1
        store.put(3u64, "c");
        assert_eq!(store.get(&2), None);
        store.put(4u64, "d");
        assert_eq!(store.get(&1), None);
        assert_eq!(store.get(&3), Some("c"));
        assert_eq!(store.order.len(), 2);
        assert_eq!(store.stats().evictions, 2);
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::new(2, HOUR);

        store.put(1u64, "a");
        store.put(2u64, "b");
        store.put(2u64, "b2");

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.get(&1), Some("a"));
    }

    #[test]
    fn test_store_expired_entries_count_toward_capacity() {
        let (mut store, clock) = manual_store(2, HOUR);

        store.put(1u64, "a");
        clock.advance(HOUR * 2);
        store.put(2u64, "b");
        store.put(3u64, "c");

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&2), Some("b"));
        assert_eq!(store.get(&3), Some("c"));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(1, HOUR);

        store.put(1u64, "a");
        store.put(2u64, "b");

        let stats = store.stats();
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
