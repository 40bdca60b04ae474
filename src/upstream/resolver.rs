//! Memoized Resolver
//!
//! Read-through lookup: probe the kind's store, and on a miss fetch, decode
//! and populate it. Failures are returned to the caller and never cached.

use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock};
use crate::error::ResolveError;
use crate::metrics::{CacheOutcome, EventReporter};
use crate::upstream::{decode, Fetcher, ResourceKind, UrlTemplate};

// == Resource Cache ==
/// The cache namespace of one resource kind: its URL template and its store.
///
/// Values are held behind `Arc` so a hit hands out the stored value without
/// copying it.
pub struct ResourceCache<K, V> {
    kind: ResourceKind,
    template: UrlTemplate,
    store: Mutex<CacheStore<K, Arc<V>>>,
}

impl<K, V> ResourceCache<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new(kind: ResourceKind, template: UrlTemplate, capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(kind, template, capacity, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(
        kind: ResourceKind,
        template: UrlTemplate,
        capacity: usize,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            kind,
            template,
            store: Mutex::new(CacheStore::with_clock(capacity, ttl, clock)),
        }
    }

    /// Live cached value for `key`, without reporting a probe.
    pub async fn cached(&self, key: &K) -> Option<Arc<V>> {
        self.store.lock().await.get(key)
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    /// Store statistics together with its fixed capacity and TTL.
    pub async fn stats(&self) -> (CacheStats, usize, Duration) {
        let store = self.store.lock().await;
        (store.stats(), store.capacity(), store.ttl())
    }
}

// == Resolver ==
/// Shared fetch/decode/report machinery, reused by every resource kind.
#[derive(Clone)]
pub struct Resolver {
    fetcher: Arc<dyn Fetcher>,
    reporter: Arc<dyn EventReporter>,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, reporter: Arc<dyn EventReporter>) -> Self {
        Self { fetcher, reporter }
    }

    // == Resolve ==
    /// Returns the value for `key`, from `cache` when live, otherwise from
    /// upstream.
    ///
    /// A hit performs no network activity. On a miss the key is substituted
    /// into the kind's URL template as-is, so string keys must arrive
    /// already escaped. The store lock is released while fetching; two
    /// concurrent misses on the same key both fetch and the later `put` wins.
    pub async fn resolve<K, V>(&self, cache: &ResourceCache<K, V>, key: K) -> Result<Arc<V>, ResolveError>
    where
        K: Hash + Eq + Clone + Display + Send + Sync,
        V: DeserializeOwned + Send + Sync,
    {
        let kind = cache.kind;
        let label = key.to_string();

        let cached = cache.store.lock().await.get(&key);
        if let Some(value) = cached {
            self.reporter.report(kind, &label, CacheOutcome::Hit);
            return Ok(value);
        }
        self.reporter.report(kind, &label, CacheOutcome::Miss);

        let url = cache.template.expand(&key);
        debug!(%kind, key = %label, %url, "cache miss, fetching");

        let body = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|source| ResolveError::Fetch {
                kind,
                key: label.clone(),
                source,
            })?;

        let value: V = decode(kind, &body).map_err(|source| ResolveError::Decode {
            kind,
            key: label.clone(),
            source,
        })?;

        let value = Arc::new(value);
        cache.store.lock().await.put(key, Arc::clone(&value));
        Ok(value)
    }
}
