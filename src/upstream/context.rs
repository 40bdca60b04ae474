//! The per-process set of resource caches, built once at startup and shared
//! with every request handler.

use std::sync::Arc;

use crate::cache::{Clock, SystemClock};
use crate::config::Config;
use crate::error::ResolveError;
use crate::metrics::KindCounts;
use crate::models::{CampaignResponse, KindStats, PostsResponse, SearchResponse};
use crate::upstream::template::{CAMPAIGN_PATH, POSTS_PATH, SEARCH_PATH};
use crate::upstream::{ResourceCache, ResourceKind, Resolver, UrlTemplate};

// == Upstream ==
pub struct Upstream {
    resolver: Resolver,
    campaigns: ResourceCache<u64, CampaignResponse>,
    posts: ResourceCache<u64, PostsResponse>,
    search: ResourceCache<String, SearchResponse>,
}

impl Upstream {
    pub fn new(config: &Config, resolver: Resolver) -> Self {
        Self::with_clock(config, resolver, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, resolver: Resolver, clock: Arc<dyn Clock>) -> Self {
        let base = config.upstream_base_url.as_str();
        let capacity = config.cache_max_entries;
        Self {
            resolver,
            campaigns: ResourceCache::with_clock(
                ResourceKind::Campaign,
                UrlTemplate::with_base(base, CAMPAIGN_PATH),
                capacity,
                config.ttl(ResourceKind::Campaign),
                clock.clone(),
            ),
            posts: ResourceCache::with_clock(
                ResourceKind::Posts,
                UrlTemplate::with_base(base, POSTS_PATH),
                capacity,
                config.ttl(ResourceKind::Posts),
                clock.clone(),
            ),
            search: ResourceCache::with_clock(
                ResourceKind::Search,
                UrlTemplate::with_base(base, SEARCH_PATH),
                capacity,
                config.ttl(ResourceKind::Search),
                clock,
            ),
        }
    }

    /// Campaign metadata for `id`.
    pub async fn campaign(&self, id: u64) -> Result<Arc<CampaignResponse>, ResolveError> {
        self.resolver.resolve(&self.campaigns, id).await
    }

    /// Newest-first published posts of campaign `id`.
    pub async fn posts(&self, id: u64) -> Result<Arc<PostsResponse>, ResolveError> {
        self.resolver.resolve(&self.posts, id).await
    }

    /// Search results for a raw query. The form-urlencoded query is the
    /// cache key, so equivalent spellings share one entry.
    pub async fn search(&self, query: &str) -> Result<Arc<SearchResponse>, ResolveError> {
        self.resolver.resolve(&self.search, escape_query(query)).await
    }

    /// Per-kind cache figures, combined with probe counts from `counts`.
    pub async fn stats(&self, counts: impl Fn(ResourceKind) -> KindCounts) -> Vec<KindStats> {
        let (campaign, posts, search) = tokio::join!(
            self.campaigns.stats(),
            self.posts.stats(),
            self.search.stats()
        );
        [
            (ResourceKind::Campaign, campaign),
            (ResourceKind::Posts, posts),
            (ResourceKind::Search, search),
        ]
        .into_iter()
        .map(|(kind, (store, capacity, ttl))| {
            KindStats::new(kind, counts(kind), store, capacity, ttl.as_secs())
        })
        .collect()
    }
}

/// Percent-encodes a search query for use inside a URL query string.
pub fn escape_query(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}
