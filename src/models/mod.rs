//! Data models
//!
//! Upstream API shapes, the Atom feed document, search translation and the
//! JSON response bodies served by the API.

pub mod atom;
pub mod patreon;
pub mod responses;
pub mod search;

// Re-export commonly used types
pub use atom::{build_feed, render_feed, Feed};
pub use patreon::{CampaignResponse, Post, PostsResponse, SearchHit, SearchResponse};
pub use responses::{HealthResponse, KindStats, StatsResponse};
pub use search::SearchResult;
