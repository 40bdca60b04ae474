//! Patreon Feed - A read-through caching proxy for creator posts
//!
//! Turns a creator's paginated posts API into an Atom feed, with per-kind
//! TTL and capacity bounded caches in front of the upstream.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
