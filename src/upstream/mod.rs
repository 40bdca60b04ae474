//! Upstream Module
//!
//! Fetching, decoding and memoizing the upstream posts API. Each resource
//! kind gets its own cache; one resolver drives all three.

mod context;
pub mod decode;
mod fetcher;
mod kind;
mod resolver;
pub mod template;

pub use context::{escape_query, Upstream};
pub use decode::decode;
pub use fetcher::{Fetcher, HttpFetcher};
pub use kind::ResourceKind;
pub use resolver::{ResourceCache, Resolver};
pub use template::UrlTemplate;
