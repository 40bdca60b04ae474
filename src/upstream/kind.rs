//! Resource kinds fronted by the cache.

use std::fmt;

use serde::Serialize;

// == Resource Kind ==
/// One category of upstream data, each with its own cache namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Campaign metadata, keyed by campaign id
    Campaign,
    /// Newest-first post list, keyed by campaign id
    Posts,
    /// Search results, keyed by escaped query
    Search,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Campaign,
        ResourceKind::Posts,
        ResourceKind::Search,
    ];

    /// Label used in metrics and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Campaign => "campaign",
            ResourceKind::Posts => "posts",
            ResourceKind::Search => "search",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
