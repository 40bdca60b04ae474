//! Search translation: upstream search hits to a compact JSON list.

use serde::{Deserialize, Serialize};

use crate::models::{SearchHit, SearchResponse};

// == Search Result ==
/// One search hit, with a link to its feed when the campaign id is known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub url: String,
    pub creator_name: String,
    /// Relative feed URL, `None` when the hit carries no numeric campaign id
    pub feed: Option<String>,
}

/// Extracts a campaign id from ids like `"123"` or `"campaign_123"`.
pub fn campaign_id(hit_id: &str) -> Option<u64> {
    hit_id
        .rsplit('_')
        .next()
        .and_then(|tail| tail.parse().ok())
        .filter(|id| *id != 0)
}

impl From<&SearchHit> for SearchResult {
    fn from(hit: &SearchHit) -> Self {
        Self {
            id: hit.id.clone(),
            name: hit.attributes.name.clone(),
            url: hit.attributes.url.clone(),
            creator_name: hit.attributes.creator_name.clone(),
            feed: campaign_id(&hit.id).map(|id| format!("/feed?id={}", id)),
        }
    }
}

/// Translates a decoded search response.
pub fn translate(response: &SearchResponse) -> Vec<SearchResult> {
    response.data.iter().map(SearchResult::from).collect()
}
