//! Upstream API shapes.
//!
//! Every field defaults when absent or null; only malformed JSON or a
//! wrongly typed value fails to decode.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::upstream::decode::{nullable, string_or_number};

// == Campaign ==
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CampaignResponse {
    #[serde(deserialize_with = "nullable")]
    pub data: CampaignData,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CampaignData {
    #[serde(deserialize_with = "nullable")]
    pub attributes: CampaignAttributes,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CampaignAttributes {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

impl CampaignResponse {
    pub fn name(&self) -> &str {
        &self.data.attributes.name
    }

    pub fn url(&self) -> &str {
        &self.data.attributes.url
    }
}

// == Posts ==
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostsResponse {
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<Post>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub attributes: PostAttributes,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostAttributes {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    /// Full HTML body; empty for locked posts
    #[serde(deserialize_with = "nullable")]
    pub content: String,
    #[serde(deserialize_with = "nullable")]
    pub teaser_text: String,
    pub published_at: Option<DateTime<Utc>>,
}

// == Search ==
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<SearchHit>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchHit {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub attributes: SearchHitAttributes,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchHitAttributes {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub creator_name: String,
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
}
