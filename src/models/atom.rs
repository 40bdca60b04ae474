//! Atom feed document and its construction from upstream data.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{CampaignResponse, Post, PostsResponse};

pub const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
pub const ATOM_TYPE: &str = "application/atom+xml";
pub const HTML_TYPE: &str = "text/html";

// == Feed ==
// Author is required by RFC 4287 but upstream has nothing reliable for it,
// so it is left off rather than emitted blank.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename = "feed")]
pub struct Feed {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    pub id: String,
    pub title: String,
    pub updated: String,
    pub link: Vec<Link>,
    pub entry: Vec<FeedEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub content: FeedContent,
    pub link: Link,
    pub updated: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeedContent {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "$text")]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Link {
    #[serde(rename = "@rel")]
    pub rel: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@href")]
    pub href: String,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl FeedEntry {
    /// Maps one post to an entry. Full content wins; locked posts fall back
    /// to their teaser as plain text.
    pub fn from_post(post: &Post) -> Self {
        let attrs = &post.attributes;
        let content = if attrs.content.is_empty() {
            FeedContent {
                kind: "text",
                body: attrs.teaser_text.clone(),
            }
        } else {
            FeedContent {
                kind: "html",
                body: attrs.content.clone(),
            }
        };

        Self {
            title: attrs.title.clone(),
            content,
            link: Link {
                rel: "alternate",
                kind: HTML_TYPE,
                href: attrs.url.clone(),
            },
            updated: timestamp(attrs.published_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)),
        }
    }
}

// == Build Feed ==
/// Assembles the feed for one campaign.
///
/// `self_url` is the absolute URL the feed was requested at; it doubles as
/// the feed id.
pub fn build_feed(
    campaign: &CampaignResponse,
    posts: &PostsResponse,
    self_url: &str,
    now: DateTime<Utc>,
) -> Feed {
    Feed {
        xmlns: ATOM_NAMESPACE,
        id: self_url.to_string(),
        title: format!("Patreon: {}", campaign.name()),
        updated: timestamp(now),
        link: vec![
            Link {
                rel: "alternate",
                kind: HTML_TYPE,
                href: campaign.url().to_string(),
            },
            Link {
                rel: "self",
                kind: ATOM_TYPE,
                href: self_url.to_string(),
            },
        ],
        entry: posts.data.iter().map(FeedEntry::from_post).collect(),
    }
}

// == Render Feed ==
/// Serializes the feed as an indented XML document with prolog.
pub fn render_feed(feed: &Feed) -> Result<String> {
    let mut out = String::from(XML_PROLOG);
    let mut serializer = quick_xml::se::Serializer::new(&mut out);
    serializer.indent(' ', 2);
    feed.serialize(serializer)
        .map_err(|e| AppError::Render(e.to_string()))?;
    Ok(out)
}
