//! URL templates for upstream resources.

use std::fmt::Display;

/// Placeholder substituted with the cache key.
pub const KEY_PLACEHOLDER: &str = "{key}";

pub const CAMPAIGN_PATH: &str = "/api/campaigns/{key}";

pub const POSTS_PATH: &str = "/api/posts?fields[post]=title,url,teaser_text,content,published_at\
&filter[campaign_id]={key}&filter[contains_exclusive_posts]=true&filter[is_draft]=false\
&sort=-published_at&json-api-version=1.0&json-api-use-default-includes=false";

pub const SEARCH_PATH: &str = "/api/search?q={key}&page%5Bsize%5D=5&json-api-version=1.0&include=[]";

// == Url Template ==
/// A fully-formed upstream URL with one `{key}` slot.
///
/// Expansion is plain substitution: keys must already be URL-safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Joins `path` onto `base_url`, dropping a trailing slash from the base.
    pub fn with_base(base_url: &str, path: &str) -> Self {
        Self::new(format!("{}{}", base_url.trim_end_matches('/'), path))
    }

    /// Substitutes `key` into the template.
    pub fn expand(&self, key: &impl Display) -> String {
        self.template.replace(KEY_PLACEHOLDER, &key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_numeric_key() {
        let template = UrlTemplate::with_base("https://www.patreon.com/", CAMPAIGN_PATH);
        assert_eq!(template.expand(&42u64), "https://www.patreon.com/api/campaigns/42");
    }

    #[test]
    fn test_expand_does_not_escape() {
        let template = UrlTemplate::with_base("http://localhost", SEARCH_PATH);
        let url = template.expand(&"cats+and%26dogs");
        assert!(url.starts_with("http://localhost/api/search?q=cats+and%26dogs&"));
    }

    #[test]
    fn test_posts_template_filters() {
        let url = UrlTemplate::with_base("https://www.patreon.com", POSTS_PATH).expand(&7u64);
        assert!(url.contains("filter[campaign_id]=7&"));
        assert!(url.contains("filter[is_draft]=false"));
        assert!(url.contains("filter[contains_exclusive_posts]=true"));
        assert!(url.contains("sort=-published_at"));
        assert!(!url.contains(KEY_PLACEHOLDER));
    }
}
