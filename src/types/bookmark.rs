use serde::{Deserialize, Serialize};

use super::tag::{join_tags, parse_tag_string, TagToken};

/// Default favicon lookup service; the bookmark's host is appended.
pub const DEFAULT_FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?domain=";

/// Represents a saved bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Opaque store key.
    pub id: String,
    pub owner: String,
    pub url: String,
    pub title: String,
    /// Bare tag names in the order they were saved.
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Bookmark {
    /// The tags as a comma-separated wire string.
    pub fn tag_string(&self) -> String {
        join_tags(&self.tags)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Favicon image URL for the bookmark's host.
    ///
    /// Unparseable URLs yield an empty domain rather than an error.
    pub fn favicon_url(&self, service: &str) -> String {
        let domain = url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        format!("{}{}", service, domain)
    }

    /// Case-insensitive keyword match used by the quick filter.
    ///
    /// Every non-empty comma-separated keyword must occur in the URL, the
    /// title or the tag string.
    pub fn matches_keywords(&self, keywords: &str) -> bool {
        let url = self.url.to_lowercase();
        let title = self.title.to_lowercase();
        let tags = self.tag_string().to_lowercase();

        keywords
            .to_lowercase()
            .split(',')
            .filter(|k| !k.is_empty())
            .all(|k| url.contains(k) || title.contains(k) || tags.contains(k))
    }
}

/// A bookmark as submitted for saving, tags still carrying their operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub owner: String,
    pub url: String,
    pub title: String,
    pub tags: Vec<TagToken>,
}

impl NewBookmark {
    /// Builds a submission from form values; `tag_string` is parsed once here.
    pub fn new(owner: &str, url: &str, title: &str, tag_string: &str) -> Self {
        Self {
            owner: owner.to_string(),
            url: url.to_string(),
            title: title.to_string(),
            tags: parse_tag_string(tag_string),
        }
    }
}

/// Result of an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was written (empty URL).
    Skipped,
    Created(Bookmark),
    Updated(Bookmark),
}

impl SaveOutcome {
    pub fn is_new(&self) -> bool {
        matches!(self, SaveOutcome::Created(_))
    }

    pub fn bookmark(&self) -> Option<&Bookmark> {
        match self {
            SaveOutcome::Skipped => None,
            SaveOutcome::Created(b) | SaveOutcome::Updated(b) => Some(b),
        }
    }
}
