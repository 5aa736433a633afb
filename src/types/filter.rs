use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;
use super::tag::DEFAULT_TAG;

/// Structured filter built once from a tag expression and free-text query.
///
/// Positive and unique tags are served by the store as equality filters;
/// negative tags are applied afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    pub owner: String,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub unique: Vec<String>,
    /// Redirect straight to the bookmark when exactly one matches.
    pub follow_mode: bool,
    /// Raw tag expression as typed, used for display.
    pub tag_string: String,
    /// Free text substituted into `%s` placeholders.
    pub query: String,
    /// The complete search box value (tag string and free text).
    pub raw_query: String,
    pub is_fallback: bool,
}

impl FilterRequest {
    /// Tags that must all be present on a matching record.
    pub fn required_tags(&self) -> Vec<String> {
        self.positive
            .iter()
            .chain(self.unique.iter())
            .cloned()
            .collect()
    }

    /// The request served when this one yields nothing: every `default`
    /// bookmark, with the whole raw query as substitution text.
    pub fn fallback(&self) -> Self {
        Self {
            owner: self.owner.clone(),
            positive: vec![DEFAULT_TAG.to_string()],
            negative: Vec::new(),
            unique: Vec::new(),
            follow_mode: self.follow_mode,
            tag_string: DEFAULT_TAG.to_string(),
            query: self.raw_query.clone(),
            raw_query: self.raw_query.clone(),
            is_fallback: true,
        }
    }
}

/// Records returned for a filter, plus the request that actually produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    pub bookmarks: Vec<Bookmark>,
    pub filter: FilterRequest,
}

impl FilterResult {
    /// The single bookmark to navigate to, when follow mode applies.
    pub fn redirect_target(&self) -> Option<&Bookmark> {
        match self.bookmarks.as_slice() {
            [only] if self.filter.follow_mode => Some(only),
            _ => None,
        }
    }
}

/// Everything the presentation layer needs to render a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexView {
    pub bookmarks: Vec<Bookmark>,
    pub title: String,
    pub query: String,
    pub tag_string: String,
    pub count: usize,
}

/// What the caller should do with an index request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    Redirect(String),
    List(IndexView),
}
