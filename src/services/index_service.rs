// Binmarks Index Service
// Runs a search box request end to end: parse, look up, then either
// redirect to the single match or describe the listing.

use crate::managers::bookmark_repository::BookmarkRepositoryTrait;
use crate::services::query_parser;
use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;
use crate::types::filter::{FilterRequest, IndexOutcome, IndexView};

/// Pluralizes `text` for `count`, optionally prefixing the count.
pub fn pluralize(text: &str, count: usize, prepend: bool) -> String {
    let mut out = text.to_string();
    if count != 1 {
        out.push('s');
    }
    if prepend {
        out = format!("{} {}", count, out);
    }
    out
}

/// Display title such as `2 Bookmarks tagged with 'work' and query 'rust'`.
pub fn build_title(count: usize, tag_string: &str, query: &str) -> String {
    let mut title = pluralize("Bookmark", count, true);
    if !tag_string.is_empty() {
        title.push_str(&format!(" tagged with '{}'", tag_string));
    }
    if !query.is_empty() {
        title.push_str(if tag_string.is_empty() { " with" } else { " and" });
        title.push_str(&format!(" query '{}'", query));
    }
    title
}

/// Keeps the bookmarks matching every comma-separated keyword.
pub fn quick_filter(bookmarks: &[Bookmark], keywords: &str) -> Vec<Bookmark> {
    bookmarks
        .iter()
        .filter(|b| b.matches_keywords(keywords))
        .cloned()
        .collect()
}

/// Index view assembly over any bookmark repository.
pub struct IndexService<'r, R: BookmarkRepositoryTrait> {
    repo: &'r R,
}

impl<'r, R: BookmarkRepositoryTrait> IndexService<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    /// Handles a raw search box value for `owner`.
    pub fn index(&self, owner: &str, full_query: &str) -> Result<IndexOutcome, BookmarkError> {
        let filter = query_parser::parse_full_query(owner, full_query);
        self.index_filter(owner, &filter)
    }

    /// Handles an already parsed request.
    pub fn index_filter(&self, owner: &str, filter: &FilterRequest) -> Result<IndexOutcome, BookmarkError> {
        let result = self.repo.find_by_filter(owner, filter)?;

        if let Some(target) = result.redirect_target() {
            tracing::info!(owner, url = %target.url, "following single match");
            return Ok(IndexOutcome::Redirect(target.url.clone()));
        }

        let effective = &result.filter;
        let count = result.bookmarks.len();
        Ok(IndexOutcome::List(IndexView {
            title: build_title(count, &effective.tag_string, &effective.query),
            query: effective.raw_query.clone(),
            tag_string: effective.tag_string.clone(),
            count,
            bookmarks: result.bookmarks,
        }))
    }
}
