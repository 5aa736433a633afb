// Binmarks Query Parser
// Turns a tag expression plus free-text query into an immutable FilterRequest.
// Reserved tags are resolved here so the repository never sees `-follow`.

use crate::types::filter::FilterRequest;
use crate::types::tag::{parse_tag_string, TagOp, TagToken, FOLLOW_TAG, HIDDEN_TAG};

/// Splits a search box value into its tag string and free-text query.
///
/// Only the first space separates the two; the query keeps any further spaces.
pub fn split_full_query(full_query: &str) -> (&str, &str) {
    match full_query.split_once(' ') {
        Some((tags, query)) => (tags, query),
        None => (full_query, ""),
    }
}

/// Parses a single search box value (`<tags> <free text>`).
pub fn parse_full_query(owner: &str, full_query: &str) -> FilterRequest {
    let (tag_string, query) = split_full_query(full_query);
    build(owner, tag_string, query, full_query)
}

/// Parses a tag expression and free-text query given separately.
pub fn parse(owner: &str, tag_string: &str, query: &str) -> FilterRequest {
    let raw_query = match (tag_string.is_empty(), query.is_empty()) {
        (_, true) => tag_string.to_string(),
        (true, false) => query.to_string(),
        (false, false) => format!("{} {}", tag_string, query),
    };
    build(owner, tag_string, query, &raw_query)
}

fn build(owner: &str, tag_string: &str, query: &str, raw_query: &str) -> FilterRequest {
    // Nothing typed at all: the index view.
    let mut tokens = if tag_string.is_empty() && query.is_empty() {
        vec![TagToken::new(TagOp::Negative, FOLLOW_TAG)]
    } else {
        parse_tag_string(tag_string)
    };

    let list_only = |t: &TagToken| t.op == TagOp::Negative && t.name == FOLLOW_TAG;
    let follow_mode = !tokens.iter().any(list_only);
    tokens.retain(|t| !list_only(t));

    if !tokens.iter().any(|t| t.name == HIDDEN_TAG) {
        tokens.push(TagToken::new(TagOp::Negative, HIDDEN_TAG));
    }

    let mut request = FilterRequest {
        owner: owner.to_string(),
        positive: Vec::new(),
        negative: Vec::new(),
        unique: Vec::new(),
        follow_mode,
        tag_string: tag_string.to_string(),
        query: query.to_string(),
        raw_query: raw_query.to_string(),
        is_fallback: false,
    };
    for token in tokens {
        match token.op {
            TagOp::Positive => request.positive.push(token.name),
            TagOp::Negative => request.negative.push(token.name),
            TagOp::Unique => request.unique.push(token.name),
        }
    }

    tracing::debug!(
        owner,
        positive = ?request.positive,
        negative = ?request.negative,
        unique = ?request.unique,
        follow_mode,
        "parsed filter request"
    );
    request
}
