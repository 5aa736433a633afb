use serde::{Deserialize, Serialize};

/// Tag hidden from every listing unless it is named in the request.
pub const HIDDEN_TAG: &str = "hidden";
/// Tag whose negation (`-follow`) switches a request into list mode.
pub const FOLLOW_TAG: &str = "follow";
/// Tag of the search-template bookmarks served when nothing else matches.
pub const DEFAULT_TAG: &str = "default";

/// Operator prefix of a tag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagOp {
    /// `tag`: the tag must be present.
    Positive,
    /// `-tag`: the tag must be absent.
    Negative,
    /// `!tag`: present on read; on write, taken away from every other bookmark.
    Unique,
}

impl TagOp {
    /// The prefix character written in front of the tag name, if any.
    pub fn prefix(self) -> &'static str {
        match self {
            TagOp::Positive => "",
            TagOp::Negative => "-",
            TagOp::Unique => "!",
        }
    }
}

/// A single classified token of a tag expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagToken {
    pub op: TagOp,
    pub name: String,
}

impl TagToken {
    pub fn new(op: TagOp, name: impl Into<String>) -> Self {
        Self { op, name: name.into() }
    }

    /// Classifies a raw token by its leading character.
    ///
    /// Returns `None` for empty tokens and for a bare operator with no name.
    pub fn parse(raw: &str) -> Option<Self> {
        let (op, name) = if let Some(rest) = raw.strip_prefix('-') {
            (TagOp::Negative, rest)
        } else if let Some(rest) = raw.strip_prefix('!') {
            (TagOp::Unique, rest)
        } else {
            (TagOp::Positive, raw)
        };

        if name.is_empty() {
            return None;
        }
        Some(Self::new(op, name))
    }

    /// Renders the token back into its wire form (`name`, `-name` or `!name`).
    pub fn to_wire(&self) -> String {
        format!("{}{}", self.op.prefix(), self.name)
    }
}

/// Splits a comma-separated tag string into its non-empty raw tokens.
///
/// Tags are case-sensitive and commas cannot be escaped.
pub fn split_tag_string(tag_string: &str) -> Vec<&str> {
    tag_string.split(',').filter(|t| !t.is_empty()).collect()
}

/// Joins raw tokens back into the comma-separated wire form.
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a full tag expression into classified tokens, in input order.
pub fn parse_tag_string(tag_string: &str) -> Vec<TagToken> {
    split_tag_string(tag_string)
        .into_iter()
        .filter_map(TagToken::parse)
        .collect()
}
