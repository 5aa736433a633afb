//! Owner-scoped bookmark queries.
//!
//! A [`BookmarkQuery`] is an immutable description of an AND of equality
//! filters (owner, optional URL, every listed tag) that is translated to SQL
//! in one place. Anything the equality model cannot express, such as tag
//! exclusion, is left to the caller.

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Store order (rowid).
    Natural,
    TitleAsc,
}

/// Projection of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Only the record key.
    KeysOnly,
    /// `id, owner, url, title, created_at, updated_at, tag`, one row per tag
    /// in position order. An untagged bookmark yields one row with a NULL tag.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkQuery {
    owner: String,
    url: Option<String>,
    tags: Vec<String>,
    order: Order,
}

impl BookmarkQuery {
    /// All bookmarks of `owner`.
    pub fn for_owner(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            url: None,
            tags: Vec::new(),
            order: Order::Natural,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Requires every tag in `tags` to be present.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn ordered_by(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    fn where_clause(&self) -> (String, Vec<String>) {
        let mut clause = String::from("b.owner = ?1");
        let mut params = vec![self.owner.clone()];

        if let Some(url) = &self.url {
            params.push(url.clone());
            clause.push_str(&format!(" AND b.url = ?{}", params.len()));
        }

        for tag in &self.tags {
            params.push(tag.clone());
            clause.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM bookmark_tags t WHERE t.bookmark_id = b.id AND t.tag = ?{})",
                params.len()
            ));
        }

        (clause, params)
    }

    /// SQL and positional parameters selecting the matching rows.
    pub fn select_sql(&self, projection: Projection) -> (String, Vec<String>) {
        let (clause, params) = self.where_clause();
        let order = match self.order {
            Order::Natural => "b.rowid",
            Order::TitleAsc => "b.title ASC, b.rowid",
        };
        let sql = match projection {
            Projection::KeysOnly => format!("SELECT b.id FROM bookmarks b WHERE {} ORDER BY {}", clause, order),
            Projection::Full => format!(
                "SELECT b.id, b.owner, b.url, b.title, b.created_at, b.updated_at, bt.tag \
                 FROM bookmarks b LEFT JOIN bookmark_tags bt ON bt.bookmark_id = b.id \
                 WHERE {} ORDER BY {}, bt.position",
                clause, order
            ),
        };
        (sql, params)
    }
}
