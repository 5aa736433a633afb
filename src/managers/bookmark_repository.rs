//! Bookmark Repository for Binmarks.
//!
//! Implements `BookmarkRepositoryTrait`: tag-filtered lookups with the
//! `default` fallback, upsert-by-URL, deletion and the unique-tag rewrite,
//! backed by SQLite via `rusqlite`.

use rusqlite::{params, params_from_iter, Connection};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::database::{BookmarkQuery, Order, Projection};
use crate::types::bookmark::{Bookmark, NewBookmark, SaveOutcome};
use crate::types::errors::BookmarkError;
use crate::types::filter::{FilterRequest, FilterResult};
use crate::types::tag::TagOp;

/// Placeholder in a bookmark URL replaced by the free-text query.
pub const QUERY_PLACEHOLDER: &str = "%s";

/// Trait defining bookmark repository operations.
pub trait BookmarkRepositoryTrait {
    /// Runs `filter` for `owner`, falling back to `default` bookmarks when
    /// nothing matches. URLs come back with `%s` already substituted.
    fn find_by_filter(&self, owner: &str, filter: &FilterRequest) -> Result<FilterResult, BookmarkError>;
    /// Bookmarks carrying every `required` tag and none of `excluded`, by title.
    fn find_by_tags(&self, owner: &str, required: &[String], excluded: &[String]) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Every bookmark of `owner`, hidden ones included, by title.
    fn export(&self, owner: &str) -> Result<Vec<Bookmark>, BookmarkError>;
    fn save(&mut self, bookmark: &NewBookmark) -> Result<SaveOutcome, BookmarkError>;
    /// Returns whether a bookmark was deleted.
    fn delete(&mut self, owner: &str, url: &str) -> Result<bool, BookmarkError>;
    /// Strips `tag` from every bookmark of `owner` except the one at
    /// `exclude_url`. Returns the number of rewritten bookmarks.
    fn remove_tag_from_all_except(&mut self, owner: &str, tag: &str, exclude_url: &str) -> Result<usize, BookmarkError>;
}

/// Bookmark repository backed by a SQLite connection.
pub struct BookmarkRepository<'a> {
    conn: &'a Connection,
    clock: Box<dyn Fn() -> i64 + 'a>,
}

impl<'a> BookmarkRepository<'a> {
    /// Creates a new `BookmarkRepository` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self::with_clock(conn, Self::now)
    }

    /// Like [`BookmarkRepository::new`], stamping records with `clock` instead
    /// of the system time.
    pub fn with_clock(conn: &'a Connection, clock: impl Fn() -> i64 + 'a) -> Self {
        Self {
            conn,
            clock: Box::new(clock),
        }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Store side of a filter: equality on required tags, exclusion after.
    fn run_filter(&self, owner: &str, filter: &FilterRequest) -> Result<Vec<Bookmark>, BookmarkError> {
        self.find_by_tags(owner, &filter.required_tags(), &filter.negative)
    }
}

/// Reads the bookmark columns of a row; tags are filled in by the caller.
fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
    Ok(Bookmark {
        id: row.get(0)?,
        owner: row.get(1)?,
        url: row.get(2)?,
        title: row.get(3)?,
        tags: Vec::new(),
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn load_tags(conn: &Connection, bookmark_id: &str) -> Result<Vec<String>, BookmarkError> {
    let mut stmt = conn.prepare_cached(
        "SELECT tag FROM bookmark_tags WHERE bookmark_id = ?1 ORDER BY position",
    )?;
    let rows = stmt.query_map(params![bookmark_id], |row| row.get(0))?;

    let mut tags = Vec::new();
    for row in rows {
        tags.push(row?);
    }
    Ok(tags)
}

/// Executes `query` and returns full records with their tags.
///
/// The joined rows of one bookmark are adjacent, so they fold into a single
/// record in one pass.
fn fetch(conn: &Connection, query: &BookmarkQuery) -> Result<Vec<Bookmark>, BookmarkError> {
    let (sql, sql_params) = query.select_sql(Projection::Full);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(sql_params.iter()))?;

    let mut results: Vec<Bookmark> = Vec::new();
    while let Some(row) = rows.next()? {
        let id: String = row.get(0)?;
        let tag: Option<String> = row.get(6)?;
        if let Some(last) = results.last_mut().filter(|last| last.id == id) {
            last.tags.extend(tag);
            continue;
        }
        let mut bookmark = row_to_bookmark(row)?;
        bookmark.tags.extend(tag);
        results.push(bookmark);
    }
    Ok(results)
}

/// Key-only lookup of the record for (owner, url).
///
/// More than one key means the per-owner URL invariant is broken.
fn existing_key(conn: &Connection, owner: &str, url: &str) -> Result<Option<String>, BookmarkError> {
    let query = BookmarkQuery::for_owner(owner).with_url(url);
    let (sql, sql_params) = query.select_sql(Projection::KeysOnly);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(sql_params.iter()), |row| row.get::<_, String>(0))?;

    let mut keys = Vec::new();
    for row in rows {
        keys.push(row?);
    }

    match keys.len() {
        0 => Ok(None),
        1 => Ok(keys.pop()),
        n => {
            tracing::error!(owner, url, records = n, "duplicate bookmarks for url");
            Err(BookmarkError::Integrity {
                owner: owner.to_string(),
                url: url.to_string(),
            })
        }
    }
}

fn write_tags(conn: &Connection, bookmark_id: &str, tags: &[String]) -> Result<(), BookmarkError> {
    conn.execute("DELETE FROM bookmark_tags WHERE bookmark_id = ?1", params![bookmark_id])?;
    let mut stmt = conn.prepare_cached(
        "INSERT INTO bookmark_tags (bookmark_id, position, tag) VALUES (?1, ?2, ?3)",
    )?;
    for (position, tag) in tags.iter().enumerate() {
        stmt.execute(params![bookmark_id, position as i64, tag])?;
    }
    Ok(())
}

fn strip_tag(conn: &Connection, owner: &str, tag: &str, exclude_url: &str) -> Result<usize, BookmarkError> {
    let holders = fetch(conn, &BookmarkQuery::for_owner(owner).with_tags([tag]))?;

    let mut rewritten = 0;
    for bookmark in holders.iter().filter(|b| b.url != exclude_url) {
        // Fresh sequence per record; relative order of the rest is kept.
        let remaining: Vec<String> = bookmark
            .tags
            .iter()
            .filter(|t| t.as_str() != tag)
            .cloned()
            .collect();
        write_tags(conn, &bookmark.id, &remaining)?;
        rewritten += 1;
    }
    Ok(rewritten)
}

fn load_bookmark(conn: &Connection, id: &str) -> Result<Bookmark, BookmarkError> {
    let mut bookmark = conn.query_row(
        "SELECT id, owner, url, title, created_at, updated_at FROM bookmarks WHERE id = ?1",
        params![id],
        row_to_bookmark,
    )?;
    bookmark.tags = load_tags(conn, id)?;
    Ok(bookmark)
}

fn substitute_query(bookmarks: &mut [Bookmark], query: &str) {
    if query.is_empty() {
        return;
    }
    for bookmark in bookmarks {
        bookmark.url = bookmark.url.replace(QUERY_PLACEHOLDER, query);
    }
}

impl<'a> BookmarkRepositoryTrait for BookmarkRepository<'a> {
    fn find_by_filter(&self, owner: &str, filter: &FilterRequest) -> Result<FilterResult, BookmarkError> {
        debug_assert_eq!(owner, filter.owner, "filter was parsed for another owner");
        let mut bookmarks = self.run_filter(owner, filter)?;
        let mut effective = filter.clone();

        if bookmarks.is_empty() && !filter.is_fallback {
            effective = filter.fallback();
            tracing::debug!(owner, tag_string = %filter.tag_string, "no matches, using fallback tag");
            bookmarks = self.run_filter(owner, &effective)?;
        }

        substitute_query(&mut bookmarks, &effective.query);
        Ok(FilterResult {
            bookmarks,
            filter: effective,
        })
    }

    fn find_by_tags(&self, owner: &str, required: &[String], excluded: &[String]) -> Result<Vec<Bookmark>, BookmarkError> {
        let query = BookmarkQuery::for_owner(owner)
            .with_tags(required.iter().cloned())
            .ordered_by(Order::TitleAsc);
        let candidates = fetch(self.conn, &query)?;
        let total = candidates.len();

        let results: Vec<Bookmark> = if excluded.is_empty() {
            candidates
        } else {
            candidates
                .into_iter()
                .filter(|b| !b.tags.iter().any(|t| excluded.contains(t)))
                .collect()
        };

        tracing::debug!(owner, candidates = total, returned = results.len(), "tag lookup");
        Ok(results)
    }

    fn export(&self, owner: &str) -> Result<Vec<Bookmark>, BookmarkError> {
        fetch(self.conn, &BookmarkQuery::for_owner(owner).ordered_by(Order::TitleAsc))
    }

    /// Upserts by (owner, url).
    ///
    /// The unique-tag strip and the write share one transaction.
    fn save(&mut self, bookmark: &NewBookmark) -> Result<SaveOutcome, BookmarkError> {
        if bookmark.url.is_empty() {
            tracing::debug!(owner = %bookmark.owner, "ignoring save without url");
            return Ok(SaveOutcome::Skipped);
        }

        let owner = bookmark.owner.as_str();
        let url = bookmark.url.as_str();
        let title = if bookmark.title.is_empty() {
            url
        } else {
            bookmark.title.as_str()
        };

        let tx = self.conn.unchecked_transaction()?;
        let existing = existing_key(&tx, owner, url)?;

        let mut tags: Vec<String> = Vec::with_capacity(bookmark.tags.len());
        for token in &bookmark.tags {
            match token.op {
                TagOp::Negative => {
                    tracing::debug!(owner, tag = %token.name, "negative tag has no meaning on save");
                    continue;
                }
                TagOp::Unique => {
                    let stripped = strip_tag(&tx, owner, &token.name, url)?;
                    tracing::info!(owner, tag = %token.name, stripped, "claimed unique tag");
                }
                TagOp::Positive => {}
            }
            if !tags.contains(&token.name) {
                tags.push(token.name.clone());
            }
        }

        let now = (self.clock)();
        let (id, created) = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE bookmarks SET title = ?1, updated_at = ?2 WHERE id = ?3",
                    params![title, now, id],
                )?;
                (id, false)
            }
            None => {
                let id = Uuid::new_v4().to_string();
                tx.execute(
                    "INSERT INTO bookmarks (id, owner, url, title, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![id, owner, url, title, now, now],
                )?;
                (id, true)
            }
        };
        write_tags(&tx, &id, &tags)?;

        let stored = load_bookmark(&tx, &id)?;
        tx.commit()?;

        tracing::info!(owner, url, created, tags = tags.len(), "saved bookmark");
        Ok(if created {
            SaveOutcome::Created(stored)
        } else {
            SaveOutcome::Updated(stored)
        })
    }

    fn delete(&mut self, owner: &str, url: &str) -> Result<bool, BookmarkError> {
        if url.is_empty() {
            return Ok(false);
        }

        let tx = self.conn.unchecked_transaction()?;
        let Some(id) = existing_key(&tx, owner, url)? else {
            return Ok(false);
        };
        tx.execute("DELETE FROM bookmark_tags WHERE bookmark_id = ?1", params![id])?;
        tx.execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?;
        tx.commit()?;

        tracing::info!(owner, url, "deleted bookmark");
        Ok(true)
    }

    fn remove_tag_from_all_except(&mut self, owner: &str, tag: &str, exclude_url: &str) -> Result<usize, BookmarkError> {
        let tx = self.conn.unchecked_transaction()?;
        let rewritten = strip_tag(&tx, owner, tag, exclude_url)?;
        tx.commit()?;
        Ok(rewritten)
    }
}
