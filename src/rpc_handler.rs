//! RPC method handler for the Binmarks JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` is thin glue: it resolves the current user, builds a
//! repository over the app's connection and calls into the core.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_repository::BookmarkRepositoryTrait;
use crate::services::identity::IdentityProvider;
use crate::services::index_service::{quick_filter, IndexService};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::bookmark::{Bookmark, NewBookmark, SaveOutcome};
use crate::types::filter::IndexOutcome;

fn str_param<'p>(params: &'p Value, key: &str) -> &'p str {
    params.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

/// JSON shape of a bookmark handed to the presentation layer.
pub fn bookmark_json(b: &Bookmark, favicon_service: &str) -> Value {
    json!({
        "url": b.url,
        "title": b.title,
        "tags": b.tags,
        "tag_string": b.tag_string(),
        "favicon_url": b.favicon_url(favicon_service),
        "created_at": b.created_at,
        "updated_at": b.updated_at,
    })
}

fn index_json(app: &App, owner: &str, full_query: &str) -> Result<Value, String> {
    let repo = app.repository();
    let outcome = IndexService::new(&repo)
        .index(owner, full_query)
        .map_err(|e| e.to_string())?;

    match outcome {
        IndexOutcome::Redirect(url) => Ok(json!({"redirect": url})),
        IndexOutcome::List(view) => {
            let favicon = &app.settings_engine.get_settings().display.favicon_service;
            let items: Vec<Value> = view.bookmarks.iter().map(|b| bookmark_json(b, favicon)).collect();
            Ok(json!({
                "title": view.title,
                "query": view.query,
                "tag_string": view.tag_string,
                "count": view.count,
                "bookmarks": items,
            }))
        }
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        "session.user" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"user": a.identity.current_user()}))
        }

        // ─── Bookmarks ───
        "bookmark.index" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let Some(owner) = a.identity.current_user() else {
                return Ok(json!({"welcome": true}));
            };
            index_json(&a, owner, str_param(params, "q"))
        }
        "bookmark.save" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let owner = a.identity.require_user().map_err(|e| e.to_string())?;
            let submission = NewBookmark::new(
                owner,
                str_param(params, "url"),
                str_param(params, "title"),
                str_param(params, "tags"),
            );
            let outcome = a.repository().save(&submission).map_err(|e| e.to_string())?;

            let favicon = &a.settings_engine.get_settings().display.favicon_service;
            let mut response = json!({
                "saved": !matches!(outcome, SaveOutcome::Skipped),
                "created": outcome.is_new(),
                "bookmark": outcome.bookmark().map(|b| bookmark_json(b, favicon)),
            });
            // Like the create form: answer with the listing for the same search.
            if let Some(q) = params.get("q").and_then(|v| v.as_str()) {
                response["index"] = index_json(&a, owner, q)?;
            }
            Ok(response)
        }
        "bookmark.delete" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let owner = a.identity.require_user().map_err(|e| e.to_string())?;
            let deleted = a
                .repository()
                .delete(owner, str_param(params, "url"))
                .map_err(|e| e.to_string())?;
            Ok(json!({"deleted": deleted}))
        }
        "bookmark.export" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let owner = a.identity.require_user().map_err(|e| e.to_string())?;
            let bookmarks = a.repository().export(owner).map_err(|e| e.to_string())?;
            let favicon = &a.settings_engine.get_settings().display.favicon_service;
            let items: Vec<Value> = bookmarks.iter().map(|b| bookmark_json(b, favicon)).collect();
            Ok(json!({"count": items.len(), "bookmarks": items}))
        }
        "bookmark.quick_filter" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let owner = a.identity.require_user().map_err(|e| e.to_string())?;
            let bookmarks = a.repository().export(owner).map_err(|e| e.to_string())?;
            let matches = quick_filter(&bookmarks, str_param(params, "keywords"));
            let favicon = &a.settings_engine.get_settings().display.favicon_service;
            let items: Vec<Value> = matches.iter().map(|b| bookmark_json(b, favicon)).collect();
            Ok(json!(items))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
