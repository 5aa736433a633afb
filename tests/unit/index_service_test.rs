//! Unit tests for the IndexService: redirect versus listing, display titles
//! and the search-engine fallback.

use binmarks::database::Database;
use binmarks::managers::bookmark_repository::{BookmarkRepository, BookmarkRepositoryTrait};
use binmarks::services::index_service::{quick_filter, IndexService};
use binmarks::services::query_parser;
use binmarks::types::bookmark::NewBookmark;
use binmarks::types::filter::{IndexOutcome, IndexView};

fn seeded() -> Database {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    {
        let mut repo = BookmarkRepository::new(db.connection());
        for (url, title, tags) in [
            ("https://news.example", "News", "daily"),
            ("https://mail.example", "Mail", "daily,work"),
            ("https://wiki.example", "Wiki", "work"),
            ("https://journal.example", "Journal", "daily,hidden"),
            ("https://ddg.example/?q=%s", "DuckDuckGo", "default"),
        ] {
            repo.save(&NewBookmark::new("alice", url, title, tags)).unwrap();
        }
    }
    db
}

fn expect_list(outcome: IndexOutcome) -> IndexView {
    match outcome {
        IndexOutcome::List(view) => view,
        IndexOutcome::Redirect(url) => panic!("expected a listing, got redirect to {}", url),
    }
}

#[test]
fn test_empty_query_lists_everything_not_hidden() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());
    let service = IndexService::new(&repo);

    let view = expect_list(service.index("alice", "").unwrap());

    assert_eq!(view.count, 4);
    assert_eq!(view.title, "4 Bookmarks");
    assert!(view.bookmarks.iter().all(|b| !b.has_tag("hidden")));
}

#[test]
fn test_empty_query_matches_explicit_list_mode() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());

    let implicit = repo
        .find_by_filter("alice", &query_parser::parse("alice", "", ""))
        .unwrap();
    let explicit = repo
        .find_by_filter("alice", &query_parser::parse("alice", "-follow", ""))
        .unwrap();

    assert_eq!(implicit.bookmarks, explicit.bookmarks);
    assert!(!implicit.filter.follow_mode);
    assert!(!explicit.filter.follow_mode);
}

#[test]
fn test_single_match_redirects_in_follow_mode() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());
    let service = IndexService::new(&repo);

    let outcome = service.index("alice", "work,-daily").unwrap();

    assert_eq!(outcome, IndexOutcome::Redirect("https://wiki.example".to_string()));
}

#[test]
fn test_single_match_lists_when_follow_disabled() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());
    let service = IndexService::new(&repo);

    let view = expect_list(service.index("alice", "work,-daily,-follow").unwrap());

    assert_eq!(view.count, 1);
    assert_eq!(view.tag_string, "work,-daily,-follow");
    assert_eq!(view.title, "1 Bookmark tagged with 'work,-daily,-follow'");
}

#[test]
fn test_multiple_matches_list_with_title() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());
    let service = IndexService::new(&repo);

    let view = expect_list(service.index("alice", "daily").unwrap());

    assert_eq!(view.count, 2);
    assert_eq!(view.title, "2 Bookmarks tagged with 'daily'");
    let titles: Vec<&str> = view.bookmarks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Mail", "News"]);
}

#[test]
fn test_unknown_tag_redirects_to_search_template() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());
    let service = IndexService::new(&repo);

    let outcome = service.index("alice", "golang tutorial").unwrap();

    assert_eq!(
        outcome,
        IndexOutcome::Redirect("https://ddg.example/?q=golang tutorial".to_string())
    );
}

#[test]
fn test_fallback_listing_title_uses_full_query() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());
    let service = IndexService::new(&repo);

    let view = expect_list(service.index("alice", "nope,-follow rust").unwrap());

    assert_eq!(view.tag_string, "default");
    assert_eq!(view.query, "nope,-follow rust");
    assert_eq!(
        view.title,
        "1 Bookmark tagged with 'default' and query 'nope,-follow rust'"
    );
    assert_eq!(view.bookmarks[0].url, "https://ddg.example/?q=nope,-follow rust");
}

#[test]
fn test_other_owner_sees_nothing() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());
    let service = IndexService::new(&repo);

    let view = expect_list(service.index("bob", "").unwrap());

    assert_eq!(view.count, 0);
    assert_eq!(view.title, "0 Bookmarks tagged with 'default'");
}

#[test]
fn test_quick_filter_over_listing() {
    let db = seeded();
    let repo = BookmarkRepository::new(db.connection());

    let all = repo.export("alice").unwrap();
    let matches = quick_filter(&all, "DAILY,mail");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].url, "https://mail.example");
}
