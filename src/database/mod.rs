//! Binmarks database layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! owner-scoped query builder used by the bookmark repository.
//!
//! # Usage
//!
//! ```no_run
//! use binmarks::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("binmarks.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;
pub mod query;

pub use connection::Database;
pub use query::{BookmarkQuery, Order, Projection};
