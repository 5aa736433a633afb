//! Binmarks: a personal bookmark manager driven by tag expressions.
//!
//! Bookmarks are filtered with comma-separated tag operators (`tag`, `-tag`,
//! `!tag`); a single match can be followed directly, which turns `%s`
//! template bookmarks into a personal search engine.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
