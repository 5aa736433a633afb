// Binmarks state managers
// Managers own persistent state; the bookmark repository is the only one.

pub mod bookmark_repository;
