// Binmarks services
// Stateless request logic (parsing, index assembly) plus identity and settings.

pub mod identity;
pub mod index_service;
pub mod query_parser;
pub mod settings_engine;
