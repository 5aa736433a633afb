// Binmarks shared type definitions
// Each submodule defines types used across the crate.

pub mod bookmark;
pub mod errors;
pub mod filter;
pub mod settings;
pub mod tag;
