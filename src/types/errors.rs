use thiserror::Error;

// === BookmarkError ===

/// Errors related to bookmark storage and retrieval.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// More than one record exists for the same owner and URL.
    #[error("Multiple bookmarks found for {owner}: {url}")]
    Integrity { owner: String, url: String },
    /// Database operation failed.
    #[error("Bookmark database error: {0}")]
    Database(#[from] rusqlite::Error),
}

// === IdentityError ===

/// Errors related to resolving the current user.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No user is signed in.
    #[error("Not signed in")]
    NotSignedIn,
    /// The configured identity is not usable.
    #[error("Invalid user identity: {0:?}")]
    Invalid(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
