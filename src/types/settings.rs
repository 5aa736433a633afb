use serde::{Deserialize, Serialize};

use super::bookmark::DEFAULT_FAVICON_SERVICE;

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    pub general: GeneralSettings,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
}

/// Identity and storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Identity used when no `BINMARKS_USER` override is present.
    /// `None` means nobody is signed in.
    pub user: Option<String>,
    /// Database file name inside the data directory.
    pub database_file: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            user: None,
            database_file: "binmarks.db".to_string(),
        }
    }
}

/// Settings consumed by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    pub favicon_service: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            favicon_service: DEFAULT_FAVICON_SERVICE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
