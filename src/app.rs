//! App Core for Binmarks.
//!
//! Bundles the database, settings and the identity of the current user.
//! Every core operation receives these explicitly; there is no global state.

use crate::database::connection::Database;
use crate::managers::bookmark_repository::BookmarkRepository;
use crate::platform;
use crate::services::identity::{IdentityProvider, StaticIdentity};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Central application struct.
///
/// `BookmarkRepository` borrows the connection with a lifetime, so it is
/// created on demand via [`App::repository`].
pub struct App {
    pub db: Database,
    pub settings_engine: SettingsEngine,
    pub identity: StaticIdentity,
}

impl App {
    /// Opens the database at `db_path` and loads settings from `settings_engine`.
    ///
    /// The identity comes from `BINMARKS_USER`, else from `general.user`.
    pub fn new(db_path: &str, mut settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        let settings = settings_engine.load()?;
        let identity = StaticIdentity::from_env_or(settings.general.user.clone())?;
        let db = Database::open(db_path)?;

        tracing::info!(db_path, signed_in = identity.current_user().is_some(), "binmarks initialized");
        Ok(Self {
            db,
            settings_engine,
            identity,
        })
    }

    /// Opens the database in the platform data directory.
    pub fn open_default(settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        let settings = settings_engine.get_settings();

        let data_dir = platform::get_data_dir();
        std::fs::create_dir_all(&data_dir)?;
        let db_path = data_dir.join(&settings.general.database_file);

        Self::new(&db_path.to_string_lossy(), settings_engine)
    }

    /// A repository over this app's connection.
    pub fn repository(&self) -> BookmarkRepository<'_> {
        BookmarkRepository::new(self.db.connection())
    }
}
