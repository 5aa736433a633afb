//! Integration-level unit tests for the SettingsEngine public API.

use binmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use binmarks::types::errors::SettingsError;
use binmarks::types::settings::AppSettings;
use serde_json::json;
use tempfile::TempDir;

/// Engine backed by `settings.json` in `dir`; the caller holds the `TempDir`.
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, AppSettings::default());
    assert_eq!(settings.general.user, None);
    assert_eq!(settings.general.database_file, "binmarks.db");
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine.set_value("general.user", json!("alice")).unwrap();
        engine.set_value("logging.level", json!("debug")).unwrap();
    }

    let mut engine2 = engine_in_temp(&dir);
    let loaded = engine2.load().unwrap();
    assert_eq!(loaded.general.user.as_deref(), Some("alice"));
    assert_eq!(loaded.logging.level, "debug");
}

#[test]
fn test_set_value_rejects_unknown_keys_and_bad_values() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    assert!(matches!(
        engine.set_value("", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("general.nope", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("nope.user", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("general.user.name", json!("x")),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("general.database_file", json!(42)),
        Err(SettingsError::InvalidValue(_))
    ));
    assert_eq!(*engine.get_settings(), AppSettings::default());
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let mut engine = engine_in_temp(&dir);

    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("display.favicon_service", json!("https://icons.example/?d="))
            .unwrap();
        engine.reset().unwrap();
        assert_eq!(*engine.get_settings(), AppSettings::default());
    }

    let mut engine2 = engine_in_temp(&dir);
    assert_eq!(engine2.load().unwrap(), AppSettings::default());
}
