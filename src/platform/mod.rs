// Binmarks platform paths
// Config and data directories per OS, selected with `cfg(target_os)`.
//
// Linux:   $XDG_CONFIG_HOME/binmarks, $XDG_DATA_HOME/binmarks
// macOS:   ~/Library/Application Support/Binmarks (both)
// Windows: %APPDATA%/Binmarks (both)

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "BINMARKS_DATA_DIR";

#[cfg_attr(target_os = "windows", allow(dead_code))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `$XDG_*` variable if set, else `~/<fallback>`, joined with the app name.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    let base = match env::var(var) {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => fallback.iter().fold(home_dir(), |p, part| p.join(part)),
    };
    base.join("binmarks")
}

/// Returns the platform-specific configuration directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join("Binmarks")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("Binmarks")
    }
}

/// Returns the data directory, honouring `BINMARKS_DATA_DIR`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV_VAR) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}
