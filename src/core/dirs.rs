use crate::core::error::ProjectTrackerError;
use std::path::PathBuf;

const APP_DIR: &str = "project-tracker";

/// Overrides the platform config directory; used by tests and portable installs
pub const CONFIG_DIR_ENV: &str = "PROJECT_TRACKER_CONFIG_DIR";

/// Overrides the platform cache directory
pub const CACHE_DIR_ENV: &str = "PROJECT_TRACKER_CACHE_DIR";

pub fn get_config_directory() -> Result<PathBuf, ProjectTrackerError> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or(ProjectTrackerError::ConfigDirectoryNotFound)
}

pub fn get_cache_directory() -> Result<PathBuf, ProjectTrackerError> {
    if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Caches")),
        _ => dirs::cache_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or(ProjectTrackerError::CacheDirectoryNotFound)
}
