use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::raw::{RawConfig, normalize};
use super::{ConfigError, ProgramEntry};
use crate::settings::Settings;

/// Environment variable that relocates the configuration directory.
pub const HOME_ENV: &str = "AUTOLAUNCH_HOME";

/// Returns the config directory: `~/.config/autolaunch/`.
///
/// `AUTOLAUNCH_HOME` takes precedence when set, which allows portable
/// installs next to the executable.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    default_config_dir()
}

/// Returns `~/.config/autolaunch/`, ignoring `AUTOLAUNCH_HOME`.
///
/// This is where a login session looks, since it doesn't inherit the
/// environment `register` was called from.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("autolaunch"))
}

/// Returns `~/.config/autolaunch/config.json`, ignoring `AUTOLAUNCH_HOME`.
pub fn default_programs_path() -> Option<PathBuf> {
    default_config_dir().map(|d| d.join("config.json"))
}

/// Returns the default program list path: `~/.config/autolaunch/config.json`.
pub fn programs_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.json"))
}

/// Returns the settings file path: `~/.config/autolaunch/settings.toml`.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("settings.toml"))
}

/// Returns the log directory: `~/.config/autolaunch/logs/`.
pub fn log_dir() -> Option<PathBuf> {
    config_dir().map(|d| d.join("logs"))
}

/// Picks the program list to use.
///
/// An explicit path wins, then `programs` from the settings file
/// (relative paths are taken from the config directory), then the
/// default location.
pub fn resolve_programs_path(explicit: Option<&Path>, settings: &Settings) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    match &settings.programs {
        Some(path) if path.is_absolute() => Some(path.clone()),
        Some(path) => config_dir().map(|d| d.join(path)),
        None => programs_path(),
    }
}

/// Reads and validates the program list at `path`.
///
/// The file is read on every call; nothing is cached between runs.
pub fn load(path: &Path) -> Result<Vec<ProgramEntry>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse(&content)
}

/// Parses a program list from JSON text.
///
/// Accepts a bare list of entries or an object with a global `Delay`
/// and a `Programs` list. A leading byte-order mark is ignored.
pub fn parse(content: &str) -> Result<Vec<ProgramEntry>, ConfigError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let value: serde_json::Value = serde_json::from_str(content)?;
    let raw: RawConfig = serde_json::from_value(value).map_err(|_| {
        ConfigError::Schema(
            "expected a list of programs or an object with a \"Programs\" list".into(),
        )
    })?;
    normalize(raw)
}
