use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::log::LogConfig;

/// Application settings for autolaunch itself.
///
/// Loaded from `~/.config/autolaunch/settings.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`. The program list
/// lives in its own JSON file; see [`crate::config`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Program list to launch when `--config` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programs: Option<PathBuf>,
    /// Logging settings.
    pub log: LogConfig,
    /// Console notification settings.
    pub notify: NotifyConfig,
}

/// Controls where per-entry status events are shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Print launch events to stdout.
    pub console: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { console: true }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine settings path")]
    NoPath,
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Tries to load and parse `settings.toml`.
pub fn try_load() -> Result<Settings, SettingsError> {
    let path = config::settings_path().ok_or(SettingsError::NoPath)?;
    let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse { path, source })
}

/// Loads the settings from disk, falling back to defaults.
///
/// A missing file silently returns defaults; any other problem is
/// printed as a warning, since logging is configured from these values
/// and is not running yet.
pub fn load() -> Settings {
    match try_load() {
        Ok(settings) => settings,
        Err(SettingsError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Settings::default()
        }
        Err(e) => {
            eprintln!("Warning: {e}");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_expected_values() {
        // Arrange / Act
        let settings = Settings::default();

        // Assert
        assert!(settings.programs.is_none());
        assert!(settings.log.enabled);
        assert_eq!(settings.log.level, "info");
        assert!(settings.notify.console);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        // Arrange
        let toml_str = "[log]\nlevel = \"debug\"\n";

        // Act
        let settings: Settings = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(settings.log.level, "debug");
        assert!(settings.log.enabled);
        assert_eq!(settings.log.max_file_mb, 10);
        assert!(settings.notify.console);
    }

    #[test]
    fn programs_path_is_read() {
        // Arrange
        let toml_str = "programs = \"work.json\"\n[notify]\nconsole = false\n";

        // Act
        let settings: Settings = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(settings.programs, Some(PathBuf::from("work.json")));
        assert!(!settings.notify.console);
    }
}
