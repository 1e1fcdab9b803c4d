//! Logger setup on top of `env_logger`.
//!
//! When file logging is enabled, records go to
//! `~/.config/autolaunch/logs/autolaunch.log`. If that file already
//! exceeds the configured max size at startup, it is rotated to
//! `autolaunch.log.1` (one backup kept). Otherwise records go to stderr.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

const LOG_FILE_NAME: &str = "autolaunch.log";
const BACKUP_SUFFIX: &str = ".1";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `true`: the launcher
    /// usually runs at logon without a console.
    pub enabled: bool,
    /// Minimum log level: "trace", "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

impl LogConfig {
    /// Parses `level`, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.level.trim()).unwrap_or(LevelFilter::Info)
    }

    /// Rotation threshold in bytes, clamped for absurd settings values.
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb.saturating_mul(1024 * 1024)
    }
}

/// Initialises the global logger. Call once at startup.
///
/// `RUST_LOG` overrides the configured level. Calling twice is harmless;
/// the second call is ignored.
pub fn init(config: &LogConfig) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.level_filter())
        .parse_env(env_logger::Env::default())
        .format_timestamp_secs();

    if config.enabled
        && let Some(file) = open_log_file(config.max_file_bytes())
    {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();
}

fn open_log_file(max_bytes: u64) -> Option<File> {
    let dir = crate::config::log_dir()?;
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE_NAME);

    if let Err(e) = rotate_if_needed(&path, max_bytes) {
        eprintln!("Warning: could not rotate {}: {e}", path.display());
    }

    OpenOptions::new().create(true).append(true).open(&path).ok()
}

/// Moves `path` to its `.1` backup when it has reached `max_bytes`.
///
/// Returns whether a rotation happened. A `max_bytes` of zero disables
/// rotation.
pub fn rotate_if_needed(path: &Path, max_bytes: u64) -> io::Result<bool> {
    if max_bytes == 0 {
        return Ok(false);
    }
    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if len < max_bytes {
        return Ok(false);
    }
    fs::rename(path, backup_path(path))?;
    Ok(true)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}
