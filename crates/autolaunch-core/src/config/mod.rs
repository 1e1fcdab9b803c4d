mod loader;
mod raw;
pub mod template;

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub use loader::{
    HOME_ENV, config_dir, default_config_dir, default_programs_path, load, log_dir, parse,
    programs_path, resolve_programs_path, settings_path,
};

/// One program to launch at session start.
///
/// Produced by [`load`] from either supported file shape. The path is
/// stored as written; environment variables are expanded at launch time
/// so the file keeps working when they change.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramEntry {
    /// Display label. Not required to be unique.
    pub name: String,
    /// Executable path, possibly containing `%VAR%` or `$VAR` references.
    pub path: String,
    /// Extra command-line arguments passed to the program.
    pub args: Vec<String>,
    /// Wait applied before this entry is launched.
    pub delay: Duration,
    /// Disabled entries are skipped entirely, delay included.
    pub enabled: bool,
}

/// Errors produced while loading the program list.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Schema(String),

    #[error(
        "{}: invalid delay {value}, expected a non-negative number of seconds",
        delay_location(.index, .name)
    )]
    InvalidDelay {
        /// 1-based entry position, `None` for the global `Delay`.
        index: Option<usize>,
        /// Entry name; empty for the global `Delay`.
        name: String,
        value: String,
    },
}

fn delay_location(index: &Option<usize>, name: &str) -> String {
    match index {
        Some(i) => format!("entry {i} ({name})"),
        None => "global \"Delay\"".into(),
    }
}
