pub mod autostart;
pub mod check;
pub mod init;
pub mod run;

use std::path::PathBuf;

use autolaunch_core::{Settings, config};

use crate::ConfigArgs;

/// Resolves the program list path or exits with an error.
fn programs_path(args: &ConfigArgs, settings: &Settings) -> PathBuf {
    match config::resolve_programs_path(args.config.as_deref(), settings) {
        Some(path) => path,
        None => {
            eprintln!("Error: could not determine home directory; pass --config.");
            std::process::exit(1);
        }
    }
}
