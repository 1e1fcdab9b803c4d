use std::collections::HashSet;
use std::path::{Path, PathBuf};

use autolaunch_core::expand::expand_env;
use autolaunch_core::{ProgramEntry, Settings, config};

use crate::ConfigArgs;

/// ANSI escape helpers for check output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";
const OFF: &str = "\x1b[90m[off]\x1b[0m";

/// Validates the program list and reports problems without launching.
///
/// Exits with status 1 when the list cannot be loaded. Missing
/// executables and duplicate names are warnings only: the file is
/// still valid and the paths may appear later.
pub fn execute(args: &ConfigArgs, settings: &Settings) {
    let path = super::programs_path(args, settings);

    let entries = match config::load(&path) {
        Ok(entries) => entries,
        Err(e) => {
            println!("  {FAIL} {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    println!(
        "  {OK} {} is valid ({} program(s))",
        path.display(),
        entries.len()
    );

    for entry in &entries {
        check_entry(entry);
    }
    check_duplicate_names(&entries);
}

fn check_entry(entry: &ProgramEntry) {
    let delay = entry.delay.as_secs_f64();
    if !entry.enabled {
        println!("  {OFF} {} (disabled)", entry.name);
        return;
    }

    let resolved = PathBuf::from(expand_env(&entry.path));
    match executable_state(&resolved) {
        Some(true) => println!(
            "  {OK} {} after {delay:.1}s: {}",
            entry.name,
            resolved.display()
        ),
        Some(false) => println!(
            "  {WARN} {} after {delay:.1}s: {} not found",
            entry.name,
            resolved.display()
        ),
        None => println!(
            "  {OK} {} after {delay:.1}s: {} (resolved at launch)",
            entry.name,
            resolved.display()
        ),
    }
}

/// Returns whether an absolute path exists; `None` for relative paths,
/// which the OS resolves through its search path at launch.
fn executable_state(path: &Path) -> Option<bool> {
    path.is_absolute().then(|| path.is_file())
}

fn check_duplicate_names(entries: &[ProgramEntry]) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.name.as_str()) && reported.insert(entry.name.as_str()) {
            println!("  {WARN} name '{}' is used more than once", entry.name);
        }
    }
}
