use std::path::Path;

use autolaunch_core::config;

/// Creates the starter configuration files at `~/.config/autolaunch/`.
///
/// Generates `config.json` (the program list) and `settings.toml`.
/// Existing files are not overwritten.
pub fn execute() {
    let Some(dir) = config::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    write_if_missing(
        &dir.join("config.json"),
        &config::template::generate_programs(),
    );
    write_if_missing(
        &dir.join("settings.toml"),
        &config::template::generate_settings(),
    );

    println!("\nAdd your programs to config.json, then run 'autolaunch register'.");
}

/// Writes content to a file only if it doesn't already exist.
fn write_if_missing(path: &Path, content: &str) {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(path, content) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => eprintln!("Error: could not write {}: {e}", path.display()),
    }
}
