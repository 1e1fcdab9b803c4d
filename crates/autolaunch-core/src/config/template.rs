/// Generates a starter `config.json` with one disabled example entry.
///
/// Used by `autolaunch init`. JSON has no comments, so the example is
/// left disabled rather than explained inline.
pub fn generate_programs() -> String {
    let example = if cfg!(windows) {
        r"%WINDIR%\\notepad.exe"
    } else {
        "/usr/bin/xterm"
    };
    format!(
        r#"[
  {{
    "Name": "Example",
    "Path": "{example}",
    "Delay": 5,
    "Enabled": false
  }}
]
"#
    )
}

/// Generates the default `settings.toml` contents with explanatory comments.
pub fn generate_settings() -> String {
    r##"# autolaunch settings
# Location: ~/.config/autolaunch/settings.toml

# Program list to launch. Relative paths are resolved from this directory.
# programs = "config.json"

[log]
# Write logs to ~/.config/autolaunch/logs/autolaunch.log.
# When disabled, logs go to stderr.
enabled = true
# Minimum log level: "trace", "debug", "info", "warn", or "error".
# RUST_LOG overrides this.
level = "info"
# Maximum log file size in MB before rotation (checked at startup).
max_file_mb = 10

[notify]
# Print one line per launched program to the console.
console = true
"##
    .to_string()
}
