//! XDG autostart store for Linux and other freedesktop sessions.
//!
//! Each key maps to `<config dir>/autostart/<key>.desktop`; the stored
//! value is the entry's `Exec=` line. Desktop sessions launch every
//! non-hidden entry of that directory at login.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use autolaunch_core::{AutostartStore, RegistrationError};

/// Autostart store over a directory of `.desktop` files.
#[derive(Debug, Clone)]
pub struct XdgStore {
    dir: PathBuf,
}

impl XdgStore {
    /// Uses `dir` as the autostart directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses `$XDG_CONFIG_HOME/autostart` (usually `~/.config/autostart`).
    pub fn for_current_user() -> Result<Self, RegistrationError> {
        let base = dirs::config_dir().ok_or_else(|| {
            RegistrationError::StoreUnavailable("could not determine the config directory".into())
        })?;
        Ok(Self::new(base.join("autostart")))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.desktop", key.to_ascii_lowercase()))
    }
}

impl AutostartStore for XdgStore {
    fn get(&self, key: &str) -> Result<Option<String>, RegistrationError> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(parse_exec(&content).map(|exec| unescape_exec(&exec))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RegistrationError> {
        fs::create_dir_all(&self.dir).map_err(|e| map_io(&self.dir, e))?;
        let path = self.entry_path(key);
        fs::write(&path, desktop_entry(key, value)).map_err(|e| map_io(&path, e))
    }

    fn delete(&mut self, key: &str) -> Result<bool, RegistrationError> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io(&path, e)),
        }
    }
}

fn desktop_entry(name: &str, command: &str) -> String {
    let exec = escape_exec(command);
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={name}\n\
         Comment=Launch configured programs at session start\n\
         Exec={exec}\n\
         Terminal=false\n\
         X-GNOME-Autostart-enabled=true\n"
    )
}

/// Returns the `Exec=` value of the `[Desktop Entry]` group.
///
/// Entries hidden with `Hidden=true` are treated as absent, matching how
/// sessions skip them.
fn parse_exec(content: &str) -> Option<String> {
    let mut in_desktop_entry = false;
    let mut exec = None;
    let mut hidden = false;

    for line in content.lines() {
        let line = line.trim();
        if line == "[Desktop Entry]" {
            in_desktop_entry = true;
            continue;
        }
        if line.starts_with('[') {
            in_desktop_entry = false;
            continue;
        }
        if !in_desktop_entry {
            continue;
        }
        if let Some(val) = line.strip_prefix("Exec=") {
            exec = Some(val.to_string());
        } else if let Some(val) = line.strip_prefix("Hidden=") {
            hidden = val.trim().eq_ignore_ascii_case("true");
        }
    }

    if hidden { None } else { exec }
}

/// Encodes a command line for an `Exec=` value.
///
/// Inside double quotes `` ` ``, `$` and `\` get a backslash; `%` is
/// doubled so it isn't read as a field code. Backslashes are then
/// doubled again for the string value itself.
fn escape_exec(command: &str) -> String {
    let mut out = String::with_capacity(command.len());
    let mut quoted = false;
    for c in command.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                out.push(c);
            }
            '%' => out.push_str("%%"),
            '`' | '$' | '\\' if quoted => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.replace('\\', "\\\\")
}

/// Reverses [`escape_exec`], also accepting the other string escapes
/// (`\s`, `\n`, `\t`, `\r`) hand-written entries may use.
fn unescape_exec(value: &str) -> String {
    let mut exec = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            exec.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => exec.push(' '),
            Some('n') => exec.push('\n'),
            Some('t') => exec.push('\t'),
            Some('r') => exec.push('\r'),
            Some(other) => exec.push(other),
            None => exec.push('\\'),
        }
    }

    let mut out = String::with_capacity(exec.len());
    let mut quoted = false;
    let mut chars = exec.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                quoted = !quoted;
                out.push(c);
            }
            '%' if chars.peek() == Some(&'%') => {
                chars.next();
                out.push('%');
            }
            '\\' if quoted => match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    out
}

fn map_io(path: &Path, e: io::Error) -> RegistrationError {
    let message = format!("{}: {e}", path.display());
    match e.kind() {
        ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
            RegistrationError::AccessDenied(message)
        }
        _ => RegistrationError::StoreUnavailable(message),
    }
}
