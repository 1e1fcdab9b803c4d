//! Registration of the launcher in the per-user autostart store.
//!
//! The store itself is an injected key-value abstraction so the
//! registry (or XDG autostart directory) is only touched by the binary,
//! and tests use [`MemoryStore`]. Exactly one value is kept, under
//! [`APP_ID`]; registering again overwrites it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fixed key under which the launcher command is stored.
pub const APP_ID: &str = "Autolaunch";

/// Errors from the autostart store.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("access denied to the autostart store: {0}")]
    AccessDenied(String),

    #[error("autostart store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Per-user key-value store consulted at session start.
pub trait AutostartStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, RegistrationError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), RegistrationError>;

    /// Removes `key`. Returns `Ok(false)` if it was not present.
    fn delete(&mut self, key: &str) -> Result<bool, RegistrationError>;
}

/// In-memory store used in tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AutostartStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, RegistrationError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RegistrationError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, RegistrationError> {
        Ok(self.values.remove(key).is_some())
    }
}

/// Creates, queries and removes the launcher's autostart entry.
pub struct AutostartRegistrar<S> {
    store: S,
}

impl<S: AutostartStore> AutostartRegistrar<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers `launcher` to run at session start in `run` mode.
    ///
    /// `programs` is appended as `--config` when the program list is not
    /// at its default location. Returns the command that was stored.
    pub fn register(
        &mut self,
        launcher: &Path,
        programs: Option<&Path>,
    ) -> Result<String, RegistrationError> {
        let command = launch_command(launcher, programs);
        self.store.set(APP_ID, &command)?;
        log::info!("Registered autostart command: {command}");
        Ok(command)
    }

    /// Removes the registration.
    ///
    /// Returns `Ok(false)` if there was nothing to remove, which is not
    /// an error so uninstall can be re-run safely.
    pub fn unregister(&mut self) -> Result<bool, RegistrationError> {
        let removed = self.store.delete(APP_ID)?;
        if removed {
            log::info!("Removed autostart registration");
        } else {
            log::info!("No autostart registration to remove");
        }
        Ok(removed)
    }

    /// Checks whether a registration exists. Store errors read as `false`.
    pub fn is_registered(&self) -> bool {
        matches!(self.store.get(APP_ID), Ok(Some(_)))
    }

    /// Returns the stored command line, if registered.
    pub fn registered_command(&self) -> Result<Option<String>, RegistrationError> {
        self.store.get(APP_ID)
    }

    /// Returns the launcher executable recorded in the stored command.
    pub fn registered_launcher(&self) -> Option<PathBuf> {
        let command = self.store.get(APP_ID).ok()??;
        launcher_from_command(&command)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Builds `"<launcher>" run [--config "<programs>"]`.
pub fn launch_command(launcher: &Path, programs: Option<&Path>) -> String {
    let mut command = format!("\"{}\" run", launcher.display());
    if let Some(programs) = programs {
        command.push_str(&format!(" --config \"{}\"", programs.display()));
    }
    command
}

/// Extracts the executable from a stored command line.
///
/// Handles a quoted first token as well as a bare one.
pub fn launcher_from_command(command: &str) -> Option<PathBuf> {
    let command = command.trim_start();
    let exe = if let Some(rest) = command.strip_prefix('"') {
        &rest[..rest.find('"')?]
    } else {
        command.split_whitespace().next()?
    };
    (!exe.is_empty()).then(|| PathBuf::from(exe))
}
