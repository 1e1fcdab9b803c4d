//! Manages automatic startup when the user logs in.
//!
//! Delegates to [`autolaunch_platform::autostart`] for the store and to
//! [`AutostartRegistrar`] for the registration rules.

use std::path::PathBuf;

use autolaunch_core::{AutostartRegistrar, RegistrationError, Settings, config};
use autolaunch_platform::{NativeStore, native_store};

use crate::ConfigArgs;

/// Registers the running executable in `run` mode.
pub fn register(args: &ConfigArgs, settings: &Settings) {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => fail(&format!("could not resolve exe path: {e}")),
    };
    let programs = recorded_programs_path(args, settings);

    let mut registrar = open_registrar();
    match registrar.register(&exe, programs.as_deref()) {
        Ok(command) => {
            println!("Autostart registered.");
            println!("  {command}");
        }
        Err(e) => fail_registration(&e),
    }
}

/// Removes the registration; succeeds when there is nothing to remove.
pub fn uninstall() {
    let mut registrar = open_registrar();
    match registrar.unregister() {
        Ok(true) => println!("Autostart registration removed."),
        Ok(false) => println!("Autostart was not registered. Nothing to remove."),
        Err(e) => fail_registration(&e),
    }
}

pub fn status() {
    let registrar = open_registrar();
    match registrar.registered_command() {
        Ok(Some(command)) => {
            println!("Autostart is registered.");
            println!("  {command}");
            if let Some(launcher) = registrar.registered_launcher()
                && !launcher.exists()
            {
                println!("  Warning: {} no longer exists.", launcher.display());
            }
        }
        Ok(None) => println!("Autostart is not registered."),
        Err(e) => fail_registration(&e),
    }
}

/// Program list to pin in the registered command.
///
/// `None` when a login-time `run` would find the same file on its own.
/// An explicit `--config`, a `programs` setting or `AUTOLAUNCH_HOME` all
/// move it away from the default, so the resolved path is recorded.
fn recorded_programs_path(args: &ConfigArgs, settings: &Settings) -> Option<PathBuf> {
    let resolved = match std::path::absolute(super::programs_path(args, settings)) {
        Ok(path) => path,
        Err(e) => fail(&format!("could not resolve config path: {e}")),
    };
    if config::default_programs_path().as_deref() == Some(resolved.as_path()) {
        None
    } else {
        Some(resolved)
    }
}

fn open_registrar() -> AutostartRegistrar<NativeStore> {
    match native_store() {
        Ok(store) => AutostartRegistrar::new(store),
        Err(e) => fail_registration(&e),
    }
}

fn fail_registration(e: &RegistrationError) -> ! {
    log::error!("{e}");
    fail(&e.to_string())
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}
