use autolaunch_core::RegistrationError;

#[cfg(windows)]
mod run_key;
#[cfg(not(windows))]
mod xdg;

#[cfg(windows)]
pub use run_key::RunKeyStore;
#[cfg(not(windows))]
pub use xdg::XdgStore;

/// The autostart store used on this platform.
#[cfg(windows)]
pub type NativeStore = RunKeyStore;
/// The autostart store used on this platform.
#[cfg(not(windows))]
pub type NativeStore = XdgStore;

/// Opens the current user's autostart store.
pub fn native_store() -> Result<NativeStore, RegistrationError> {
    #[cfg(windows)]
    {
        Ok(RunKeyStore::default())
    }
    #[cfg(not(windows))]
    {
        XdgStore::for_current_user()
    }
}
