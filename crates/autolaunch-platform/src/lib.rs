/// Per-user autostart stores (HKCU Run key or XDG autostart).
pub mod autostart;

/// Detached process creation.
pub mod process;

pub use autostart::{NativeStore, native_store};
pub use process::DetachedSpawner;
