pub mod autostart;
pub mod config;
pub mod expand;
pub mod log;
pub mod notify;
pub mod sequencer;
pub mod settings;

pub use autostart::{AutostartRegistrar, AutostartStore, MemoryStore, RegistrationError};
pub use config::{ConfigError, ProgramEntry};
pub use notify::{LaunchEvent, NotificationSink};
pub use sequencer::{LaunchOutcome, LaunchReport, LaunchSequencer, SpawnError, Spawner};
pub use settings::Settings;
