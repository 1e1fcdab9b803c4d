use autolaunch_core::notify::ConsoleSink;
use autolaunch_core::sequencer::ThreadSleeper;
use autolaunch_core::{LaunchSequencer, NotificationSink, Settings, config};
use autolaunch_platform::DetachedSpawner;

use crate::ConfigArgs;

/// Loads the program list and launches it in order.
///
/// Exits with status 1 only when the list cannot be loaded; programs
/// that fail to start are reported but don't change the exit status.
pub fn execute(args: &ConfigArgs, settings: &Settings) {
    let path = super::programs_path(args, settings);
    log::info!("Loading program list from {}", path.display());

    let entries = match config::load(&path) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("{}: {e}", path.display());
            eprintln!("Error: {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    if entries.is_empty() {
        println!("No programs configured in {}.", path.display());
    }

    let mut sink: Box<dyn NotificationSink> = if settings.notify.console {
        Box::new(ConsoleSink)
    } else {
        Box::new(())
    };

    let mut sequencer = LaunchSequencer::new(DetachedSpawner, ThreadSleeper);
    let report = sequencer.run(&entries, &mut *sink);

    if report.failed() > 0 {
        log::warn!(
            "{} of {} program(s) failed to start",
            report.failed(),
            report.outcomes.len()
        );
    }
}
