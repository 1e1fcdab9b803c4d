use std::fmt;

/// Status events emitted while a launch sequence runs.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchEvent {
    /// The program was started.
    Started { name: String },
    /// The program could not be started.
    Failed { name: String, reason: String },
    /// The entry is disabled and was passed over.
    Skipped { name: String },
    /// The sequence is over. Sent exactly once, last.
    Finished {
        started: usize,
        failed: usize,
        skipped: usize,
    },
}

impl fmt::Display for LaunchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { name } => write!(f, "Started '{name}'"),
            Self::Failed { name, reason } => write!(f, "Failed to start '{name}': {reason}"),
            Self::Skipped { name } => write!(f, "'{name}' is disabled, skipping"),
            Self::Finished {
                started,
                failed,
                skipped,
            } => write!(
                f,
                "Launch finished: {started} started, {failed} failed, {skipped} skipped"
            ),
        }
    }
}

/// Receives status events from the launch sequence.
///
/// Implementations surface them to the user (console, tray, toast).
/// Delivery is best effort; a sink must not fail the run.
pub trait NotificationSink {
    fn notify(&mut self, event: &LaunchEvent);
}

/// Prints events to stdout, failures to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, event: &LaunchEvent) {
        match event {
            LaunchEvent::Failed { .. } => eprintln!("{event}"),
            _ => println!("{event}"),
        }
    }
}

/// Discards every event.
impl NotificationSink for () {
    fn notify(&mut self, _event: &LaunchEvent) {}
}

/// Records events in order. Handy for tests and for summaries.
impl NotificationSink for Vec<LaunchEvent> {
    fn notify(&mut self, event: &LaunchEvent) {
        self.push(event.clone());
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn notify(&mut self, event: &LaunchEvent) {
        (**self).notify(event);
    }
}
