//! Sequential, delayed launching of configured programs.
//!
//! Entries run strictly one after another on the calling thread: wait
//! the entry's delay, start it detached, record the outcome, move on.
//! A failure is recorded and never stops the sequence.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::config::ProgramEntry;
use crate::expand::expand_env;
use crate::notify::{LaunchEvent, NotificationSink};

/// Why a program could not be started.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("executable not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("could not start {}: {source}", path.display())]
    Os {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SpawnError {
    /// Classifies an IO error returned while starting `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Os {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Fire-and-forget process creation.
///
/// Implementations start the program detached from the launcher and
/// keep no handle to it; the child belongs to the OS once started.
pub trait Spawner {
    fn spawn_detached(&self, path: &Path, args: &[String]) -> Result<(), SpawnError>;
}

impl<T: Spawner + ?Sized> Spawner for &T {
    fn spawn_detached(&self, path: &Path, args: &[String]) -> Result<(), SpawnError> {
        (**self).spawn_detached(path, args)
    }
}

/// Blocking wait between launches.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

impl<T: Sleeper + ?Sized> Sleeper for &mut T {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Result of one launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchOutcome {
    Started,
    Failed(String),
}

/// Outcome of one enabled entry, in launch order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryOutcome {
    pub name: String,
    /// Path after environment variable expansion.
    pub path: PathBuf,
    pub outcome: LaunchOutcome,
}

/// Ordered outcomes of a single run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchReport {
    pub outcomes: Vec<EntryOutcome>,
    /// Number of disabled entries that were skipped.
    pub skipped: usize,
}

impl LaunchReport {
    pub fn started(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == LaunchOutcome::Started)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.started()
    }
}

/// Drives a launch sequence with injected spawning and sleeping.
pub struct LaunchSequencer<P, S> {
    spawner: P,
    sleeper: S,
}

impl<P: Spawner, S: Sleeper> LaunchSequencer<P, S> {
    pub fn new(spawner: P, sleeper: S) -> Self {
        Self { spawner, sleeper }
    }

    /// Launches every enabled entry in order.
    ///
    /// Disabled entries are neither waited on nor started. One event is
    /// sent to `sink` per entry, skipped ones included, then a final
    /// summary.
    pub fn run(
        &mut self,
        entries: &[ProgramEntry],
        sink: &mut dyn NotificationSink,
    ) -> LaunchReport {
        let mut report = LaunchReport::default();

        for entry in entries {
            if !entry.enabled {
                let event = LaunchEvent::Skipped {
                    name: entry.name.clone(),
                };
                log::info!("{event}");
                sink.notify(&event);
                report.skipped += 1;
                continue;
            }

            if !entry.delay.is_zero() {
                log::info!(
                    "Waiting {:.1}s before launching '{}'",
                    entry.delay.as_secs_f64(),
                    entry.name
                );
                self.sleeper.sleep(entry.delay);
            }

            let outcome = self.launch(entry);
            let event = match &outcome.outcome {
                LaunchOutcome::Started => LaunchEvent::Started {
                    name: entry.name.clone(),
                },
                LaunchOutcome::Failed(reason) => LaunchEvent::Failed {
                    name: entry.name.clone(),
                    reason: reason.clone(),
                },
            };
            sink.notify(&event);
            report.outcomes.push(outcome);
        }

        let summary = LaunchEvent::Finished {
            started: report.started(),
            failed: report.failed(),
            skipped: report.skipped,
        };
        log::info!("{summary}");
        sink.notify(&summary);
        report
    }

    fn launch(&self, entry: &ProgramEntry) -> EntryOutcome {
        let path = PathBuf::from(expand_env(&entry.path));
        log::info!("Launching '{}' from {}", entry.name, path.display());

        let outcome = match self.spawner.spawn_detached(&path, &entry.args) {
            Ok(()) => LaunchOutcome::Started,
            Err(e) => {
                log::warn!("Could not launch '{}': {e}", entry.name);
                LaunchOutcome::Failed(e.to_string())
            }
        };

        EntryOutcome {
            name: entry.name.clone(),
            path,
            outcome,
        }
    }
}
