use std::path::Path;
use std::process::{Command, Stdio};

use autolaunch_core::{SpawnError, Spawner};

/// Windows process creation flags for launching a fully detached program.
///
/// `CREATE_NEW_PROCESS_GROUP` (0x200): the program gets its own process
/// group, so console signals sent to the launcher don't reach it.
///
/// `CREATE_NEW_CONSOLE` (0x10): console programs get their own window
/// instead of inheriting the launcher's (which may not exist at logon).
#[cfg(windows)]
const DETACH_FLAGS: u32 = 0x00000200 | 0x00000010;

/// Starts programs detached from the launcher.
///
/// Standard streams are nulled and the child handle is dropped right
/// after creation; the launcher never waits on the program.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSpawner;

impl Spawner for DetachedSpawner {
    fn spawn_detached(&self, path: &Path, args: &[String]) -> Result<(), SpawnError> {
        let mut command = Command::new(path);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Many programs expect to start from their own directory.
        if let Some(dir) = path.parent().filter(|d| path.is_absolute() && d.is_dir()) {
            command.current_dir(dir);
        }
        detach(&mut command);

        let child = command
            .spawn()
            .map_err(|e| SpawnError::from_io(path, e))?;
        log::debug!("Started {} (PID: {})", path.display(), child.id());
        Ok(())
    }
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    command.creation_flags(DETACH_FLAGS);
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    // New process group: terminal signals to the launcher don't propagate.
    command.process_group(0);
}

#[cfg(not(any(windows, unix)))]
fn detach(_command: &mut Command) {}
