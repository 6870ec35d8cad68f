//! Shell-backed script runner.
//!
//! Scripts run as `<shell> <script>` from the script's own directory. Stdout
//! and stderr go to anonymous temporary files rather than pipes, so a chatty
//! script cannot block on a full pipe while we wait for it, and the files are
//! released on every exit path.
//!
//! On unix each script leads its own process group. A timeout kills the whole
//! group, including anything the script started in the background.

use super::{ScriptError, ScriptOutput, ScriptRunner};
use crate::config::RestreeConfig;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{self, Path};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Runs initialization scripts through a shell interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellScriptRunner {
    /// Shell interpreter, e.g. `/bin/sh`.
    pub shell: String,
    /// Kill the script if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl ShellScriptRunner {
    /// Creates a runner for the given shell and optional timeout.
    pub fn new(shell: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            shell: shell.into(),
            timeout,
        }
    }

    /// Creates a runner from the `shell` and `scriptTimeoutSecs` settings.
    pub fn from_config(config: &RestreeConfig) -> Self {
        Self::new(config.shell.clone(), config.script_timeout())
    }

    /// Waits for the child, killing it once the timeout elapses.
    ///
    /// Returns `None` if the child was killed.
    fn wait(&self, child: &mut Child) -> io::Result<Option<ExitStatus>> {
        let Some(timeout) = self.timeout else {
            return child.wait().map(Some);
        };

        if let Some(status) = child.wait_timeout(timeout)? {
            return Ok(Some(status));
        }

        kill_script(child)?;
        if let Err(err) = child.wait() {
            log::warn!("failed to reap timed-out script: {}", err);
        }
        Ok(None)
    }
}

impl Default for ShellScriptRunner {
    fn default() -> Self {
        Self::from_config(&RestreeConfig::default())
    }
}

impl ScriptRunner for ShellScriptRunner {
    fn run(&self, script: &Path) -> Result<ScriptOutput, ScriptError> {
        let script = path::absolute(script)?;
        let stdout_file = tempfile::tempfile()?;
        let stderr_file = tempfile::tempfile()?;

        let mut command = Command::new(&self.shell);
        command
            .arg(&script)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file.try_clone()?))
            .stderr(Stdio::from(stderr_file.try_clone()?));
        if let Some(dir) = script.parent() {
            command.current_dir(dir);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        log::debug!("running {} {}", self.shell, script.display());
        let mut child = command.spawn().map_err(|source| ScriptError::Spawn {
            shell: self.shell.clone(),
            source,
        })?;

        let status = self.wait(&mut child)?;
        let stdout = read_capture(stdout_file)?;
        let stderr = read_capture(stderr_file)?;

        match status {
            None => Err(ScriptError::Timeout {
                // `wait` only returns `None` when a timeout is set
                timeout: self.timeout.unwrap_or_default(),
                stderr,
            }),
            Some(status) if !status.success() => Err(ScriptError::Exit {
                status: status.code(),
                stderr,
            }),
            Some(_) => Ok(ScriptOutput { stdout, stderr }),
        }
    }
}

/// Kills the script's process group, falling back to the script alone.
#[cfg(unix)]
fn kill_script(child: &mut Child) -> io::Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(pgid) = i32::try_from(child.id()) else {
        return kill_child(child);
    };
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(err) => {
            log::warn!("failed to kill process group {}: {}", pgid, err);
            kill_child(child)
        }
    }
}

#[cfg(not(unix))]
fn kill_script(child: &mut Child) -> io::Result<()> {
    kill_child(child)
}

fn kill_child(child: &mut Child) -> io::Result<()> {
    match child.kill() {
        Err(err) if err.kind() != io::ErrorKind::InvalidInput => Err(err),
        _ => Ok(()),
    }
}

fn read_capture(mut file: File) -> io::Result<String> {
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
