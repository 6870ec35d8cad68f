//! Initialization script error types.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running an initialization script.
///
/// Every variant raised after the script started carries its captured stderr.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The shell could not be started.
    #[error("unable to start shell '{shell}': {source}")]
    Spawn {
        /// Shell interpreter that failed to start
        shell: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The script exited unsuccessfully.
    #[error("script exited with {}\n{}", describe_status(.status), .stderr.trim_end())]
    Exit {
        /// Exit code, or `None` if the script was killed by a signal
        status: Option<i32>,
        /// Captured stderr
        stderr: String,
    },

    /// The script ran longer than the configured timeout and was killed.
    #[error("script timed out after {}s\n{}", .timeout.as_secs(), .stderr.trim_end())]
    Timeout {
        /// The limit that was exceeded
        timeout: Duration,
        /// Stderr captured before the script was killed
        stderr: String,
    },

    /// Capturing or reading the script output failed.
    #[error("unable to capture script output: {0}")]
    Io(#[from] io::Error),
}

impl ScriptError {
    /// Returns the stderr captured from the script, if it got far enough to produce any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ScriptError::Exit { stderr, .. } | ScriptError::Timeout { stderr, .. } => Some(stderr),
            ScriptError::Spawn { .. } | ScriptError::Io(_) => None,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}
