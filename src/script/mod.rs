//! Initialization script execution.
//!
//! A directory may hold an initialization script whose stdout exports
//! variables as `KEY=VALUE` lines. The resolver runs it through a
//! [`ScriptRunner`], which tests can replace with a deterministic fake.

pub mod error;
pub mod shell;

pub use error::ScriptError;
pub use shell::ShellScriptRunner;

use crate::variables::Variables;
use std::path::Path;

/// Captured output of one successful script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Everything the script wrote to stdout.
    pub stdout: String,
    /// Everything the script wrote to stderr. Used for diagnostics only.
    pub stderr: String,
}

impl ScriptOutput {
    /// Creates output with the given stdout and no stderr.
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Returns the variables exported on stdout.
    pub fn variables(&self) -> Variables {
        parse_script_env(&self.stdout)
    }
}

/// Capability to execute an initialization script.
pub trait ScriptRunner {
    /// Runs the script at `script` to completion and returns its captured output.
    ///
    /// Failing to start the script or a non-zero exit is an error.
    fn run(&self, script: &Path) -> Result<ScriptOutput, ScriptError>;
}

impl<F> ScriptRunner for F
where
    F: Fn(&Path) -> Result<ScriptOutput, ScriptError>,
{
    fn run(&self, script: &Path) -> Result<ScriptOutput, ScriptError> {
        self(script)
    }
}

/// Parses script stdout into exported variables.
///
/// Each line is split on its first `=`, so values may contain `=` themselves.
/// Lines without `=` are ignored; later lines win over earlier ones.
///
/// # Examples
///
/// ```
/// use restree::script::parse_script_env;
///
/// let vars = parse_script_env("FOO=bar\nINVALID_LINE\nKEY=val=ue\n");
/// assert_eq!(vars["FOO"], "bar");
/// assert_eq!(vars["KEY"], "val=ue");
/// assert!(!vars.contains_key("INVALID_LINE"));
/// ```
pub fn parse_script_env(stdout: &str) -> Variables {
    stdout
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
