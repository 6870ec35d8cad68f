//! Configuration schema for restree.
//!
//! This module defines the configuration structure and validation logic for
//! the reserved per-directory file names and script execution settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for restree.
///
/// Read from a JSON file with camelCase keys. Missing settings fall back to
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestreeConfig {
    /// Name of the headers file recognized in each directory.
    ///
    /// Its headers apply to every request file in that directory and below.
    /// Defaults to "_headers.http".
    #[serde(default = "default_headers_file_name")]
    pub headers_file_name: String,

    /// Name of the initialization script recognized in each directory.
    ///
    /// Its `KEY=VALUE` output extends the variables for that directory and
    /// below. Defaults to "_before.sh".
    #[serde(default = "default_before_script_file_name")]
    pub before_script_file_name: String,

    /// Shell interpreter used to run initialization scripts.
    ///
    /// Defaults to "/bin/sh".
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Maximum run time of one initialization script, in seconds.
    ///
    /// A script still running after this long is killed and the resolution
    /// fails. `0` disables the limit. Defaults to 30.
    #[serde(default = "default_script_timeout_secs")]
    pub script_timeout_secs: u64,

    /// Whether the command line expands placeholders in request bodies by default.
    ///
    /// Defaults to false.
    #[serde(default)]
    pub expand_body_variables: bool,
}

impl Default for RestreeConfig {
    fn default() -> Self {
        Self {
            headers_file_name: default_headers_file_name(),
            before_script_file_name: default_before_script_file_name(),
            shell: default_shell(),
            script_timeout_secs: default_script_timeout_secs(),
            expand_body_variables: false,
        }
    }
}

impl RestreeConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        validate_file_name("headersFileName", &self.headers_file_name)?;
        validate_file_name("beforeScriptFileName", &self.before_script_file_name)?;

        if self.headers_file_name == self.before_script_file_name {
            return Err("headersFileName and beforeScriptFileName must differ".to_string());
        }

        if self.shell.trim().is_empty() {
            return Err("shell must not be empty".to_string());
        }

        Ok(())
    }

    /// Returns the script timeout, or `None` when it is disabled.
    pub fn script_timeout(&self) -> Option<Duration> {
        match self.script_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn validate_file_name(key: &str, name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("{} must not be empty", key));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(format!("{} must be a plain file name, got '{}'", key, name));
    }
    Ok(())
}

// Default value functions for serde

fn default_headers_file_name() -> String {
    "_headers.http".to_string()
}

fn default_before_script_file_name() -> String {
    "_before.sh".to_string()
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

fn default_script_timeout_secs() -> u64 {
    30
}
