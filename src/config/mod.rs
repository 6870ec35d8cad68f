//! Configuration loading for restree.
//!
//! Configuration is read from an optional JSON file and merged with defaults.
//! There is no global instance: callers load a [`RestreeConfig`] once and pass
//! it to the pieces that need it.

pub mod schema;

pub use schema::RestreeConfig;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("unable to read config file {}: {source}", .path.display())]
    Io {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The configuration file is not valid JSON for the schema.
    #[error("unable to parse config file {}: {source}", .path.display())]
    Json {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// The configuration parsed but holds invalid values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Loads configuration from a JSON file, or returns the defaults when `path` is `None`.
///
/// Settings missing from the file keep their defaults. The result is validated
/// before it is returned.
///
/// # Example
///
/// ```no_run
/// use restree::config::load_config;
/// use std::path::Path;
///
/// let config = load_config(Some(Path::new("restree.json"))).unwrap();
/// println!("headers file: {}", config.headers_file_name);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<RestreeConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => RestreeConfig::default(),
    };

    config.validate().map_err(ConfigError::Invalid)?;
    log::debug!("loaded configuration: {:?}", config);

    Ok(config)
}

/// Parses configuration JSON. An empty document yields the defaults.
pub fn parse_config(content: &str) -> Result<RestreeConfig, serde_json::Error> {
    if content.trim().is_empty() {
        return Ok(RestreeConfig::default());
    }
    serde_json::from_str(content)
}
