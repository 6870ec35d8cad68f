//! Resolution error types.

use crate::parser::ParseError;
use crate::script::ScriptError;
use crate::variables::ExpansionError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a resolution.
///
/// Every variant names the file or directory being processed when the
/// failure happened. No partial request is ever returned alongside one.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The target is not a file strictly under the root.
    #[error("{} must be under {}", .target.display(), .root.display())]
    NotUnderRoot {
        /// The root boundary directory
        root: PathBuf,
        /// The requested target file
        target: PathBuf,
    },

    /// A directory could not be listed or a file could not be read.
    #[error("unable to read {}: {source}", .path.display())]
    Filesystem {
        /// Directory or file being accessed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// An initialization script failed.
    #[error("failed to execute before script {}: {source}", .script.display())]
    Script {
        /// Directory whose script failed
        dir: PathBuf,
        /// The script path
        script: PathBuf,
        /// What went wrong
        source: ScriptError,
    },

    /// A placeholder in a headers or request file had no value.
    #[error("unable to expand {field} in {}: {source}", .path.display())]
    Expansion {
        /// File being expanded
        path: PathBuf,
        /// Which part of the file, e.g. "headers" or "url"
        field: String,
        /// The missing names
        source: ExpansionError,
    },

    /// A headers or request file is malformed.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// The parse failure
        source: ParseError,
    },

    /// The request URL is not parseable after placeholder expansion.
    #[error("invalid URL '{url}' in {}: {source}", .path.display())]
    InvalidUrl {
        /// Request file
        path: PathBuf,
        /// The expanded URL
        url: String,
        /// Why the URL was rejected
        source: url::ParseError,
    },
}

impl ResolveError {
    /// Returns the file or directory this error is about.
    pub fn path(&self) -> &Path {
        match self {
            ResolveError::NotUnderRoot { target, .. } => target,
            ResolveError::Filesystem { path, .. }
            | ResolveError::Expansion { path, .. }
            | ResolveError::Parse { path, .. }
            | ResolveError::InvalidUrl { path, .. } => path,
            ResolveError::Script { script, .. } => script,
        }
    }
}
