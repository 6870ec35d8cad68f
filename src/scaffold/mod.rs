//! Starter project scaffolding.
//!
//! `init` drops a minimal working tree into a directory: a `.env` file, a
//! before-script that exports it, a shared headers file and a sample request
//! that resolves against them.

use crate::config::RestreeConfig;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENV_FILE_NAME: &str = ".env";
const SAMPLE_REQUEST_FILE_NAME: &str = "hello.http";

const ENV_FILE: &str = "host=http://localhost\n";

const HEADERS_FILE: &str = "Accept: */*\nCache-Control: no-cache\nConnection: keep-alive\n";

const BEFORE_SCRIPT: &str = "#!/bin/sh\n\ncat .env\n";

const SAMPLE_REQUEST: &str = "POST {{host}}/hello\n\nContent-Type: application/json\n\n{\n\t\"message\": \"Hello world!\"\n}\n";

/// Errors raised while scaffolding.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A file the scaffold would write is already present.
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    /// Writing a file failed.
    #[error("unable to create {}: {source}", .path.display())]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

/// Writes the starter files into `dir` and returns their paths.
///
/// Nothing is written if any of the files already exists.
pub fn init(dir: &Path, config: &RestreeConfig) -> Result<Vec<PathBuf>, ScaffoldError> {
    let files = [
        (ENV_FILE_NAME, ENV_FILE, false),
        (config.headers_file_name.as_str(), HEADERS_FILE, false),
        (config.before_script_file_name.as_str(), BEFORE_SCRIPT, true),
        (SAMPLE_REQUEST_FILE_NAME, SAMPLE_REQUEST, false),
    ];

    if let Some((name, _, _)) = files.iter().find(|(name, _, _)| dir.join(name).exists()) {
        return Err(ScaffoldError::AlreadyExists(dir.join(name)));
    }

    let mut written = Vec::with_capacity(files.len());
    for (name, content, executable) in files {
        let path = dir.join(name);
        write_new(&path, content, executable).map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => ScaffoldError::AlreadyExists(path.clone()),
            _ => ScaffoldError::Io {
                path: path.clone(),
                source,
            },
        })?;
        log::debug!("created {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn write_new(path: &Path, content: &str, executable: bool) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(if executable { 0o770 } else { 0o660 });
    }
    #[cfg(not(unix))]
    let _ = executable;

    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())
}
