//! Shared fixtures for integration tests.

pub mod cascade_test;
pub mod scaffold_test;
pub mod scripts_test;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A request tree rooted in a temporary directory.
pub struct Tree {
    dir: TempDir,
}

impl Tree {
    pub fn new() -> Self {
        init_test_env();
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `relative`, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}
