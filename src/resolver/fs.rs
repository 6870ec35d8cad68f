//! Filesystem access used by the resolver.

use std::fs;
use std::io;
use std::path::Path;

/// Read-only filesystem capability.
pub trait FileSystem {
    /// Lists the names of the regular files directly inside `dir`.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Reads a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        (**self).list_files(dir)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // Follows symlinks; names that are not UTF-8 can never match a reserved name
            if entry.path().is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}
