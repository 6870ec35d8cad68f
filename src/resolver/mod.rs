//! Directory cascade resolver.
//!
//! Resolving a request file walks every directory from a root boundary down
//! to the file's own directory. In each one, in root-to-leaf order:
//!
//! 1. the initialization script (if present) runs and its `KEY=VALUE` output
//!    is merged into the variable set;
//! 2. the headers file (if present) is expanded with the current variables,
//!    parsed, and merged into the accumulated headers.
//!
//! The request file itself is then parsed, its URL and header values (and
//! optionally its body) are expanded with the final variable set, and the
//! accumulated headers are laid beneath its own headers.
//!
//! Later directories may depend on what earlier ones exported, so the walk is
//! strictly sequential. Each resolution works on its own copy of the
//! variables; nothing is written back to the caller or to the process
//! environment.

pub mod error;
pub mod fs;

pub use error::ResolveError;
pub use fs::{FileSystem, OsFileSystem};

use crate::config::RestreeConfig;
use crate::models::{merge_headers, Headers, HttpRequest};
use crate::parser::{parse_headers_only, parse_request, validate_url};
use crate::script::{ScriptRunner, ShellScriptRunner};
use crate::variables::{expand, merge_variables, ExpansionError, Variables};
use std::path::{Component, Path, PathBuf};

/// Per-resolution options.
///
/// Has no `Default`: callers always say whether request bodies are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Expand `{{placeholders}}` in the request body too.
    pub expand_body: bool,
}

/// Resolves request files through the directory cascade.
///
/// The filesystem and the script runner are injected so that resolution can
/// be driven by in-memory fakes.
#[derive(Debug, Clone)]
pub struct Resolver<F = OsFileSystem, S = ShellScriptRunner> {
    config: RestreeConfig,
    fs: F,
    scripts: S,
}

impl Resolver {
    /// Creates a resolver over the real filesystem and a shell script runner.
    pub fn new(config: RestreeConfig) -> Self {
        let scripts = ShellScriptRunner::from_config(&config);
        Self {
            config,
            fs: OsFileSystem,
            scripts,
        }
    }
}

impl<F: FileSystem, S: ScriptRunner> Resolver<F, S> {
    /// Creates a resolver with explicit filesystem and script capabilities.
    pub fn with_capabilities(config: RestreeConfig, fs: F, scripts: S) -> Self {
        Self {
            config,
            fs,
            scripts,
        }
    }

    /// Returns the configuration this resolver uses.
    pub fn config(&self) -> &RestreeConfig {
        &self.config
    }

    /// Resolves `target`, a request file under `root`, into a complete request.
    ///
    /// `initial` seeds the variable set and is never modified. The target must
    /// lie strictly under `root`; this is checked before touching the
    /// filesystem.
    pub fn resolve(
        &self,
        root: &Path,
        target: &Path,
        initial: &Variables,
        options: ResolveOptions,
    ) -> Result<HttpRequest, ResolveError> {
        let dirs = cascade_dirs(root, target)?;
        log::info!(
            "resolving {} through {} director{}",
            target.display(),
            dirs.len(),
            if dirs.len() == 1 { "y" } else { "ies" }
        );

        let mut variables = initial.clone();
        let mut headers = Headers::new();
        for dir in &dirs {
            self.process_directory(dir, &mut variables, &mut headers)?;
        }

        let mut request = self.read_request(target, &variables, options)?;

        // The request file is the most specific scope
        merge_headers(&mut headers, request.headers);
        request.headers = headers;

        Ok(request)
    }

    fn process_directory(
        &self,
        dir: &Path,
        variables: &mut Variables,
        headers: &mut Headers,
    ) -> Result<(), ResolveError> {
        let files = self
            .fs
            .list_files(dir)
            .map_err(|source| ResolveError::Filesystem {
                path: dir.to_path_buf(),
                source,
            })?;
        let has_file = |name: &str| files.iter().any(|f| f == name);

        // The script runs first so the headers file can use what it exports
        if has_file(&self.config.before_script_file_name) {
            let script = dir.join(&self.config.before_script_file_name);
            let output = self
                .scripts
                .run(&script)
                .map_err(|source| ResolveError::Script {
                    dir: dir.to_path_buf(),
                    script: script.clone(),
                    source,
                })?;

            if !output.stderr.trim().is_empty() {
                log::warn!(
                    "{} wrote to stderr: {}",
                    script.display(),
                    output.stderr.trim_end()
                );
            }

            let exported = output.variables();
            log::debug!(
                "{} exported {} variable(s)",
                script.display(),
                exported.len()
            );
            merge_variables(variables, exported);
        }

        if has_file(&self.config.headers_file_name) {
            let path = dir.join(&self.config.headers_file_name);
            let raw = self.read_file(&path)?;
            let content = expand(&raw, variables).map_err(|source| ResolveError::Expansion {
                path: path.clone(),
                field: "headers".to_string(),
                source,
            })?;
            let dir_headers = parse_headers_only(&content).map_err(|source| ResolveError::Parse {
                path: path.clone(),
                source,
            })?;

            log::debug!(
                "{} contributed {} header(s)",
                path.display(),
                dir_headers.len()
            );
            merge_headers(headers, dir_headers);
        }

        Ok(())
    }

    fn read_request(
        &self,
        target: &Path,
        variables: &Variables,
        options: ResolveOptions,
    ) -> Result<HttpRequest, ResolveError> {
        let raw = self.read_file(target)?;
        let parsed = parse_request(&raw).map_err(|source| ResolveError::Parse {
            path: target.to_path_buf(),
            source,
        })?;

        let request = expand_request(parsed, variables, options.expand_body).map_err(
            |(field, source)| ResolveError::Expansion {
                path: target.to_path_buf(),
                field,
                source,
            },
        )?;

        validate_url(&request.url).map_err(|source| ResolveError::InvalidUrl {
            path: target.to_path_buf(),
            url: request.url.clone(),
            source,
        })?;

        Ok(request)
    }

    fn read_file(&self, path: &Path) -> Result<String, ResolveError> {
        self.fs
            .read_to_string(path)
            .map_err(|source| ResolveError::Filesystem {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Resolves `target` with the default configuration, the real filesystem and `/bin/sh`.
///
/// # Example
///
/// ```no_run
/// use restree::resolver::{resolve, ResolveOptions};
/// use restree::variables::process_env;
/// use std::path::Path;
///
/// let request = resolve(
///     Path::new("/srv/api"),
///     Path::new("/srv/api/users/create.http"),
///     &process_env(),
///     ResolveOptions { expand_body: false },
/// )
/// .unwrap();
/// println!("{}", request);
/// ```
pub fn resolve(
    root: &Path,
    target: &Path,
    initial: &Variables,
    options: ResolveOptions,
) -> Result<HttpRequest, ResolveError> {
    Resolver::new(RestreeConfig::default()).resolve(root, target, initial, options)
}

/// Lists the directories to visit, from `root` down to the target's parent.
///
/// Purely lexical: the filesystem is not consulted. The target must be a
/// descendant of `root` reached through plain path components only.
pub fn cascade_dirs(root: &Path, target: &Path) -> Result<Vec<PathBuf>, ResolveError> {
    let not_under_root = || ResolveError::NotUnderRoot {
        root: root.to_path_buf(),
        target: target.to_path_buf(),
    };

    let relative = target.strip_prefix(root).map_err(|_| not_under_root())?;
    let components: Vec<Component> = relative.components().collect();
    if !components.iter().all(|c| matches!(c, Component::Normal(_))) {
        return Err(not_under_root());
    }
    let Some((_file, parents)) = components.split_last() else {
        return Err(not_under_root());
    };

    let mut dirs = Vec::with_capacity(parents.len() + 1);
    let mut current = root.to_path_buf();
    dirs.push(current.clone());
    for component in parents {
        current.push(component);
        dirs.push(current.clone());
    }

    Ok(dirs)
}

/// Removes `.` components and folds `..` into the preceding component.
///
/// Lexical like [`cascade_dirs`], so symlinks are not followed. A `..` at
/// the filesystem root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Expands the URL, the header values and (optionally) the body of a request.
///
/// On failure, returns the name of the part that could not be expanded along
/// with the error. Headers are visited in name order so the reported header
/// is stable.
pub fn expand_request(
    request: HttpRequest,
    variables: &Variables,
    expand_body: bool,
) -> Result<HttpRequest, (String, ExpansionError)> {
    let url = expand(&request.url, variables).map_err(|e| ("url".to_string(), e))?;

    let mut headers = Headers::with_capacity(request.headers.len());
    for name in request.sorted_header_names() {
        let value = expand(&request.headers[name], variables)
            .map_err(|e| (format!("header '{}'", name), e))?;
        headers.insert(name.clone(), value);
    }

    let body = if expand_body {
        expand(&request.body, variables).map_err(|e| ("body".to_string(), e))?
    } else {
        request.body
    };

    Ok(HttpRequest {
        method: request.method,
        url,
        headers,
        body,
    })
}
