//! Directory-cascade resolver for plain-text HTTP request files.
//!
//! A request lives in a `.http` file somewhere inside a directory tree. Every
//! directory on the way from a chosen root down to that file may contribute:
//!
//! - an initialization script (`_before.sh`) whose `KEY=VALUE` output becomes
//!   variables for everything below it;
//! - a headers file (`_headers.http`) whose headers apply to every request
//!   below it.
//!
//! Resolution combines those contributions root to leaf, expands `{{name}}`
//! placeholders, and produces one complete [`HttpRequest`].
//!
//! # Architecture
//!
//! - **models**: request and header types
//! - **parser**: strict, permissive and headers-only text parsers
//! - **variables**: `{{name}}` expansion and variable sources
//! - **script**: initialization script execution
//! - **resolver**: the directory cascade
//! - **config**: file names, shell and timeouts
//! - **curl**: cURL rendering of resolved requests
//! - **scaffold**: starter tree generation
//!
//! # Example
//!
//! ```no_run
//! use restree::{resolve, variables::process_env, ResolveOptions};
//! use std::path::Path;
//!
//! let request = resolve(
//!     Path::new("/srv/api"),
//!     Path::new("/srv/api/users/list.http"),
//!     &process_env(),
//!     ResolveOptions { expand_body: false },
//! )?;
//! print!("{}", request);
//! # Ok::<(), restree::ResolveError>(())
//! ```

pub mod config;
pub mod curl;
pub mod models;
pub mod parser;
pub mod resolver;
pub mod scaffold;
pub mod script;
pub mod variables;

pub use config::{load_config, RestreeConfig};
pub use models::{Headers, HttpMethod, HttpRequest, PartialRequest};
pub use parser::{parse_headers_only, parse_request, parse_request_partial, ParseError};
pub use resolver::{normalize_path, resolve, ResolveError, ResolveOptions, Resolver};
pub use variables::{expand, ExpansionError, Variables};
