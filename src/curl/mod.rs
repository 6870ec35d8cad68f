//! cURL command generation.
//!
//! Renders a resolved request as a cURL invocation so it can be executed by
//! hand or pasted into a terminal.
//!
//! - Methods other than `GET` are passed with `-X`
//! - Headers are emitted with `-H` in name order
//! - A non-empty body is passed with `-d`
//! - Arguments containing shell metacharacters are single-quoted

pub mod generator;

pub use generator::{
    generate_curl_command, generate_curl_command_compact, generate_curl_with_options, CurlOptions,
};
