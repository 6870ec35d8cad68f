//! cURL command generator.
//!
//! Converts resolved requests into cURL commands with shell-safe quoting.

use crate::models::{HttpMethod, HttpRequest};

/// Generates a cURL command from a resolved request.
///
/// Commands longer than 80 characters are split over several lines with
/// backslash continuations.
///
/// # Examples
///
/// ```
/// use restree::curl::generate_curl_command;
/// use restree::models::HttpRequest;
///
/// let mut request = HttpRequest::new("POST", "https://api.example.com/users");
/// request.add_header("Content-Type", "application/json");
/// request.body = r#"{"name":"John"}"#.to_string();
///
/// let curl = generate_curl_command(&request);
/// assert!(curl.starts_with("curl \\\n  -X POST"));
/// assert!(curl.ends_with("https://api.example.com/users"));
/// ```
pub fn generate_curl_command(request: &HttpRequest) -> String {
    format_multiline(&command_parts(request))
}

/// Generates a single-line cURL command.
pub fn generate_curl_command_compact(request: &HttpRequest) -> String {
    command_parts(request).join(" ")
}

/// Options for cURL command generation.
#[derive(Debug, Clone, Default)]
pub struct CurlOptions {
    /// Generate a single-line command
    pub compact: bool,
}

/// Converts a request to cURL with the given formatting options.
pub fn generate_curl_with_options(request: &HttpRequest, options: &CurlOptions) -> String {
    if options.compact {
        generate_curl_command_compact(request)
    } else {
        generate_curl_command(request)
    }
}

fn command_parts(request: &HttpRequest) -> Vec<String> {
    let mut parts = vec!["curl".to_string()];

    // GET is curl's default
    if request.http_method() != Some(HttpMethod::GET) {
        parts.push(format!("-X {}", escape_shell_arg(&request.method)));
    }

    for name in request.sorted_header_names() {
        let header = format!("{}: {}", name, request.headers[name]);
        parts.push(format!("-H {}", escape_shell_arg(&header)));
    }

    if request.has_body() {
        parts.push(format!("-d {}", escape_shell_arg(&request.body)));
    }

    // URL last
    parts.push(escape_shell_arg(&request.url));
    parts
}

/// Escapes a string for safe use in shell commands.
///
/// Uses single quotes, escaping any embedded single quotes.
fn escape_shell_arg(arg: &str) -> String {
    if !needs_quoting(arg) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', "'\\''"))
}

fn needs_quoting(s: &str) -> bool {
    const SPECIAL_CHARS: [char; 26] = [
        ' ', '\t', '\n', '\r', '|', '&', ';', '<', '>', '(', ')', '$', '`', '\\', '"', '\'', '*',
        '?', '[', ']', '#', '~', '=', '%', '{', '}',
    ];

    s.is_empty() || s.chars().any(|c| SPECIAL_CHARS.contains(&c))
}

fn format_multiline(parts: &[String]) -> String {
    let single_line = parts.join(" ");
    if single_line.len() <= 80 {
        return single_line;
    }
    parts.join(" \\\n  ")
}
