//! HTTP request data models.
//!
//! This module defines the resolved request produced by the cascade, the
//! partial request produced by the permissive parser, and the fixed set of
//! request methods a request file may use.

use super::headers::{merge_headers, Headers};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// HTTP request method.
///
/// Only the verbs accepted on a request line are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
}

impl HttpMethod {
    /// All methods accepted on a request line.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::OPTIONS,
        HttpMethod::HEAD,
    ];

    /// Returns the canonical (upper-case) name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }

    /// Parses a method token, ignoring case.
    ///
    /// Returns `None` for anything outside the accepted verb set.
    pub fn from_str(s: &str) -> Option<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully specified request read from a request file.
///
/// The method is kept exactly as written in the source text; use
/// [`HttpRequest::http_method`] for the normalized verb. The URL is kept as a
/// string because it may still carry `{{placeholders}}` before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Method token as written in the request line.
    pub method: String,

    /// Target URL.
    pub url: String,

    /// Request headers. Names are case-sensitive; the last write wins.
    pub headers: Headers,

    /// Raw body, empty when the file has none.
    pub body: String,
}

impl HttpRequest {
    /// Creates a request with no headers and an empty body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: String::new(),
        }
    }

    /// Returns the normalized method, or `None` if the token is not a known verb.
    pub fn http_method(&self) -> Option<HttpMethod> {
        HttpMethod::from_str(&self.method)
    }

    /// Parses the URL. Fails if placeholders are still present or the URL is relative.
    pub fn parsed_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }

    /// Adds or replaces a header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Overlays a partial request on top of this one.
    ///
    /// A method, URL or non-empty body present in `partial` replaces the
    /// current value; headers are merged with `partial` winning.
    pub fn apply(&mut self, partial: &PartialRequest) {
        if let Some(method) = &partial.method {
            self.method = method.clone();
        }
        if let Some(url) = &partial.url {
            self.url = url.clone();
        }
        if !partial.body.is_empty() {
            self.body = partial.body.clone();
        }
        merge_headers(&mut self.headers, partial.headers.clone());
    }

    /// Returns header names in sorted order, for stable rendering.
    pub fn sorted_header_names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.headers.keys().collect();
        names.sort();
        names
    }
}

/// Renders the request as normalized request-file text.
///
/// The output parses back to the same method, URL, headers and body.
impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.method, self.url)?;
        writeln!(f)?;
        for name in self.sorted_header_names() {
            writeln!(f, "{}: {}", name, self.headers[name])?;
        }
        if self.has_body() {
            writeln!(f)?;
            // The parser drops one final newline, so always write one
            writeln!(f, "{}", self.body)?;
        }
        Ok(())
    }
}

/// A request read by the permissive parser, where the request line may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRequest {
    /// Method token, if a request line was present.
    pub method: Option<String>,
    /// URL, if a request line was present.
    pub url: Option<String>,
    /// Headers found in the file.
    pub headers: Headers,
    /// Raw body, empty when absent.
    pub body: String,
}

impl PartialRequest {
    /// Converts into a full request when a request line was present.
    pub fn into_request(self) -> Option<HttpRequest> {
        match (self.method, self.url) {
            (Some(method), Some(url)) => Some(HttpRequest {
                method,
                url,
                headers: self.headers,
                body: self.body,
            }),
            _ => None,
        }
    }
}
