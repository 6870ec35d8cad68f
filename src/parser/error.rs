//! Error types for request and header file parsing.

use thiserror::Error;

/// Errors that can occur while parsing a request file or a headers file.
///
/// Each variant carries the offending content and its 1-based line number so
/// the cascade can point at the exact spot in the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input holds no request line at all.
    #[error("Empty request: no request line found")]
    EmptyRequest,

    /// The first non-blank line is not `METHOD URL`.
    #[error("Invalid request line '{content}' at line {line}. Expected format: 'METHOD URL'")]
    InvalidRequestLine {
        /// The offending line
        content: String,
        /// Line number in the source file (1-based)
        line: usize,
    },

    /// Invalid or unsupported HTTP method.
    #[error(
        "Invalid HTTP method '{method}' at line {line}. Expected one of: GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD"
    )]
    InvalidMethod {
        /// The invalid method string that was encountered
        method: String,
        /// Line number in the source file (1-based)
        line: usize,
    },

    /// The URL token could not be parsed.
    #[error("Invalid URL '{url}' at line {line}: {reason}")]
    InvalidUrl {
        /// The invalid URL string that was encountered
        url: String,
        /// Line number in the source file (1-based)
        line: usize,
        /// Why the URL was rejected
        reason: String,
    },

    /// The line after the request line must be blank.
    #[error("Expected a blank line after the request line, found '{content}' at line {line}")]
    MissingSeparator {
        /// The non-blank line found instead
        content: String,
        /// Line number in the source file (1-based)
        line: usize,
    },

    /// Invalid header format.
    ///
    /// Headers must be in the format "Name: Value".
    #[error("Invalid header format '{header}' at line {line}. Expected format: 'Header-Name: value'")]
    InvalidHeader {
        /// The invalid header line that was encountered
        header: String,
        /// Line number in the source file (1-based)
        line: usize,
    },
}

impl ParseError {
    /// Returns the line number associated with this error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::EmptyRequest => None,
            ParseError::InvalidRequestLine { line, .. }
            | ParseError::InvalidMethod { line, .. }
            | ParseError::InvalidUrl { line, .. }
            | ParseError::MissingSeparator { line, .. }
            | ParseError::InvalidHeader { line, .. } => Some(*line),
        }
    }
}
