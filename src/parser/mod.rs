//! Request and header file parser.
//!
//! A request file looks like this:
//!
//! ```text
//! POST https://localhost:8080/users
//!
//! Content-Type: application/json
//! Authorization: Bearer {{token}}
//!
//! {"name": "John"}
//! ```
//!
//! The request line comes first, then a blank separator line, then
//! `Name: Value` headers up to the next blank line, and everything after that
//! is the body. A headers file holds only the `Name: Value` lines.
//!
//! Both entry points share one line-driven state machine. The strict mode
//! requires the request line and the separator; the permissive mode lets the
//! request line be omitted and decides once, on the first non-blank line,
//! whether that line is a request line or the first header.

pub mod error;

use crate::models::{Headers, HttpMethod, HttpRequest, PartialRequest};
pub use error::ParseError;
use once_cell::sync::Lazy;
use url::Url;

/// Base used to check relative URLs such as `{{host}}/users` before expansion.
static RELATIVE_URL_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://placeholder.invalid/").expect("Failed to parse base URL"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Strict,
    Permissive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    HeadersStart,
    Headers,
    Body,
}

/// How the first non-blank line of a permissive parse is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FirstLine {
    RequestLine,
    Header,
}

struct LineMachine<'a> {
    mode: Mode,
    state: State,
    request: PartialRequest,
    body_lines: Vec<&'a str>,
}

impl<'a> LineMachine<'a> {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            state: State::Start,
            request: PartialRequest::default(),
            body_lines: Vec::new(),
        }
    }

    fn run(mut self, text: &'a str) -> Result<PartialRequest, ParseError> {
        for (idx, line) in text.lines().enumerate() {
            self.feed(idx + 1, line)?;
        }
        self.finish()
    }

    fn feed(&mut self, line_num: usize, line: &'a str) -> Result<(), ParseError> {
        let blank = line.trim().is_empty();

        match self.state {
            State::Start => {
                if blank {
                    return Ok(());
                }
                match self.classify(line) {
                    FirstLine::RequestLine => {
                        let (method, url) = parse_request_line(line, line_num)?;
                        self.request.method = Some(method);
                        self.request.url = Some(url);
                        self.state = State::HeadersStart;
                    }
                    FirstLine::Header => {
                        self.header(line_num, line)?;
                        self.state = State::Headers;
                    }
                }
            }
            State::HeadersStart => {
                if blank {
                    self.state = State::Headers;
                } else if self.mode == Mode::Permissive {
                    self.header(line_num, line)?;
                    self.state = State::Headers;
                } else {
                    return Err(ParseError::MissingSeparator {
                        content: line.to_string(),
                        line: line_num,
                    });
                }
            }
            State::Headers => {
                if blank {
                    self.state = State::Body;
                } else {
                    self.header(line_num, line)?;
                }
            }
            State::Body => self.body_lines.push(line),
        }

        Ok(())
    }

    /// Strict parses always expect a request line; permissive parses look ahead.
    fn classify(&self, line: &str) -> FirstLine {
        match self.mode {
            Mode::Strict => FirstLine::RequestLine,
            Mode::Permissive if looks_like_request_line(line) => FirstLine::RequestLine,
            Mode::Permissive => FirstLine::Header,
        }
    }

    fn header(&mut self, line_num: usize, line: &str) -> Result<(), ParseError> {
        let (name, value) = parse_header_line(line, line_num)?;
        self.request.headers.insert(name, value);
        Ok(())
    }

    fn finish(mut self) -> Result<PartialRequest, ParseError> {
        if self.mode == Mode::Strict && self.state == State::Start {
            return Err(ParseError::EmptyRequest);
        }
        self.request.body = self.body_lines.join("\n");
        Ok(self.request)
    }
}

/// Parses a complete request file.
///
/// The request line is mandatory and must be followed by a blank line. Empty
/// input is an error.
///
/// # Examples
///
/// ```
/// use restree::parser::parse_request;
///
/// let text = "POST https://localhost:8080\n\nContent-Type: application/json\n\n{\"a\": 1}";
/// let request = parse_request(text).unwrap();
/// assert_eq!(request.method, "POST");
/// assert_eq!(request.headers["Content-Type"], "application/json");
/// assert_eq!(request.body, "{\"a\": 1}");
/// ```
pub fn parse_request(text: &str) -> Result<HttpRequest, ParseError> {
    LineMachine::new(Mode::Strict)
        .run(text)?
        .into_request()
        .ok_or(ParseError::EmptyRequest)
}

/// Parses a request file whose request line may be omitted.
///
/// If the first non-blank line looks like `METHOD URL` it is read as the
/// request line, otherwise it is read as the first header. The blank line
/// after a request line is optional here.
pub fn parse_request_partial(text: &str) -> Result<PartialRequest, ParseError> {
    LineMachine::new(Mode::Permissive).run(text)
}

/// Parses a headers file.
///
/// Every line up to the first blank line (or the end of input) must be a
/// `Name: Value` header. Anything after the first blank line is ignored.
pub fn parse_headers_only(text: &str) -> Result<Headers, ParseError> {
    let mut headers = Headers::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            break;
        }
        let (name, value) = parse_header_line(line, idx + 1)?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Returns true if the line is exactly two tokens and the first is a known method.
pub fn looks_like_request_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    matches!(
        (tokens.next(), tokens.next(), tokens.next()),
        (Some(method), Some(_), None) if HttpMethod::from_str(method).is_some()
    )
}

/// Parses a `METHOD URL` line into its method token and URL.
///
/// The method keeps the case it was written in.
pub fn parse_request_line(line: &str, line_num: usize) -> Result<(String, String), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let [method, url] = tokens.as_slice() else {
        return Err(ParseError::InvalidRequestLine {
            content: line.trim().to_string(),
            line: line_num,
        });
    };

    if HttpMethod::from_str(method).is_none() {
        return Err(ParseError::InvalidMethod {
            method: method.to_string(),
            line: line_num,
        });
    }

    validate_url(url).map_err(|e| ParseError::InvalidUrl {
        url: url.to_string(),
        line: line_num,
        reason: e.to_string(),
    })?;

    Ok((method.to_string(), url.to_string()))
}

/// Checks that a URL is syntactically parseable.
///
/// Absolute URLs must parse on their own; relative references are accepted
/// if they resolve against a fixed base, which lets placeholder-prefixed URLs
/// through before expansion.
pub fn validate_url(url: &str) -> Result<(), url::ParseError> {
    match Url::parse(url) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => RELATIVE_URL_BASE.join(url).map(|_| ()),
        Err(e) => Err(e),
    }
}

/// Splits a header line on its first `:` into a trimmed name and value.
pub fn parse_header_line(line: &str, line_num: usize) -> Result<(String, String), ParseError> {
    let invalid = || ParseError::InvalidHeader {
        header: line.trim().to_string(),
        line: line_num,
    };

    let (name, value) = line.split_once(':').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }

    Ok((name.to_string(), value.trim().to_string()))
}
