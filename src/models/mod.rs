//! Data models for request files.
//!
//! This module contains the request and header structures that the parser
//! produces and the cascade resolver merges.

pub mod headers;
pub mod request;

pub use headers::{merge_headers, Headers};
pub use request::{HttpMethod, HttpRequest, PartialRequest};
