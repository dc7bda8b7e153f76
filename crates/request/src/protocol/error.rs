use std::io;
use thiserror::Error;

use crate::protocol::ParseState;

/// Fatal outcomes of parsing a request.
///
/// "Need more bytes" is never reported through this type, see
/// [`Incomplete`](crate::protocol::Incomplete). Every variant aborts the request; the caller is
/// expected to drop the connection.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("bad start line: {line:?}")]
    BadStartLine { line: String },

    #[error("unsupported http version: {version:?}")]
    UnsupportedHttpVersion { version: String },

    #[error("malformed header {line:?}: {reason}")]
    MalformedHeader { line: String, reason: &'static str },

    #[error("invalid content-length header: {value:?}")]
    InvalidContentLength { value: String },

    #[error("body longer than declared content-length {declared}, received at least {received} bytes")]
    BodyTooLong { declared: u64, received: u64 },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("stream ended before the request was complete, parser state: {state}")]
    UnexpectedEof { state: ParseState },

    #[error("parser already failed, request must be abandoned")]
    Poisoned,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn bad_start_line<S: ToString>(line: S) -> Self {
        Self::BadStartLine { line: line.to_string() }
    }

    pub fn unsupported_http_version<S: ToString>(version: S) -> Self {
        Self::UnsupportedHttpVersion { version: version.to_string() }
    }

    pub fn malformed_header<S: ToString>(line: S, reason: &'static str) -> Self {
        Self::MalformedHeader { line: line.to_string(), reason }
    }

    pub fn invalid_content_length<S: ToString>(value: S) -> Self {
        Self::InvalidContentLength { value: value.to_string() }
    }

    pub fn body_too_long(declared: u64, received: u64) -> Self {
        Self::BodyTooLong { declared, received }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn unexpected_eof(state: ParseState) -> Self {
        Self::UnexpectedEof { state }
    }

    /// Returns true if the error comes from the byte source rather than from the bytes themselves.
    pub fn is_stream_error(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. } | Self::Io { .. })
    }
}
