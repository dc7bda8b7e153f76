//! Request line scanner.
//!
//! Splits `METHOD SP TARGET SP HTTP/1.1 CRLF` off the front of a buffer. The scanner never
//! mutates anything, so calling it again on a buffer that has grown since the last attempt is
//! always safe.

use tracing::trace;

use crate::codec::CRLF;
use crate::ensure;
use crate::protocol::{HTTP_VERSION_1_1, ParseError, RequestLine, Scan};
use crate::utils::find;

const VERSION_PREFIX: &str = "HTTP/";

/// Scans `buf` for a complete request line.
///
/// # Returns
///
/// - `Ok(Scan::Complete { .. })` with the line and the bytes up to and including its CRLF
/// - `Ok(Scan::Incomplete)` if no CRLF has arrived yet
///
/// # Errors
///
/// - [`ParseError::BadStartLine`] if the line is not valid utf-8 or not exactly three space
///   separated tokens
/// - [`ParseError::UnsupportedHttpVersion`] if the version token is not `HTTP/1.1`
pub fn parse_request_line(buf: &[u8]) -> Result<Scan<RequestLine>, ParseError> {
    let Some(line_end) = find(buf, CRLF) else {
        return Ok(Scan::Incomplete);
    };

    let raw_line = &buf[..line_end];
    let line = std::str::from_utf8(raw_line).map_err(|_utf8_error| ParseError::bad_start_line(String::from_utf8_lossy(raw_line)))?;

    let mut tokens = line.split(' ');
    let (Some(method), Some(target), Some(version), None) = (tokens.next(), tokens.next(), tokens.next(), tokens.next()) else {
        return Err(ParseError::bad_start_line(line));
    };
    ensure!(!method.is_empty() && !target.is_empty(), ParseError::bad_start_line(line));

    let http_version = version
        .strip_prefix(VERSION_PREFIX)
        .filter(|number| *number == HTTP_VERSION_1_1)
        .ok_or_else(|| ParseError::unsupported_http_version(version))?;

    let consumed = line_end + CRLF.len();
    trace!(method, request_target = target, consumed, "parsed request line");

    Ok(Scan::Complete { item: RequestLine::new(method, target, http_version), consumed })
}
