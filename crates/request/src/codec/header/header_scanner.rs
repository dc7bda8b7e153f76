//! Header block scanner.
//!
//! Splits the `Name: Value CRLF` lines up to the blank line off the front of a buffer and
//! collects them into a [`HeaderMap`].
//!
//! # Rules
//!
//! - The block ends at the first `CRLF CRLF`. A buffer starting with a bare `CRLF` is a block
//!   with no headers.
//! - Each line needs a colon. The name must not contain a space.
//! - Name and value are trimmed, the trimmed name must be a non-empty token and is stored
//!   lowercase.
//! - Repeated names are joined with `", "`.

use tracing::trace;

use crate::codec::CRLF;
use crate::codec::header::is_token;
use crate::ensure;
use crate::protocol::{HeaderMap, ParseError, Scan};
use crate::utils::find;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Scans `buf` for a complete header block.
///
/// # Returns
///
/// - `Ok(Scan::Complete { .. })` with the headers and the bytes up to and including the
///   blank line
/// - `Ok(Scan::Incomplete)` if the blank line has not arrived yet
///
/// # Errors
///
/// Returns [`ParseError::MalformedHeader`] if a line has no colon, or its name is empty,
/// contains whitespace, or holds non-token characters.
pub fn parse_headers(buf: &[u8]) -> Result<Scan<HeaderMap>, ParseError> {
    // no header fields at all, the blank line follows the request line directly
    if buf.starts_with(CRLF) {
        return Ok(Scan::Complete { item: HeaderMap::new(), consumed: CRLF.len() });
    }

    let Some(block_end) = find(buf, HEADER_TERMINATOR) else {
        return Ok(Scan::Incomplete);
    };

    let mut headers = HeaderMap::new();
    for raw_line in lines(&buf[..block_end]) {
        if raw_line.is_empty() {
            continue;
        }
        parse_header_line(raw_line, &mut headers)?;
    }

    let consumed = block_end + HEADER_TERMINATOR.len();
    trace!(header_count = headers.len(), consumed, "parsed header block");

    Ok(Scan::Complete { item: headers, consumed })
}

fn parse_header_line(raw_line: &[u8], headers: &mut HeaderMap) -> Result<(), ParseError> {
    let line = std::str::from_utf8(raw_line)
        .map_err(|_utf8_error| ParseError::malformed_header(String::from_utf8_lossy(raw_line), "header is not valid utf-8"))?;

    let Some((name, value)) = line.split_once(':') else {
        return Err(ParseError::malformed_header(line, "missing colon"));
    };

    ensure!(!name.contains(' '), ParseError::malformed_header(line, "whitespace in header name"));

    let name = name.trim();
    ensure!(!name.is_empty(), ParseError::malformed_header(line, "empty header name"));
    ensure!(is_token(name.as_bytes()), ParseError::malformed_header(line, "invalid character in header name"));

    headers.append(name, value.trim());
    Ok(())
}

/// Splits a block on CRLF, the block itself carries no trailing CRLF.
fn lines(mut block: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut finished = false;
    std::iter::from_fn(move || {
        if finished {
            return None;
        }
        match find(block, CRLF) {
            Some(index) => {
                let line = &block[..index];
                block = &block[index + CRLF.len()..];
                Some(line)
            }
            None => {
                finished = true;
                Some(block)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_headers() {
        let scan = parse_headers(b"Host: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n").unwrap();

        let Scan::Complete { item: headers, consumed } = scan else {
            panic!("expected complete header block");
        };

        assert_eq!(consumed, 63);
        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("host"), Some("localhost:42069"));
        assert_eq!(headers.get("user-agent"), Some("curl/7.81.0"));
        assert_eq!(headers.get("accept"), Some("*/*"));
    }

    #[test]
    fn body_after_block_is_not_consumed() {
        let buf = b"Content-Length: 5\r\n\r\nhello";
        let scan = parse_headers(buf).unwrap();

        assert_eq!(scan.consumed(), buf.len() - 5);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let headers = parse_headers(b"Host:    localhost:42069    \r\n\r\n").unwrap().into_item().unwrap();
        assert_eq!(headers.get("host"), Some("localhost:42069"));
    }

    #[test]
    fn names_are_lowercased() {
        let headers = parse_headers(b"Content-Type: text/plain\r\n\r\n").unwrap().into_item().unwrap();

        assert_eq!(headers.iter().next(), Some(("content-type", "text/plain")));
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn duplicate_names_are_merged() {
        let headers = parse_headers(b"X-Foo: a\r\nx-foo: b\r\n\r\n").unwrap().into_item().unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-foo"), Some("a, b"));
    }

    #[test]
    fn empty_value_is_kept() {
        let headers = parse_headers(b"X-Empty:\r\n\r\n").unwrap().into_item().unwrap();
        assert_eq!(headers.get("x-empty"), Some(""));
    }

    #[test]
    fn value_may_contain_colons() {
        let headers = parse_headers(b"Host: 127.0.0.1:8080\r\n\r\n").unwrap().into_item().unwrap();
        assert_eq!(headers.get("host"), Some("127.0.0.1:8080"));
    }

    #[test]
    fn bare_crlf_is_an_empty_block() {
        assert_eq!(parse_headers(b"\r\n").unwrap(), Scan::Complete { item: HeaderMap::new(), consumed: 2 });
        assert_eq!(parse_headers(b"\r\nbody").unwrap().consumed(), 2);
    }

    #[test]
    fn missing_terminator_is_incomplete() {
        assert_eq!(parse_headers(b"Host: localhost\r\n").unwrap(), Scan::Incomplete);
        assert_eq!(parse_headers(b"Host: localhost\r\n\r").unwrap(), Scan::Incomplete);
        assert_eq!(parse_headers(b"").unwrap(), Scan::Incomplete);
    }

    #[test]
    fn space_before_colon_is_malformed() {
        let error = parse_headers(b"       Host : localhost:42069       \r\n\r\n").unwrap_err();
        assert!(matches!(error, ParseError::MalformedHeader { reason: "whitespace in header name", .. }));
    }

    #[test]
    fn tab_around_name_is_trimmed() {
        let headers = parse_headers(b"\tHost: a\r\n\r\n").unwrap().into_item().unwrap();
        assert_eq!(headers.get("host"), Some("a"));

        let error = parse_headers(b"Ho\tst: a\r\n\r\n").unwrap_err();
        assert!(matches!(error, ParseError::MalformedHeader { reason: "invalid character in header name", .. }));
    }

    #[test]
    fn missing_colon_is_malformed() {
        let error = parse_headers(b"Host localhost\r\n\r\n").unwrap_err();
        assert!(matches!(error, ParseError::MalformedHeader { ref line, reason: "missing colon" } if line == "Host localhost"));
    }

    #[test]
    fn empty_name_is_malformed() {
        let error = parse_headers(b": value\r\n\r\n").unwrap_err();
        assert!(matches!(error, ParseError::MalformedHeader { reason: "empty header name", .. }));
    }

    #[test]
    fn non_token_name_is_malformed() {
        let error = parse_headers(b"H\xc2\xa9st: localhost\r\n\r\n").unwrap_err();
        assert!(matches!(error, ParseError::MalformedHeader { reason: "invalid character in header name", .. }));

        let error = parse_headers(b"Ho(st): localhost\r\n\r\n").unwrap_err();
        assert!(matches!(error, ParseError::MalformedHeader { .. }));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let error = parse_headers(b"Host: \xff\r\n\r\n").unwrap_err();
        assert!(matches!(error, ParseError::MalformedHeader { reason: "header is not valid utf-8", .. }));
    }

    #[test]
    fn lines_split_on_crlf() {
        assert_eq!(lines(b"a\r\nb").collect::<Vec<_>>(), vec![&b"a"[..], b"b"]);
        assert_eq!(lines(b"a").collect::<Vec<_>>(), vec![&b"a"[..]]);
    }
}
