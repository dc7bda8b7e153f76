//! HTTP header block processing.
//!
//! # Components
//!
//! - [`parse_headers`]: scans a complete header block into a [`HeaderMap`](crate::protocol::HeaderMap)
//! - [`is_token`]: header name validation against the RFC 9110 token characters

mod header_scanner;

pub use header_scanner::parse_headers;

/// Returns true for the characters allowed in a header name: ASCII letters, digits and
/// ``!#$%&'*+-.^_`|~``.
#[inline]
pub fn is_tchar(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
    ) || b.is_ascii_alphanumeric()
}

/// Returns true if `bytes` is a non-empty run of token characters.
pub fn is_token(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|&b| is_tchar(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_characters() {
        assert!(is_token(b"Content-Type"));
        assert!(is_token(b"x-custom_header.v2"));
        assert!(is_token(b"!#$%&'*+-.^_`|~"));

        assert!(!is_token(b""));
        assert!(!is_token(b"Host "));
        assert!(!is_token(b"a:b"));
        assert!(!is_token(b"(comment)"));
        assert!(!is_token(b"\"quoted\""));
        assert!(!is_token("caf\u{e9}".as_bytes()));
    }
}
