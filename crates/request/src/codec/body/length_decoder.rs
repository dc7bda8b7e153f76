//! Decoder for bodies framed by the `Content-Length` header, as defined in
//! [RFC 9112 Section 6.2](https://www.rfc-editor.org/rfc/rfc9112#section-6.2).

use bytes::BytesMut;
use tracing::trace;

use crate::ensure;
use crate::protocol::{HeaderMap, ParseError};

const CONTENT_LENGTH: &str = "content-length";

/// Collects a body of known length.
///
/// The decoder tracks the remaining bytes to be read. Bytes past the declared length are a
/// framing error, never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The length declared by the `Content-Length` header
    declared: u64,
    /// The number of bytes remaining to be read from the payload
    remaining: u64,
}

impl LengthDecoder {
    /// Creates a new LengthDecoder instance.
    ///
    /// # Arguments
    /// * `length` - The total content length to decode, specified by Content-Length header
    pub fn new(length: u64) -> Self {
        Self { declared: length, remaining: length }
    }

    /// Creates a decoder from the `content-length` header, a missing header means no body.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidContentLength`] if the value is not a plain decimal number
    /// that fits in a `u64`.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ParseError> {
        match headers.get(CONTENT_LENGTH) {
            Some(value) => parse_content_length(value).map(Self::new),
            None => Ok(Self::new(0)),
        }
    }

    /// Returns true once the whole body has been read.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining == 0
    }

    pub fn declared(&self) -> u64 {
        self.declared
    }

    /// Appends all of `src` to `body` and returns how many bytes were taken.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::BodyTooLong`] if `src` holds more bytes than are still expected,
    /// in which case nothing is appended.
    pub fn decode(&mut self, src: &[u8], body: &mut BytesMut) -> Result<usize, ParseError> {
        let available = src.len() as u64;
        ensure!(available <= self.remaining, ParseError::body_too_long(self.declared, self.declared - self.remaining + available));

        body.extend_from_slice(src);
        self.remaining -= available;

        trace!(read = src.len(), remaining = self.remaining, "read body bytes");
        Ok(src.len())
    }
}

fn parse_content_length(value: &str) -> Result<u64, ParseError> {
    let digits = value.trim();
    // u64::from_str would accept a leading '+'
    ensure!(!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()), ParseError::invalid_content_length(value));

    digits.parse::<u64>().map_err(|_overflow| ParseError::invalid_content_length(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_length(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.append("Content-Length", value);
        headers
    }

    #[test]
    fn test_basic() {
        let mut body = BytesMut::new();
        let mut length_decoder = LengthDecoder::new(10);

        assert_eq!(length_decoder.decode(b"10123", &mut body).unwrap(), 5);
        assert!(!length_decoder.is_eof());

        assert_eq!(length_decoder.decode(b"45678", &mut body).unwrap(), 5);
        assert!(length_decoder.is_eof());

        assert_eq!(&body[..], b"1012345678");
    }

    #[test]
    fn empty_read_keeps_waiting() {
        let mut body = BytesMut::new();
        let mut length_decoder = LengthDecoder::new(3);

        assert_eq!(length_decoder.decode(b"", &mut body).unwrap(), 0);
        assert!(!length_decoder.is_eof());
    }

    #[test]
    fn excess_bytes_are_rejected() {
        let mut body = BytesMut::new();
        let mut length_decoder = LengthDecoder::new(5);

        length_decoder.decode(b"hel", &mut body).unwrap();
        let error = length_decoder.decode(b"lo world", &mut body).unwrap_err();

        assert!(matches!(error, ParseError::BodyTooLong { declared: 5, received: 11 }));
        assert_eq!(&body[..], b"hel");
    }

    #[test]
    fn missing_header_means_empty_body() {
        let length_decoder = LengthDecoder::from_headers(&HeaderMap::new()).unwrap();
        assert!(length_decoder.is_eof());
    }

    #[test]
    fn header_value_is_parsed() {
        let length_decoder = LengthDecoder::from_headers(&headers_with_length("13")).unwrap();
        assert_eq!(length_decoder.declared(), 13);

        let length_decoder = LengthDecoder::from_headers(&headers_with_length("0")).unwrap();
        assert!(length_decoder.is_eof());
    }

    #[test]
    fn invalid_values_are_rejected() {
        for value in ["abc", "", "+5", "-1", "5 5", "1.5", "99999999999999999999999"] {
            let error = LengthDecoder::from_headers(&headers_with_length(value)).unwrap_err();
            assert!(matches!(error, ParseError::InvalidContentLength { .. }), "{value:?} gave {error}");
        }
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let mut headers = headers_with_length("5");
        headers.append("content-length", "5");

        let error = LengthDecoder::from_headers(&headers).unwrap_err();
        assert!(matches!(error, ParseError::InvalidContentLength { ref value } if value == "5, 5"));
    }
}
