//! HTTP request decoder module
//!
//! This module plugs [`RequestParser`] into `tokio_util`'s codec machinery so a
//! [`FramedRead`](tokio_util::codec::FramedRead) can drive it over any `AsyncRead`. The
//! `BytesMut` owned by the framed reader is the working buffer: new bytes are appended to it by
//! the framed reader, and the decoder discards the prefix the parser consumed.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_request::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: a\r\n"[..]);
//! assert!(decoder.decode(&mut buffer).unwrap().is_none());
//!
//! buffer.extend_from_slice(b"\r\n");
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.header("host"), Some("a"));
//! ```

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::RequestParser;
use crate::protocol::{ParseError, ParseState, Request};

/// A decoder yielding one [`Request`] once all of its bytes have arrived.
#[derive(Debug, Default)]
pub struct RequestDecoder {
    parser: RequestParser,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a decoder around a parser with a custom header size limit
    pub fn with_max_header_bytes(max_header_bytes: usize) -> Self {
        Self { parser: RequestParser::with_max_header_bytes(max_header_bytes) }
    }

    /// The state of the request currently being decoded
    pub fn state(&self) -> ParseState {
        self.parser.state()
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode an HTTP request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: the request is complete
    /// - `Ok(None)`: need more data to proceed, consumed bytes have been removed from `src`
    /// - `Err(_)`: the request is malformed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let advance = self.parser.advance(src)?;
        src.advance(advance.consumed());

        trace!(consumed = advance.consumed(), remaining = src.len(), progress = ?advance.progress(), "decoded request bytes");

        Ok(self.parser.take_request())
    }

    /// Called once the underlying stream has ended.
    ///
    /// A stream that closes before sending a single byte is a clean shutdown. A stream that
    /// closes in the middle of a request is a [`ParseError::UnexpectedEof`].
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(request) => Ok(Some(request)),
            None if buf.is_empty() && self.parser.state() == ParseState::Init => Ok(None),
            None => Err(ParseError::unexpected_eof(self.parser.state())),
        }
    }
}
