//! Incremental request parser.
//!
//! [`RequestParser`] owns the request being built and walks it through [`ParseState`] as bytes
//! arrive. It is fed the unconsumed part of a buffer on every call and reports how many bytes
//! of it were used, so it works regardless of how the transport splits the request.
//!
//! # State Machine
//!
//! | State               | Action                                     | Next state          |
//! |---------------------|--------------------------------------------|---------------------|
//! | `Init`              | scan the request line                      | `RequestLineParsed` |
//! | `RequestLineParsed` | scan the header block                      | `HeadersParsed`     |
//! | `HeadersParsed`     | collect `Content-Length` bytes of body     | `Done`              |
//! | `Done`              | nothing                                    | `Done`              |
//!
//! A single [`advance`](RequestParser::advance) call performs as many transitions as the
//! buffer allows.
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BytesMut};
//! use micro_request::codec::RequestParser;
//!
//! let mut parser = RequestParser::new();
//! let mut buf = BytesMut::new();
//!
//! for chunk in [&b"GET /path HTTP/1.1\r\nHo"[..], b"st: a\r\nContent-Length: 5\r\n\r\nhel", b"lo"] {
//!     buf.extend_from_slice(chunk);
//!     let advance = parser.advance(&buf).unwrap();
//!     buf.advance(advance.consumed());
//! }
//!
//! let request = parser.take_request().unwrap();
//! assert_eq!(request.target(), "/path");
//! assert_eq!(request.header("Host"), Some("a"));
//! assert_eq!(&request.body()[..], b"hello");
//! ```

use bytes::BytesMut;
use tracing::trace;

use crate::codec::body::LengthDecoder;
use crate::codec::header::parse_headers;
use crate::codec::request_line::parse_request_line;
use crate::ensure;
use crate::protocol::{Advance, HeaderMap, Incomplete, ParseError, ParseState, Request, RequestLine, Scan};

/// Maximum size in bytes allowed for the request line and header block together
pub const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Resumable parser for a single HTTP/1.1 request.
///
/// Any error is terminal: the parser is poisoned and every later
/// [`advance`](Self::advance) call fails with [`ParseError::Poisoned`].
#[derive(Debug)]
pub struct RequestParser {
    state: ParseState,
    request_line: Option<RequestLine>,
    headers: HeaderMap,
    body: BytesMut,
    payload_decoder: Option<LengthDecoder>,
    /// Bytes of request line and header block consumed so far
    head_len: usize,
    max_header_bytes: usize,
    poisoned: bool,
}

impl RequestParser {
    /// Creates a parser with the default [`MAX_HEADER_BYTES`] limit.
    pub fn new() -> Self {
        Self::with_max_header_bytes(MAX_HEADER_BYTES)
    }

    /// Creates a parser that rejects a request line plus header block larger than `max_header_bytes`.
    pub fn with_max_header_bytes(max_header_bytes: usize) -> Self {
        Self {
            state: ParseState::Init,
            request_line: None,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
            payload_decoder: None,
            head_len: 0,
            max_header_bytes,
            poisoned: false,
        }
    }

    #[inline]
    pub fn state(&self) -> ParseState {
        self.state
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    pub fn max_header_bytes(&self) -> usize {
        self.max_header_bytes
    }

    /// Feeds the unconsumed bytes of the working buffer to the parser.
    ///
    /// `buf` must start with whatever the previous call left unconsumed. After the call the
    /// caller discards [`Advance::consumed`] bytes from the front of its buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(advance)` with `advance.is_done()` once the request is complete
    /// - `Ok(advance)` with [`Progress::Partial`](crate::protocol::Progress::Partial) if more
    ///   bytes are needed; bytes may still have been consumed
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] except [`ParseError::UnexpectedEof`] and [`ParseError::Io`], which
    /// only come from the byte source.
    pub fn advance(&mut self, buf: &[u8]) -> Result<Advance, ParseError> {
        ensure!(!self.poisoned, ParseError::Poisoned);

        let result = self.drive(buf);
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    fn drive(&mut self, buf: &[u8]) -> Result<Advance, ParseError> {
        let mut read = 0;
        loop {
            let rest = &buf[read..];
            match self.state {
                ParseState::Init => match parse_request_line(rest)? {
                    Scan::Complete { item, consumed } => {
                        self.consume_head(consumed)?;
                        self.request_line = Some(item);
                        read += consumed;
                        self.transition(ParseState::RequestLineParsed);
                    }
                    Scan::Incomplete => {
                        self.check_partial_head(rest.len())?;
                        return Ok(Advance::partial(read, Incomplete::StartLine));
                    }
                },

                ParseState::RequestLineParsed => match parse_headers(rest)? {
                    Scan::Complete { item, consumed } => {
                        self.consume_head(consumed)?;
                        self.headers = item;
                        read += consumed;
                        self.transition(ParseState::HeadersParsed);
                    }
                    Scan::Incomplete => {
                        self.check_partial_head(rest.len())?;
                        return Ok(Advance::partial(read, Incomplete::Headers));
                    }
                },

                ParseState::HeadersParsed => {
                    let mut payload_decoder = match self.payload_decoder.take() {
                        Some(payload_decoder) => payload_decoder,
                        None => {
                            let payload_decoder = LengthDecoder::from_headers(&self.headers)?;
                            trace!(content_length = payload_decoder.declared(), "start reading body");
                            payload_decoder
                        }
                    };

                    if !payload_decoder.is_eof() {
                        read += payload_decoder.decode(rest, &mut self.body)?;
                    }

                    if payload_decoder.is_eof() {
                        self.transition(ParseState::Done);
                    } else {
                        self.payload_decoder = Some(payload_decoder);
                        return Ok(Advance::partial(read, Incomplete::Body));
                    }
                }

                ParseState::Done => return Ok(Advance::done(read)),
            }
        }
    }

    /// Hands out the finished request, leaving a fresh parser with the same limit in its place.
    ///
    /// Returns `None` until the parser is [`Done`](ParseState::Done).
    pub fn take_request(&mut self) -> Option<Request> {
        if !self.is_done() {
            return None;
        }

        let max_header_bytes = self.max_header_bytes;
        let finished = std::mem::replace(self, Self::with_max_header_bytes(max_header_bytes));
        finished.request_line.map(|request_line| Request::new(request_line, finished.headers, finished.body.freeze()))
    }

    fn transition(&mut self, next: ParseState) {
        debug_assert!(next > self.state, "parser state must move forward");
        trace!(from = %self.state, to = %next, "parser state transition");
        self.state = next;
    }

    fn consume_head(&mut self, consumed: usize) -> Result<(), ParseError> {
        self.head_len += consumed;
        ensure!(self.head_len <= self.max_header_bytes, ParseError::too_large_header(self.head_len, self.max_header_bytes));
        Ok(())
    }

    fn check_partial_head(&self, pending: usize) -> Result<(), ParseError> {
        let current_size = self.head_len + pending;
        ensure!(current_size <= self.max_header_bytes, ParseError::too_large_header(current_size, self.max_header_bytes));
        Ok(())
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}
