//! HTTP codec module for decoding requests from a byte stream
//!
//! This module contains the two layers of the parser and the glue into `tokio_util`:
//!
//! - Scanning: pure functions that split one syntactic unit off the front of a buffer
//!   - [`parse_request_line`]: the request line
//!   - [`parse_headers`]: the header block, via the [`header`] module
//! - Assembling: [`RequestParser`], a state machine that drives the scanners and collects the
//!   body across any number of reads
//! - Framing: [`RequestDecoder`], a [`Decoder`](tokio_util::codec::Decoder) around the parser
//!
//! The scanners are deterministic and side-effect free, so the parser can rescan a buffer that
//! has grown since the previous attempt without applying anything twice.
//!
//! # Example
//!
//! ```
//! use micro_request::codec::{parse_headers, parse_request_line};
//! use micro_request::protocol::Scan;
//!
//! let buf = b"GET / HTTP/1.1\r\nHost: a\r\n\r\n";
//!
//! let Scan::Complete { item: line, consumed } = parse_request_line(buf).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(line.method(), "GET");
//!
//! let headers = parse_headers(&buf[consumed..]).unwrap().into_item().unwrap();
//! assert_eq!(headers.get("Host"), Some("a"));
//! ```

mod body;
pub mod header;
mod request_decoder;
mod request_line;
mod request_parser;

/// Line terminator of every HTTP/1.1 protocol element
pub(crate) const CRLF: &[u8] = b"\r\n";

pub use header::parse_headers;
pub use request_decoder::RequestDecoder;
pub use request_line::parse_request_line;
pub use request_parser::{MAX_HEADER_BYTES, RequestParser};
