//! An incremental HTTP/1.1 request parser
//!
//! This crate reconstructs a single HTTP/1.1 request from bytes that arrive in arbitrary
//! fragments, as they do from a TCP connection. Parsing state survives between reads and every
//! parse step reports how many bytes it used, so the caller only ever keeps the unconsumed
//! remainder around.
//!
//! # Features
//!
//! - Request line, header block and `Content-Length` body
//! - Any fragmentation of the input, down to one byte per read
//! - Lowercase header names with `", "` merging of repeated headers
//! - Distinct "need more bytes" and "malformed" outcomes
//! - Async reading through `tokio_util` codecs, or blocking reading through `std::io::Read`
//!
//! # Example
//!
//! ```no_run
//! use micro_request::connection::read_request;
//! use tokio::net::TcpListener;
//! use tracing::{error, info};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:42069").await?;
//!     loop {
//!         let (tcp_stream, _remote_addr) = listener.accept().await?;
//!         tokio::spawn(async move {
//!             match read_request(tcp_stream).await {
//!                 Ok(request) => info!(method = request.method(), request_target = request.target(), "parsed request"),
//!                 Err(e) => error!(cause = %e, "failed to parse request"),
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - [`protocol`]: the data model ([`protocol::Request`], [`protocol::HeaderMap`],
//!   [`protocol::ParseState`]) and the error taxonomy ([`protocol::ParseError`])
//! - [`codec`]: the scanners ([`codec::parse_request_line`], [`codec::parse_headers`]), the
//!   state machine ([`codec::RequestParser`]) and its `Decoder` adapter
//!   ([`codec::RequestDecoder`])
//! - [`connection`]: drivers that read from a byte source until one request is complete
//!
//! # Limitations
//!
//! - HTTP/1.1 only, any other version is rejected
//! - No chunked transfer encoding, no header continuation lines, no trailers
//! - One request per connection
//! - Maximum size of request line plus headers: 8KB by default

pub mod codec;
pub mod connection;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
