//! Byte source drivers.
//!
//! This module connects the parser to something that produces bytes. It is the only place that
//! reads: the parser itself never touches I/O.
//!
//! # Components
//!
//! - [`RequestReader`] / [`read_request`]: async, over any `tokio::io::AsyncRead`
//! - [`read_request_blocking`]: blocking, over any `std::io::Read`
//!
//! Both keep one working buffer per connection holding exactly the unconsumed remainder
//! followed by freshly read bytes, and both treat the end of the stream before the request is
//! complete as [`ParseError::UnexpectedEof`](crate::protocol::ParseError::UnexpectedEof).

mod request_reader;

pub use request_reader::{RequestReader, read_request, read_request_blocking};
