//! Data model shared by the scanner, the parser and the drivers.
//!
//! # Components
//!
//! - **Request** ([`request`]): [`Request`] and [`RequestLine`], the values a successful parse
//!   hands out
//! - **Headers** ([`header`]): [`HeaderMap`], lowercase names with `", "` merging of repeats
//! - **Progress** ([`message`]): [`Scan`] for single scanner calls, [`Advance`], [`Progress`]
//!   and [`Incomplete`] for parser calls
//! - **State** ([`state`]): [`ParseState`], the forward-only tag of the parser
//! - **Errors** ([`error`]): [`ParseError`], every fatal outcome
//!
//! Running out of bytes is modelled by [`Incomplete`], never by [`ParseError`]. Callers keep
//! reading on the former and drop the connection on the latter.

mod error;
pub use error::ParseError;

mod header;
pub use header::HeaderIter;
pub use header::HeaderMap;

mod message;
pub use message::Advance;
pub use message::Incomplete;
pub use message::Progress;
pub use message::Scan;

mod request;
pub use request::HTTP_VERSION_1_1;
pub use request::Request;
pub use request::RequestLine;

mod state;
pub use state::ParseState;
