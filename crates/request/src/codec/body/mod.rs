//! HTTP body handling.
//!
//! Only `Content-Length` framing is supported: [`LengthDecoder`] collects exactly the declared
//! number of bytes. A request without the header has an empty body.

mod length_decoder;

pub use length_decoder::LengthDecoder;
