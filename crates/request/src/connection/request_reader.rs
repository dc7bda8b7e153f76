use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};
use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::{debug, trace};

use crate::codec::{RequestDecoder, RequestParser};
use crate::protocol::{ParseError, ParseState, Request};

/// Initial capacity of the buffer behind [`RequestReader`]
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Size of a single read in [`read_request_blocking`]
const READ_CHUNK_SIZE: usize = 1024;

/// Reads one request from an async byte source.
///
/// `RequestReader` owns the working buffer of the connection through a [`FramedRead`]: every
/// read appends behind the bytes the parser has not consumed yet, and the decoder drops the
/// consumed prefix after each parse step.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
#[derive(Debug)]
pub struct RequestReader<R> {
    framed_read: FramedRead<R, RequestDecoder>,
}

impl<R> RequestReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self::with_decoder(reader, RequestDecoder::new())
    }

    pub fn with_decoder(reader: R, decoder: RequestDecoder) -> Self {
        Self { framed_read: FramedRead::with_capacity(reader, decoder, READ_BUFFER_SIZE) }
    }

    /// Reads until one request is complete.
    ///
    /// # Errors
    ///
    /// - any parse error reported by the decoder
    /// - [`ParseError::Io`] if the source fails
    /// - [`ParseError::UnexpectedEof`] if the source ends before the request is complete,
    ///   including when it ends before sending anything
    pub async fn read(mut self) -> Result<Request, ParseError> {
        match self.framed_read.next().await {
            Some(Ok(request)) => {
                debug!(method = request.method(), request_target = request.target(), "read request");
                Ok(request)
            }
            Some(Err(e)) => Err(e),
            None => Err(ParseError::unexpected_eof(self.framed_read.decoder().state())),
        }
    }
}

/// Reads one request from `reader`, see [`RequestReader::read`].
pub async fn read_request<R>(reader: R) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    RequestReader::new(reader).read().await
}

/// Reads one request from a blocking byte source.
///
/// Reads up to 1024 bytes at a time into an owned buffer, feeds the buffer to a
/// [`RequestParser`] and discards the consumed prefix, until the request is complete.
///
/// # Errors
///
/// - any parse error reported by the parser
/// - [`ParseError::Io`] carrying the source's error unchanged; `Interrupted` reads are retried
/// - [`ParseError::UnexpectedEof`] if a read returns 0 bytes before the request is complete
pub fn read_request_blocking<R: Read>(mut reader: R) -> Result<Request, ParseError> {
    let mut parser = RequestParser::new();
    let mut buf = BytesMut::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => return Err(ParseError::unexpected_eof(parser.state())),
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        buf.extend_from_slice(&chunk[..read]);

        let advance = parser.advance(&buf)?;
        buf.advance(advance.consumed());
        trace!(read, consumed = advance.consumed(), remaining = buf.len(), "parsed chunk");

        if let Some(request) = parser.take_request() {
            debug_assert_eq!(parser.state(), ParseState::Init);
            debug!(method = request.method(), request_target = request.target(), "read request");
            return Ok(request);
        }
    }
}
