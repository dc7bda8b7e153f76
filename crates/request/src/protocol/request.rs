//! Parsed request types.
//!
//! A [`Request`] is only handed out once every section has been read, so its parts are plain
//! owned values rather than options.

use bytes::Bytes;

use crate::protocol::HeaderMap;

/// The HTTP version this crate accepts, as stored in [`RequestLine::http_version`].
pub const HTTP_VERSION_1_1: &str = "1.1";

/// The first line of a request: `METHOD SP TARGET SP HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    target: String,
    http_version: String,
}

impl RequestLine {
    pub fn new<M, T, V>(method: M, target: T, http_version: V) -> Self
    where
        M: Into<String>,
        T: Into<String>,
        V: Into<String>,
    {
        Self { method: method.into(), target: target.into(), http_version: http_version.into() }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The version number without the `HTTP/` prefix, always `"1.1"` for parsed requests.
    pub fn http_version(&self) -> &str {
        &self.http_version
    }
}

/// A complete HTTP/1.1 request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_line: RequestLine,
    headers: HeaderMap,
    body: Bytes,
}

impl Request {
    pub fn new(request_line: RequestLine, headers: HeaderMap, body: Bytes) -> Self {
        Self { request_line, headers, body }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn method(&self) -> &str {
        self.request_line.method()
    }

    pub fn target(&self) -> &str {
        self.request_line.target()
    }

    pub fn http_version(&self) -> &str {
        self.request_line.http_version()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Same as [`Request::header`].
    pub fn get(&self, name: &str) -> Option<&str> {
        self.header(name)
    }

    /// The body, empty when the request carried no `Content-Length`.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Length of the body that was read, which always equals the declared content length.
    pub fn content_length(&self) -> u64 {
        self.body.len() as u64
    }

    /// Splits the request into its owned parts.
    pub fn into_parts(self) -> (RequestLine, HeaderMap, Bytes) {
        (self.request_line, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> Request {
        let mut headers = HeaderMap::new();
        headers.append("Host", "localhost:42069");
        headers.append("Content-Length", "5");
        Request::new(RequestLine::new("POST", "/coffee", HTTP_VERSION_1_1), headers, Bytes::from_static(b"hello"))
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = request();

        assert_eq!(request.header("Host"), Some("localhost:42069"));
        assert_eq!(request.get("HOST"), Some("localhost:42069"));
        assert_eq!(request.get("content-length"), Some("5"));
        assert_eq!(request.get("accept"), None);
    }

    #[test]
    fn into_parts_keeps_every_section() {
        let (request_line, headers, body) = request().into_parts();

        assert_eq!(request_line, RequestLine::new("POST", "/coffee", "1.1"));
        assert_eq!(headers.len(), 2);
        assert_eq!(&body[..], b"hello");
    }
}
