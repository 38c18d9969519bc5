//! HTTP transport types exchanged with the injected transport.
//!
//! # Design
//! `HttpRequest` is plain data: the filesystem builds it and hands it to the
//! transport by reference, then keeps it for the lifetime of the file so
//! metadata can recover the requested path. `HttpResponse` carries a live
//! body stream instead of a buffered string, because the file handle reads
//! it incrementally and must be able to release the connection early.
//!
//! Header lookup goes through `http::HeaderMap`, which is case-insensitive.

use std::fmt;
use std::io::{self, Read};

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use url::Url;

/// HTTP method for a request. The filesystem is read-only, so only `Get`
/// is ever issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// A resolved, ready-to-send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
}

/// A response body that can be read sequentially and released.
///
/// Dropping a body must release whatever it holds (usually a pooled
/// connection). `close` releases it early and reports failures.
pub trait BodyStream: Read + Send {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

impl<T> BodyStream for io::Cursor<T> where T: AsRef<[u8]> + Send {}

impl BodyStream for io::Empty {}

/// The transport's reply to an `HttpRequest`.
///
/// `status_text` holds the full status line (`"404 Not Found"`), which is
/// what error messages quote. `content_length` is `None` when the transport
/// could not tell the length up front.
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: HeaderMap,
    pub content_length: Option<u64>,
    pub body: Box<dyn BodyStream>,
}

impl HttpResponse {
    /// A response with the canonical status line for `status`, no headers
    /// and an unknown length.
    pub fn new(status: u16, body: impl BodyStream + 'static) -> Self {
        Self {
            status,
            status_text: status_line(status),
            headers: HeaderMap::new(),
            content_length: None,
            body: Box::new(body),
        }
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = Some(content_length);
        self
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Status line for `status`: the code followed by its canonical reason
/// phrase, or the bare code when there is none.
pub fn status_line(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}
