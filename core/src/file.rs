//! An open file: the live body of one successful response.

use std::fmt;
use std::io::{self, Read};

use http::HeaderMap;
use tracing::trace;

use crate::http::{BodyStream, HttpRequest, HttpResponse};
use crate::metadata::FileInfo;

/// Everything from the response except the body.
#[derive(Debug)]
pub(crate) struct ResponseHead {
    pub(crate) status: u16,
    pub(crate) status_text: String,
    pub(crate) headers: HeaderMap,
    pub(crate) content_length: Option<u64>,
}

/// A file opened through `HttpFs::open`.
///
/// Reads stream straight from the response body: sequential only, no
/// seeking, no buffering. `close` consumes the handle; dropping it without
/// closing releases the body as well.
pub struct HttpFile {
    request: HttpRequest,
    head: ResponseHead,
    body: Box<dyn BodyStream>,
}

impl HttpFile {
    pub(crate) fn new(request: HttpRequest, response: HttpResponse) -> Self {
        let HttpResponse {
            status,
            status_text,
            headers,
            content_length,
            body,
        } = response;
        Self {
            request,
            head: ResponseHead {
                status,
                status_text,
                headers,
                content_length,
            },
            body,
        }
    }

    /// Metadata derived from the response that opened this file. Never
    /// touches the network and may be called at any point before `close`.
    pub fn stat(&self) -> FileInfo<'_> {
        FileInfo::new(&self.request.url, &self.head)
    }

    /// Release the body, whether or not it has been read to the end.
    pub fn close(self) -> io::Result<()> {
        trace!(url = %self.request.url, "close");
        self.body.close()
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn status(&self) -> u16 {
        self.head.status
    }

    pub fn status_text(&self) -> &str {
        &self.head.status_text
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }
}

impl Read for HttpFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl fmt::Debug for HttpFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFile")
            .field("request", &self.request)
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}
