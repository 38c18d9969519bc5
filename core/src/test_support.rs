//! Fakes shared by the unit tests.

use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use url::Url;

use crate::fs::HttpFs;
use crate::http::{BodyStream, HttpRequest, HttpResponse};

/// Observes whether a `TrackedBody` has been released.
#[derive(Debug, Clone, Default)]
pub(crate) struct Release(Arc<AtomicBool>);

impl Release {
    pub(crate) fn is_released(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// In-memory body that records when it is dropped or closed.
pub(crate) struct TrackedBody {
    inner: io::Cursor<Vec<u8>>,
    release: Release,
    fail_close: bool,
}

impl TrackedBody {
    pub(crate) fn new(content: &[u8]) -> (Self, Release) {
        let release = Release::default();
        let body = Self {
            inner: io::Cursor::new(content.to_vec()),
            release: release.clone(),
            fail_close: false,
        };
        (body, release)
    }

    /// A body whose `close` reports a broken pipe.
    pub(crate) fn failing_close(content: &[u8]) -> (Self, Release) {
        let (mut body, release) = Self::new(content);
        body.fail_close = true;
        (body, release)
    }
}

impl Read for TrackedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BodyStream for TrackedBody {
    fn close(self: Box<Self>) -> io::Result<()> {
        if self.fail_close {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "close failed"));
        }
        Ok(())
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.release.0.store(true, Ordering::SeqCst);
    }
}

pub(crate) fn fs_with<F>(base: &str, respond: F) -> HttpFs<F>
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, io::Error>,
{
    HttpFs::new(respond, Url::parse(base).unwrap())
}

pub(crate) fn ok_response(content: &str) -> HttpResponse {
    HttpResponse::new(200, io::Cursor::new(content.as_bytes().to_vec()))
}
