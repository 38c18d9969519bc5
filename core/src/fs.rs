//! Path resolution and response-to-file translation.
//!
//! # Design
//! `HttpFs` holds only a transport and a `base_url` and carries no mutable
//! state between calls. `open` is split into `build_open`, which produces an
//! `HttpRequest`, and `parse_open`, which consumes the `HttpResponse`; the
//! transport sits between them. `parse_open` takes the response by value, so
//! on every error branch the body is dropped (and its connection released)
//! before the error reaches the caller.

use std::borrow::Cow;
use std::io::{self, Read};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::{debug, trace};
use url::Url;

use crate::config::HttpFsConfig;
use crate::error::FsError;
use crate::file::HttpFile;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

const NOT_FOUND: u16 = 404;

/// Statuses strictly above this fail an open. A bare 400 is let through.
const ERROR_THRESHOLD: u16 = 400;

/// Bytes that would change how a path is parsed as a URL reference.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Read-only filesystem rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpFs<T> {
    transport: T,
    base_url: Url,
}

impl<T> HttpFs<T> {
    pub fn new(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub fn from_config(transport: T, config: HttpFsConfig) -> Self {
        Self::new(transport, config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve `path` against the base URL.
    ///
    /// `path` is only ever a path: characters that would start a query,
    /// fragment, scheme or authority are escaped first, then the result is
    /// resolved as a relative reference (so `foo` under `/base/` is
    /// `/base/foo`, and `/foo` replaces the base path).
    pub fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(&path_reference(path))
    }

    pub fn build_open(&self, path: &str) -> Result<HttpRequest, url::ParseError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.resolve(path)?,
        })
    }
}

impl<T: Transport> HttpFs<T> {
    /// Open `path` with exactly one request through the transport.
    pub fn open(&self, path: &str) -> Result<HttpFile, FsError<T::Error>> {
        let request = self
            .build_open(path)
            .map_err(|source| FsError::InvalidPath {
                path: path.to_string(),
                source,
            })?;
        debug!(url = %request.url, "open");

        let response = self.transport.send(&request).map_err(|err| {
            debug!(url = %request.url, error = %err, "transport failed");
            FsError::Transport(err)
        })?;
        parse_open(request, response)
    }

    /// Read the whole file at `path`.
    pub fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let mut file = self.open(path)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        file.close()?;
        Ok(buf)
    }

    /// Read the whole file at `path` as UTF-8.
    pub fn read_to_string(&self, path: &str) -> io::Result<String> {
        String::from_utf8(self.read(path)?)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

/// Map the response to `request` onto a file or an error.
///
/// 404 becomes `FsError::NotExist`; any other status above 400 becomes
/// `FsError::Http`. Everything else, redirects included, is a file.
pub fn parse_open<E>(request: HttpRequest, response: HttpResponse) -> Result<HttpFile, FsError<E>> {
    if let Err(err) = check_status(&response) {
        debug!(url = %request.url, status = response.status, "open failed, releasing body");
        return Err(err);
    }
    trace!(url = %request.url, status = response.status, "opened");
    Ok(HttpFile::new(request, response))
}

fn check_status<E>(response: &HttpResponse) -> Result<(), FsError<E>> {
    if response.status == NOT_FOUND {
        return Err(FsError::NotExist);
    }
    if response.status > ERROR_THRESHOLD {
        return Err(FsError::Http {
            status: response.status,
            status_text: response.status_text.clone(),
        });
    }
    Ok(())
}

fn path_reference(path: &str) -> Cow<'_, str> {
    let escaped: Cow<'_, str> = utf8_percent_encode(path, PATH_ESCAPE).into();
    if escaped.starts_with("//") {
        // Would otherwise be read as a new authority.
        Cow::Owned(format!("/.{escaped}"))
    } else if escaped.split('/').next().is_some_and(|first| first.contains(':')) {
        // Would otherwise be read as a scheme.
        Cow::Owned(format!("./{escaped}"))
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use thiserror::Error;

    use super::*;
    use crate::test_support::{fs_with, ok_response, TrackedBody};

    #[test]
    fn open_requests_resolved_url_and_reads_body() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let fs = fs_with("http://example.com/base/", move |req| {
            log.lock().unwrap().push(req.clone());
            Ok(ok_response("Hello World"))
        });

        let mut file = fs.open("foo").unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        file.close().unwrap();

        assert_eq!(content, "Hello World");
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "exactly one exchange per open");
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(seen[0].url.as_str(), "http://example.com/base/foo");
    }

    #[test]
    fn not_found_returns_not_exist_and_releases_body() {
        let (body, release) = TrackedBody::new(b"<h1>gone</h1>");
        let body = Mutex::new(Some(body));
        let fs = fs_with("http://example.com/", move |_| {
            let body = body.lock().unwrap().take().unwrap();
            Ok(HttpResponse::new(404, body))
        });

        let err = fs.open("foo").unwrap_err();
        assert!(matches!(err, FsError::NotExist));
        assert!(err.is_not_found());
        assert!(release.is_released());
    }

    #[test]
    fn server_error_carries_status_line_and_releases_body() {
        let (body, release) = TrackedBody::new(b"stack trace");
        let body = Mutex::new(Some(body));
        let fs = fs_with("http://example.com/", move |_| {
            let body = body.lock().unwrap().take().unwrap();
            Ok(HttpResponse::new(500, body).with_status_text("500 Internal Server Error"))
        });

        let err = fs.open("foo").unwrap_err();
        assert_eq!(err.to_string(), "HTTP error: 500 Internal Server Error");
        assert_eq!(err.status(), Some(500));
        assert!(release.is_released());
    }

    #[test]
    fn other_error_statuses_use_transport_status_text() {
        for (status, text) in [(401, "401 Unauthorized"), (403, "403 Forbidden"), (503, "503 Service Unavailable")] {
            let fs = fs_with("http://example.com/", move |_| Ok(HttpResponse::new(status, io::empty())));
            let err = fs.open("foo").unwrap_err();
            assert!(matches!(err, FsError::Http { status: s, .. } if s == status));
            assert_eq!(err.to_string(), format!("HTTP error: {text}"));
        }
    }

    #[test]
    fn status_400_is_not_an_error() {
        // Only statuses strictly above 400 fail; this boundary is intentional.
        let fs = fs_with("http://example.com/", |_| {
            Ok(HttpResponse::new(400, io::Cursor::new(b"bad".to_vec())))
        });
        let mut file = fs.open("foo").unwrap();
        assert_eq!(file.status(), 400);
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "bad");
    }

    #[test]
    fn redirect_statuses_are_left_to_the_transport() {
        let fs = fs_with("http://example.com/", |_| Ok(HttpResponse::new(302, io::empty())));
        let file = fs.open("foo").unwrap();
        assert_eq!(file.status(), 302);
    }

    #[test]
    fn transport_error_is_returned_unchanged() {
        #[derive(Debug, Error, PartialEq)]
        #[error("something went wrong ({0})")]
        struct Boom(u32);

        let fs = HttpFs::new(
            |_: &HttpRequest| -> Result<HttpResponse, Boom> { Err(Boom(42)) },
            Url::parse("http://example.com/").unwrap(),
        );
        match fs.open("foo") {
            Err(FsError::Transport(err)) => assert_eq!(err, Boom(42)),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn stat_does_not_touch_the_transport() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let fs = fs_with("http://example.com/", move |_| {
            *counter.lock().unwrap() += 1;
            Ok(ok_response("x").with_content_length(1))
        });

        let file = fs.open("a/b.txt").unwrap();
        for _ in 0..3 {
            assert_eq!(file.stat().name(), "b.txt");
            assert_eq!(file.stat().size(), Some(1));
        }
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn read_helpers_return_whole_body() {
        let fs = fs_with("http://example.com/", |_| Ok(ok_response("Hello World")));
        assert_eq!(fs.read("foo").unwrap(), b"Hello World");
        assert_eq!(fs.read_to_string("foo").unwrap(), "Hello World");
    }

    #[test]
    fn read_helpers_map_not_found_to_io_kind() {
        let fs = fs_with("http://example.com/", |_| Ok(HttpResponse::new(404, io::empty())));
        let err = fs.read("missing").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn read_to_string_rejects_invalid_utf8() {
        let fs = fs_with("http://example.com/", |_| {
            Ok(HttpResponse::new(200, io::Cursor::new(vec![0xff, 0xfe])))
        });
        let err = fs.read_to_string("blob").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn resolve_appends_under_base_directory() {
        let fs = fs_with("http://example.com/base/", |_| Ok(ok_response("")));
        assert_eq!(fs.resolve("foo").unwrap().as_str(), "http://example.com/base/foo");
        assert_eq!(fs.resolve("a/b.txt").unwrap().as_str(), "http://example.com/base/a/b.txt");
    }

    #[test]
    fn resolve_without_trailing_slash_replaces_last_segment() {
        let fs = fs_with("http://example.com/base", |_| Ok(ok_response("")));
        assert_eq!(fs.resolve("foo").unwrap().as_str(), "http://example.com/foo");
    }

    #[test]
    fn resolve_treats_path_as_path_only() {
        let fs = fs_with("http://example.com/base/", |_| Ok(ok_response("")));
        assert_eq!(fs.resolve("what?.txt").unwrap().as_str(), "http://example.com/base/what%3F.txt");
        assert_eq!(fs.resolve("a#b").unwrap().as_str(), "http://example.com/base/a%23b");
        assert_eq!(fs.resolve("100%.txt").unwrap().as_str(), "http://example.com/base/100%25.txt");
        assert_eq!(fs.resolve("c:d.txt").unwrap().as_str(), "http://example.com/base/c:d.txt");
        assert_eq!(fs.resolve("//evil.com/x").unwrap().host_str(), Some("example.com"));
    }

    #[test]
    fn base_url_and_config_constructor() {
        let config = HttpFsConfig::new("https://cdn.example.com/assets/").unwrap();
        let fs = HttpFs::from_config(|_: &HttpRequest| Ok::<_, io::Error>(ok_response("")), config);
        assert_eq!(fs.base_url().as_str(), "https://cdn.example.com/assets/");
        assert_eq!(fs.build_open("app.js").unwrap().url.path(), "/assets/app.js");
    }

    #[test]
    fn read_helpers_keep_transport_io_error_kind() {
        let fs = fs_with("http://example.com/", |_| {
            Err(io::Error::new(io::ErrorKind::TimedOut, "took too long"))
        });

        match fs.open("x") {
            Err(FsError::Transport(err)) => assert_eq!(err.kind(), io::ErrorKind::TimedOut),
            other => panic!("expected transport error, got {other:?}"),
        }
        assert_eq!(fs.read("x").unwrap_err().kind(), io::ErrorKind::TimedOut);
        assert_eq!(
            fs.read_to_string("x").unwrap_err().kind(),
            io::ErrorKind::TimedOut
        );
    }

    #[test]
    fn one_root_serves_concurrent_opens() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let fs = fs_with("http://example.com/base/", move |req| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(ok_response(req.url.path()))
        });

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let fs = &fs;
                    scope.spawn(move || {
                        let name = format!("file{i}.txt");
                        let mut file = fs.open(&name).unwrap();
                        let mut content = String::new();
                        file.read_to_string(&mut content).unwrap();
                        assert_eq!(content, format!("/base/{name}"));
                        file
                    })
                })
                .collect();
            // Handles opened on one thread are closed on another.
            for handle in handles {
                handle.join().unwrap().close().unwrap();
            }
        });

        assert_eq!(count.load(Ordering::SeqCst), 8, "one request per open");
    }

    #[test]
    fn handles_and_roots_cross_threads() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<HttpFile>();
        assert_send::<HttpResponse>();
        assert_sync::<HttpFs<fn(&HttpRequest) -> Result<HttpResponse, io::Error>>>();
        #[cfg(feature = "ureq")]
        {
            assert_send::<HttpFs<crate::transport::UreqTransport>>();
            assert_sync::<HttpFs<crate::transport::UreqTransport>>();
        }
    }
}
