//! Filesystem metadata projected from a response.
//!
//! # Design
//! `FileInfo` borrows the handle's request URL and response head and works
//! out every value on demand, so it cannot drift from the response it
//! describes and never causes network traffic. There is no directory or
//! permission model: every entry is a plain file with mode 0.

use std::any::Any;
use std::borrow::Cow;
use std::time::SystemTime;

use http::header::LAST_MODIFIED;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::date::parse_http_date;
use crate::file::ResponseHead;

/// Metadata view returned by `HttpFile::stat`.
#[derive(Debug, Clone, Copy)]
pub struct FileInfo<'a> {
    url: &'a Url,
    head: &'a ResponseHead,
}

impl<'a> FileInfo<'a> {
    pub(crate) fn new(url: &'a Url, head: &'a ResponseHead) -> Self {
        Self { url, head }
    }

    /// Last segment of the requested URL path, percent-decoded.
    /// Headers such as `Content-Disposition` are ignored.
    pub fn name(&self) -> Cow<'a, str> {
        let url: &'a Url = self.url;
        percent_decode_str(base_name(url.path())).decode_utf8_lossy()
    }

    /// Declared content length; `None` when the server did not send one.
    pub fn size(&self) -> Option<u64> {
        self.head.content_length
    }

    /// `Last-Modified`, or `None` when it is missing or unparsable.
    pub fn modified(&self) -> Option<SystemTime> {
        let value = self.head.headers.get(LAST_MODIFIED)?.to_str().ok()?;
        parse_http_date(value)
    }

    pub fn is_dir(&self) -> bool {
        false
    }

    pub fn is_file(&self) -> bool {
        true
    }

    pub fn mode(&self) -> u32 {
        0
    }

    pub fn sys(&self) -> Option<&'a (dyn Any + Send + Sync)> {
        None
    }
}

// Basename rules: trailing slashes are ignored, an empty path is ".", and a
// path made only of slashes is "/".
fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
