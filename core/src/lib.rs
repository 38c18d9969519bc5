//! Read-only virtual filesystem over an HTTP transport.
//!
//! # Overview
//! `HttpFs::open` resolves a path against a base URL, sends one GET through
//! an injected `Transport`, and turns the response into either an
//! `HttpFile` (a `Read` over the live body) or an `FsError`. `HttpFile::stat`
//! projects the response headers into filesystem metadata without further
//! network traffic.
//!
//! # Design
//! - `HttpFs` holds only the transport and the base URL, so one root serves
//!   concurrent opens.
//! - Opening is split into `build_open` (produces the request) and
//!   `parse_open` (consumes the response), so the I/O boundary is explicit
//!   and hosts that do their own I/O can skip the `Transport` trait.
//! - Response bodies are owned values: every path that does not hand the
//!   body to an `HttpFile` drops it, which releases the connection.
//! - Metadata is a borrowed view computed on each call, never a snapshot.

pub mod config;
pub mod date;
pub mod error;
pub mod file;
pub mod fs;
pub mod http;
pub mod metadata;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use crate::config::HttpFsConfig;
pub use crate::error::{ConfigError, FsError};
pub use crate::file::HttpFile;
pub use crate::fs::{parse_open, HttpFs};
pub use crate::http::{BodyStream, HttpMethod, HttpRequest, HttpResponse};
pub use crate::metadata::FileInfo;
pub use crate::transport::Transport;
#[cfg(feature = "ureq")]
pub use crate::transport::UreqTransport;
