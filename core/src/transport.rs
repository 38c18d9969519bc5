//! The capability the filesystem consumes to perform network exchanges.
//!
//! # Design
//! `HttpFs` only ever needs "send this request, give me a response or a
//! failure", so the seam is a single-method trait. Closures implement it
//! directly, which is how tests inject deterministic fakes. A blocking
//! ureq-backed implementation ships behind the default `ureq` feature.

use std::error::Error;

use crate::http::{HttpRequest, HttpResponse};

#[cfg(feature = "ureq")]
mod agent;

#[cfg(feature = "ureq")]
pub use agent::UreqTransport;

/// Performs one HTTP exchange.
///
/// Any status code the server answers with is a successful exchange; `Err`
/// is reserved for failures to complete the exchange at all (DNS, refused
/// connection, timeout). Redirect and timeout policy belong to the
/// implementation.
pub trait Transport {
    type Error: Error + Send + Sync + 'static;

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Self::Error>;
}

impl<F, E> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, E> {
        self(request)
    }
}
