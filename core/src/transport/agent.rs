//! Blocking transport built on `ureq`.

use http::header::CONTENT_LENGTH;
use http::HeaderMap;
use ureq::{Agent, BodyReader};

use super::Transport;
use crate::http::{status_line, BodyStream, HttpMethod, HttpRequest, HttpResponse};

impl BodyStream for BodyReader<'static> {}

/// A `Transport` backed by a shared `ureq::Agent`.
///
/// ureq's automatic status-code-as-error behavior is disabled so 4xx/5xx
/// responses come back as data and the filesystem decides what they mean.
/// Redirects, timeouts and connection pooling follow the agent's config.
///
/// ureq does not hand back the reason phrase from the status line, so
/// `status_text` is rebuilt from the code's canonical reason. A server that
/// answers `503 Back Soon` shows up as `503 Service Unavailable`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap an agent configured elsewhere. It must have
    /// `http_status_as_error` turned off, otherwise 404 surfaces as a
    /// transport failure instead of `FsError::NotExist`.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
        let response = match request.method {
            HttpMethod::Get => self.agent.get(request.url.as_str()).call()?,
        };
        let (parts, body) = response.into_parts();
        let status = parts.status.as_u16();

        Ok(HttpResponse {
            status,
            status_text: status_line(status),
            content_length: declared_length(&parts.headers),
            headers: parts.headers,
            body: Box::new(body.into_reader()),
        })
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
