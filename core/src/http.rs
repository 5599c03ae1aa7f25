//! HTTP transport types and the pluggable executor seam.
//!
//! # Design
//! Requests and responses are described as plain data. `Client` resolves a
//! relative path into an `HttpRequest`, hands it to an `HttpExecutor`, and
//! drains the returned `StreamedResponse` into an `HttpResponse`. Swapping the
//! executor is how tests script server behavior without a socket.

use std::error::Error;
use std::fmt;
use std::io::Read;

/// Error produced by an executor while performing the round trip
/// (DNS, connect, TLS, timeout). Propagated to callers unchanged.
pub type TransportError = Box<dyn Error + Send + Sync>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Values of every header named `name`, compared case-insensitively.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What an executor hands back: the status line and a body that has not been
/// read yet.
pub struct StreamedResponse {
    pub status: u16,
    pub body: Box<dyn Read>,
}

impl StreamedResponse {
    pub fn new(status: u16, body: impl Read + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    /// Convenience for fixed in-memory bodies.
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, std::io::Cursor::new(body.into()))
    }
}

impl fmt::Debug for StreamedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamedResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// The normalized result of every verb call: status code plus the complete
/// body. Interpreting either is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs a single HTTP round trip.
///
/// Implementations must not retry and must return non-2xx statuses as data,
/// not as errors. Connection reuse is the implementation's concern.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<StreamedResponse, TransportError>;
}

impl<F> HttpExecutor for F
where
    F: Fn(HttpRequest) -> Result<StreamedResponse, TransportError> + Send + Sync,
{
    fn execute(&self, request: HttpRequest) -> Result<StreamedResponse, TransportError> {
        self(request)
    }
}

/// Default executor backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqExecutor {
    agent: ureq::Agent,
}

impl UreqExecutor {
    pub fn new() -> Self {
        // Status interpretation belongs to the resource services, so 4xx/5xx
        // come back as responses.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl HttpExecutor for UreqExecutor {
    fn execute(&self, request: HttpRequest) -> Result<StreamedResponse, TransportError> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();

        let response = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(url), headers).send(body),
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(url), headers).send(body),
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
        }?;

        let status = response.status().as_u16();
        Ok(StreamedResponse::new(status, response.into_body().into_reader()))
    }
}
