//! Transport client for the ITM configuration API.
//!
//! # Design
//! `Client` holds the normalized base URL, the user agent and a shared
//! executor; nothing changes after construction, so clones and concurrent
//! callers share it freely. The verb methods resolve a relative path, attach
//! `User-Agent`, perform exactly one round trip and read the body to the end.
//! They never look at the status code: which code counts as success depends
//! on the operation, and that is the resource service's call.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::config::{normalize_base_url, ClientConfig, DEFAULT_BASE_URL};
use crate::error::ApiError;
use crate::http::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse, UreqExecutor};
use crate::platform::PlatformService;

/// Synchronous client for the ITM configuration API.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    user_agent: String,
    executor: Arc<dyn HttpExecutor>,
}

impl Client {
    /// Builds a client from `config`, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base URL is not an absolute
    /// http(s) URL.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let user_agent = config.resolved_user_agent();
        let executor = match config.executor {
            Some(executor) => executor,
            None => Arc::new(UreqExecutor::new()),
        };
        Ok(Self {
            base_url,
            user_agent,
            executor,
        })
    }

    /// Builds a client against the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` under the same conditions as `new`.
    pub fn with_defaults() -> Result<Self, ApiError> {
        Self::new(ClientConfig::default())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Service for the Platform resource, borrowing this client.
    pub fn platforms(&self) -> PlatformService<'_> {
        PlatformService::new(self)
    }

    /// Joins `path` onto the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidPath` if `path` does not form a valid URL.
    pub fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn get(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(HttpMethod::Get, path, None)
    }

    pub fn post(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, ApiError> {
        self.send(HttpMethod::Post, path, Some(body))
    }

    pub fn put(&self, path: &str, body: Vec<u8>) -> Result<HttpResponse, ApiError> {
        self.send(HttpMethod::Put, path, Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(HttpMethod::Delete, path, None)
    }

    fn build_request(&self, method: HttpMethod, path: &str, body: Option<Vec<u8>>) -> Result<HttpRequest, ApiError> {
        let url = self.resolve(path)?;
        let mut headers = vec![("User-Agent".to_string(), self.user_agent.clone())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    fn send(&self, method: HttpMethod, path: &str, body: Option<Vec<u8>>) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(method, path, body)?;
        let url = request.url.clone();
        debug!(%method, %url, "sending request");

        let mut streamed = self.executor.execute(request).map_err(|e| {
            warn!(%method, %url, error = %e, "request failed");
            ApiError::Transport(e)
        })?;

        let mut body = Vec::new();
        if let Err(e) = streamed.body.read_to_end(&mut body) {
            warn!(%method, %url, error = %e, "failed to read response body");
            return Err(ApiError::Io(e));
        }

        debug!(%method, %url, status = streamed.status, bytes = body.len(), "received response");
        Ok(HttpResponse {
            status: streamed.status,
            body,
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
