//! Client configuration.
//!
//! Every field is optional; `Client::new` fills the gaps with the documented
//! defaults. Builder methods apply left to right, so a later call overrides
//! an earlier one.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::error::ApiError;
use crate::http::HttpExecutor;

/// Service endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://itm.cloud.com/api/";

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("itm-client-rust/", env!("CARGO_PKG_VERSION"));

/// Environment variable read by `ClientConfig::from_env` for the base URL.
pub const BASE_URL_ENV: &str = "ITM_BASE_URL";

/// Environment variable read by `ClientConfig::from_env` for the user agent.
pub const USER_AGENT_ENV: &str = "ITM_USER_AGENT";

/// Construction-time settings for `Client`.
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Absolute http(s) URL every resource path is resolved against.
    pub base_url: Option<String>,

    /// Executor performing the round trips. `None` selects `UreqExecutor`.
    pub executor: Option<Arc<dyn HttpExecutor>>,

    /// Value of the `User-Agent` header. `None` or empty selects the default.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Reads `ITM_BASE_URL` and `ITM_USER_AGENT`. Unset or empty variables
    /// leave the default in place.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());
        Self {
            base_url: read(BASE_URL_ENV),
            executor: None,
            user_agent: read(USER_AGENT_ENV),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_executor(mut self, executor: impl HttpExecutor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Sets or clears the executor. Passing `None` restores the default.
    #[must_use]
    pub fn with_shared_executor(mut self, executor: Option<Arc<dyn HttpExecutor>>) -> Self {
        self.executor = executor;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub(crate) fn resolved_user_agent(&self) -> String {
        match self.user_agent.as_deref() {
            Some(agent) if !agent.is_empty() => agent.to_string(),
            _ => DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("executor", &self.executor.as_ref().map(|_| "custom"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Parses `raw` as an absolute http(s) URL and makes sure its path ends in
/// `/` so relative resource paths are appended rather than substituted.
pub fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separator_is_appended() {
        for raw in ["http://foo.com/api", "http://foo.com/api/"] {
            assert_eq!(normalize_base_url(raw).unwrap().as_str(), "http://foo.com/api/");
        }
    }

    #[test]
    fn bare_host_gets_root_path() {
        assert_eq!(normalize_base_url("http://foo.com").unwrap().as_str(), "http://foo.com/");
    }

    #[test]
    fn default_base_url_is_already_normalized() {
        assert_eq!(normalize_base_url(DEFAULT_BASE_URL).unwrap().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = normalize_base_url("api/v2").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = normalize_base_url("ftp://foo.com/api").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn later_builder_calls_override_earlier_ones() {
        let config = ClientConfig::new("http://first.test")
            .with_user_agent("one")
            .with_base_url("http://second.test")
            .with_user_agent("two");
        assert_eq!(config.base_url.as_deref(), Some("http://second.test"));
        assert_eq!(config.resolved_user_agent(), "two");
    }

    #[test]
    fn empty_user_agent_falls_back_to_default() {
        let config = ClientConfig::default().with_user_agent("");
        assert_eq!(config.resolved_user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(ClientConfig::default().resolved_user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn shared_executor_none_clears_custom_executor() {
        let executor = |_req: crate::http::HttpRequest| -> Result<crate::http::StreamedResponse, crate::http::TransportError> {
            Err("unused".into())
        };
        let config = ClientConfig::default()
            .with_executor(executor)
            .with_shared_executor(None);
        assert!(config.executor.is_none());
    }
}
