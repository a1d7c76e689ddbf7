//! Network client with bounded timeouts and cooperative cancellation

use crate::error::{Error, Result};
use crate::types::{Method, DEFAULT_TIMEOUT_MS};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Configuration for the network client
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Base URL prepended to relative paths
    pub base_url: Option<String>,
    /// Hard per-request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        // Content negotiation plus the cache directive hint the feed
        // endpoints expect.
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Cache-Control".to_string(), "no-cache".to_string());

        Self {
            base_url: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            default_headers,
            user_agent: format!("feedkit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NetworkConfig {
    /// Create a new config builder
    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::default()
    }
}

/// Builder for network client config
#[derive(Default)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> NetworkConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Cancellation token; a pre-cancelled token fails the request
    /// immediately
    pub cancel: Option<CancellationToken>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// HTTP client issuing feed requests.
///
/// Injected into the page fetcher by the owning view; never reached through
/// a process-wide global.
#[derive(Clone)]
pub struct NetworkClient {
    client: Client,
    config: NetworkConfig,
}

impl NetworkClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(NetworkConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: NetworkConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Make a GET request and parse the JSON body
    pub async fn get(&self, url: &str, config: RequestConfig) -> Result<Value> {
        self.request(Method::GET, url, config).await
    }

    /// Issue a request and parse the JSON body.
    ///
    /// Failure mapping: expired timeout → `Error::Timeout`; connection or
    /// protocol failure → `Error::Http`; non-2xx status →
    /// `Error::HttpStatus`; unparsable body → `Error::JsonParse`; cancelled
    /// token → `Error::Cancelled`. The request future is dropped as soon as
    /// the token fires, so an abandoned request never blocks the caller.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Value> {
        let full_url = self.build_url(url);
        let timeout = config.timeout.unwrap_or(self.config.timeout);
        let cancel = config.cancel.clone().unwrap_or_default();

        let mut req = self
            .client
            .request(method.into(), &full_url)
            .timeout(timeout);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        debug!(%method, url = %full_url, "issuing request");

        let response = tokio::select! {
            () = cancel.cancelled() => {
                debug!(url = %full_url, "request cancelled");
                return Err(Error::Cancelled);
            }
            result = req.send() => match result {
                Ok(response) => response,
                Err(e) if e.is_timeout() => {
                    warn!(url = %full_url, timeout_ms = timeout.as_millis() as u64, "request timed out");
                    return Err(Error::Timeout {
                        timeout_ms: timeout.as_millis() as u64,
                    });
                }
                Err(e) => {
                    warn!(url = %full_url, error = %e, "transport failure");
                    return Err(Error::Http(e));
                }
            },
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %full_url, status = status.as_u16(), "error status");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body_text = tokio::select! {
            () = cancel.cancelled() => return Err(Error::Cancelled),
            result = response.text() => result.map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout {
                        timeout_ms: timeout.as_millis() as u64,
                    }
                } else {
                    Error::Http(e)
                }
            })?,
        };

        let value: Value = serde_json::from_str(&body_text)?;
        debug!(%method, url = %full_url, "request succeeded");
        Ok(value)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

impl Default for NetworkClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NetworkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
