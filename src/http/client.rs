//! HTTP client for the Helix API
//!
//! Provides the `reqwest`-backed [`Caller`] used outside of tests:
//! - Base URL joining and query serialization
//! - Client-Id / bearer headers from static credentials
//! - Scope check against the granted scope list
//! - Status and body classification into crate errors

use super::caller::Caller;
use crate::error::{Error, Result};
use crate::request::RequestDescriptor;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// Default base URL of the Helix API
pub const DEFAULT_BASE_URL: &str = "https://api.twitch.tv/helix";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Application client ID, sent as `Client-Id`
    pub client_id: Option<String>,
    /// Access token, sent as `Authorization: Bearer <token>`
    pub access_token: Option<String>,
    /// Scopes granted to the access token; `None` skips the scope check
    pub scopes: Option<Vec<String>>,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            client_id: None,
            access_token: None,
            scopes: None,
            default_headers: StringMap::new(),
            user_agent: format!("helix-kit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the client ID
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.client_id = Some(client_id.into());
        self
    }

    /// Set the access token
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = Some(token.into());
        self
    }

    /// Set the granted scopes
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.scopes = Some(scopes.into_iter().map(Into::into).collect());
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
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client executing [`RequestDescriptor`]s
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Execute a request and return the raw response
    ///
    /// Non-2xx statuses are turned into [`Error::HttpStatus`].
    pub async fn send(&self, request: &RequestDescriptor) -> Result<Response> {
        self.check_scope(request)?;

        let full_url = self.build_url(&request.endpoint);
        let mut req = self.client.get(&full_url);

        // Add default headers
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(client_id) = &self.config.client_id {
            req = req.header("Client-Id", client_id.as_str());
        }
        if let Some(token) = &self.config.access_token {
            req = req.bearer_auth(token);
        }

        let query = request.query_pairs();
        if !query.is_empty() {
            req = req.query(&query);
        }

        debug!("GET {} query={:?} scope={:?}", full_url, query, request.scope);

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GET {} failed with {}", full_url, status.as_u16());
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response)
    }

    /// Build full URL from an endpoint path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn check_scope(&self, request: &RequestDescriptor) -> Result<()> {
        let (Some(granted), Some(required)) = (&self.config.scopes, &request.scope) else {
            return Ok(());
        };

        if granted.iter().any(|s| s == required) {
            Ok(())
        } else {
            Err(Error::MissingScope {
                endpoint: request.endpoint.clone(),
                scope: required.clone(),
            })
        }
    }
}

#[async_trait]
impl Caller for HttpClient {
    async fn call(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        let response = self.send(request).await?;
        let text = response.text().await?;

        // 204 No Content and friends
        if text.trim().is_empty() {
            return Ok(JsonValue::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::decode(format!("Failed to parse response body: {e}")))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("has_client_id", &self.config.client_id.is_some())
            .field("has_access_token", &self.config.access_token.is_some())
            .finish_non_exhaustive()
    }
}
