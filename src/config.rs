//! Client configuration
//!
//! A [`ClientConfig`] is read from YAML and can be overridden from the
//! environment. It converts into the transport's [`HttpClientConfig`].
//!
//! ```yaml
//! base_url: https://api.twitch.tv/helix
//! client_id: abc123
//! access_token: s3cr3t
//! timeout_seconds: 10
//! scopes: ["bits:read", "channel:read:subscriptions"]
//! headers:
//!   X-Trace: helix-kit
//! stale_total: follow_cursor
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, DEFAULT_BASE_URL};
use crate::pagination::StaleTotalPolicy;
use crate::types::{OptionStringExt, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding `client_id`
pub const ENV_CLIENT_ID: &str = "HELIX_CLIENT_ID";
/// Environment variable overriding `access_token`
pub const ENV_ACCESS_TOKEN: &str = "HELIX_ACCESS_TOKEN";
/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "HELIX_BASE_URL";

/// Client configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Application client ID
    #[serde(default)]
    pub client_id: Option<String>,

    /// Access token
    #[serde(default)]
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Scopes granted to the token, enables the scope check when set
    #[serde(default)]
    pub scopes: Option<Vec<String>>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,

    /// How total-aware listings treat a shrinking total
    #[serde(default)]
    pub stale_total: StaleTotalPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: None,
            access_token: None,
            timeout_seconds: default_timeout_seconds(),
            user_agent: None,
            scopes: None,
            headers: StringMap::new(),
            stale_total: StaleTotalPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        debug!("Loaded config from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `HELIX_*` environment variables
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override fields from any variable lookup; empty values are ignored
    #[must_use]
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(client_id) = lookup(ENV_CLIENT_ID).none_if_empty() {
            self.client_id = Some(client_id);
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).none_if_empty() {
            self.access_token = Some(token);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).none_if_empty() {
            self.base_url = base_url;
        }
        self
    }

    /// Check the values serde cannot
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    /// Convert into the transport configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_seconds));

        if let Some(client_id) = &self.client_id {
            builder = builder.client_id(client_id);
        }
        if let Some(token) = &self.access_token {
            builder = builder.access_token(token);
        }
        if let Some(scopes) = &self.scopes {
            builder = builder.scopes(scopes.iter().cloned());
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }

    /// Build an HTTP client from this config
    pub fn build_client(&self) -> Result<HttpClient> {
        self.validate()?;
        HttpClient::with_config(self.http_config())
    }
}
