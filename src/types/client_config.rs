//! API client configuration and authorization

use super::environment::EnvironmentPolicy;
use crate::{Result, TokenizationError};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use std::time::Duration;

/// How long a fetched merchant configuration stays fresh
pub const DEFAULT_CONFIGURATION_TTL: Duration = Duration::from_secs(5 * 60);

/// Credential used to talk to the client API
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Static publishable key, `<environment>_<id>_<merchant_id>`
    TokenizationKey(String),
    /// Authorization fingerprint taken from a server-generated client token
    ClientToken {
        authorization_fingerprint: String,
        config_url: Option<String>,
    },
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authorization::TokenizationKey(_) => f
                .debug_tuple("TokenizationKey")
                .field(&"<redacted>")
                .finish(),
            Authorization::ClientToken { config_url, .. } => f
                .debug_struct("ClientToken")
                .field("authorization_fingerprint", &"<redacted>")
                .field("config_url", config_url)
                .finish(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientTokenPayload {
    authorization_fingerprint: String,
    config_url: Option<String>,
}

impl Authorization {
    /// Decode a base64 client token
    pub fn from_client_token(client_token: &str) -> Result<Self> {
        let decoded = general_purpose::STANDARD
            .decode(client_token.trim())
            .map_err(|e| TokenizationError::config(format!("Invalid client token: {}", e)))?;
        let payload: ClientTokenPayload = serde_json::from_slice(&decoded)
            .map_err(|e| TokenizationError::config(format!("Invalid client token: {}", e)))?;

        if payload.authorization_fingerprint.is_empty() {
            return Err(TokenizationError::config(
                "Client token has no authorization fingerprint",
            ));
        }

        Ok(Authorization::ClientToken {
            authorization_fingerprint: payload.authorization_fingerprint,
            config_url: payload.config_url,
        })
    }

    /// Derive the client API base URL this credential points at
    pub fn base_url(&self) -> Option<String> {
        match self {
            Authorization::TokenizationKey(key) => {
                let mut parts = key.splitn(3, '_');
                let environment = parts.next()?;
                let _id = parts.next()?;
                let merchant_id = parts.next().filter(|m| !m.is_empty())?;
                let host = match environment {
                    "production" => "https://api.braintreegateway.com:443",
                    "sandbox" => "https://api.sandbox.braintreegateway.com:443",
                    "development" => "http://localhost:3000",
                    _ => return None,
                };
                Some(format!("{}/merchants/{}/client_api/", host, merchant_id))
            }
            Authorization::ClientToken { config_url, .. } => config_url
                .as_deref()
                .and_then(|url| url.strip_suffix("v1/configuration"))
                .map(str::to_string),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Authorization::TokenizationKey(key) => key.is_empty(),
            Authorization::ClientToken {
                authorization_fingerprint,
                ..
            } => authorization_fingerprint.is_empty(),
        }
    }
}

/// Configuration for [`HttpApiClient`](crate::api_client::HttpApiClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the client API, ending in `client_api/`
    pub base_url: String,
    /// Credential sent with every request
    pub authorization: Authorization,
    /// Request timeout
    pub timeout: Option<Duration>,
    /// How long a fetched configuration is reused
    pub configuration_ttl: Duration,
    /// Where analytics events are posted; events are only logged when unset
    pub analytics_url: Option<String>,
    /// Treatment of a configuration without an environment
    pub environment_policy: EnvironmentPolicy,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>, authorization: Authorization) -> Self {
        Self {
            base_url: base_url.into(),
            authorization,
            timeout: None,
            configuration_ttl: DEFAULT_CONFIGURATION_TTL,
            analytics_url: None,
            environment_policy: EnvironmentPolicy::default(),
        }
    }

    /// Create a config from a tokenization key, deriving the base URL
    pub fn from_tokenization_key(key: impl Into<String>) -> Result<Self> {
        let authorization = Authorization::TokenizationKey(key.into());
        let base_url = authorization
            .base_url()
            .ok_or_else(|| TokenizationError::config("Invalid tokenization key"))?;
        Ok(Self::new(base_url, authorization))
    }

    /// Create a config from a client token, deriving the base URL
    pub fn from_client_token(client_token: &str) -> Result<Self> {
        let authorization = Authorization::from_client_token(client_token)?;
        let base_url = authorization
            .base_url()
            .ok_or_else(|| TokenizationError::config("Client token has no config URL"))?;
        Ok(Self::new(base_url, authorization))
    }

    /// Validate the client configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(TokenizationError::config("Client API URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(TokenizationError::config(
                "Client API URL must start with http:// or https://",
            ));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| TokenizationError::config(format!("Invalid client API URL: {}", e)))?;

        if self.authorization.is_empty() {
            return Err(TokenizationError::config("Authorization cannot be empty"));
        }

        if let Some(analytics_url) = &self.analytics_url {
            url::Url::parse(analytics_url)
                .map_err(|e| TokenizationError::config(format!("Invalid analytics URL: {}", e)))?;
        }

        Ok(())
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set how long a fetched configuration is reused
    pub fn with_configuration_ttl(mut self, ttl: Duration) -> Self {
        self.configuration_ttl = ttl;
        self
    }

    /// Set the analytics endpoint
    pub fn with_analytics_url(mut self, url: impl Into<String>) -> Self {
        self.analytics_url = Some(url.into());
        self
    }

    /// Set the environment policy
    pub fn with_environment_policy(mut self, policy: EnvironmentPolicy) -> Self {
        self.environment_policy = policy;
        self
    }
}
