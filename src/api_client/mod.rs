//! Client API collaborator
//!
//! The tokenization pipeline talks to the gateway through the [`ApiClient`]
//! trait: one call to fetch the merchant configuration and one JSON `POST` per
//! tokenization step. [`HttpApiClient`] is the reqwest-backed implementation.
//!
//! # Examples
//!
//! ```no_run
//! use paypal_native::api_client::{ApiClient, HttpApiClient};
//! use paypal_native::types::ClientConfig;
//! use std::time::Duration;
//!
//! # async fn example() -> paypal_native::Result<()> {
//! let config = ClientConfig::from_tokenization_key("sandbox_tmxhyf7d_dcpspy2brwdjr3qn")?
//!     .with_timeout(Duration::from_secs(30));
//! let client = HttpApiClient::new(config)?;
//!
//! let configuration = client
//!     .fetch_configuration()
//!     .await
//!     .map_err(|e| paypal_native::TokenizationError::configuration_fetch_failed(e.to_string()))?;
//! println!("PayPal enabled: {}", configuration.is_paypal_enabled());
//! # Ok(())
//! # }
//! ```

use crate::analytics::AnalyticsSink;
use crate::types::{paths, Authorization, ClientConfig, MerchantConfiguration};
use crate::{Result, TokenizationError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use thiserror::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

#[cfg(test)]
mod tests;

/// API version header value sent with every request
pub const BRAINTREE_VERSION: &str = "2018-05-10";

/// Failure reported by the API client
#[derive(Debug, Clone, Error)]
#[error("{}", describe(.status, .message))]
pub struct TransportError {
    /// HTTP status, `None` when no response arrived
    pub status: Option<u16>,
    /// Human-readable message, if the transport produced one
    pub message: Option<String>,
    /// JSON error body returned by the server
    pub body: Option<Value>,
}

impl TransportError {
    /// The request never produced a response
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
            body: None,
        }
    }

    /// The server answered with a non-success status
    pub fn status(status: u16, body: Option<Value>) -> Self {
        Self {
            status: Some(status),
            message: None,
            body,
        }
    }

    /// The server answered but the body was not JSON
    pub fn decode(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: Some(message.into()),
            body: None,
        }
    }

    /// Whether the failure happened before any response arrived
    pub fn is_connection_failure(&self) -> bool {
        self.status.is_none()
    }
}

fn describe(status: &Option<u16>, message: &Option<String>) -> String {
    match (status, message.as_deref()) {
        (Some(status), Some(message)) => format!("HTTP {}: {}", status, message),
        (Some(status), None) => format!("request failed with status: {}", status),
        (None, Some(message)) => format!("network connection failed: {}", message),
        (None, None) => "network connection failed".to_string(),
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::decode(status.as_u16(), error.to_string()),
            None => Self::connection(error.to_string()),
        }
    }
}

/// Gateway operations the tokenization pipeline depends on
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetch the merchant configuration, possibly from a short-lived cache
    async fn fetch_configuration(&self) -> std::result::Result<MerchantConfiguration, TransportError>;

    /// `POST` a JSON body to a path relative to the client API base URL
    async fn post(&self, path: &str, body: &Value) -> std::result::Result<Value, TransportError>;
}

#[async_trait]
impl<T: ApiClient + ?Sized> ApiClient for Arc<T> {
    async fn fetch_configuration(&self) -> std::result::Result<MerchantConfiguration, TransportError> {
        (**self).fetch_configuration().await
    }

    async fn post(&self, path: &str, body: &Value) -> std::result::Result<Value, TransportError> {
        (**self).post(path, body).await
    }
}

#[derive(Debug, Clone)]
struct CachedConfiguration {
    configuration: MerchantConfiguration,
    fetched_at: Instant,
}

/// reqwest-backed client API implementation
#[derive(Clone)]
pub struct HttpApiClient {
    /// Base URL of the client API, always ending in `/`
    base_url: Url,
    /// HTTP client
    client: Client,
    authorization: Authorization,
    configuration_ttl: Duration,
    cached_configuration: Arc<RwLock<Option<CachedConfiguration>>>,
    analytics_url: Option<Url>,
    /// Identifies this client instance in analytics
    session_id: String,
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authorization", &self.authorization)
            .field("configuration_ttl", &self.configuration_ttl)
            .field("session_id", &self.session_id)
            .finish()
    }
}

impl HttpApiClient {
    /// Create a new API client
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate configuration first
        config.validate()?;

        let mut base_url = config.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .map_err(|e| TokenizationError::config(format!("Invalid client API URL: {}", e)))?;

        let analytics_url = config
            .analytics_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| TokenizationError::config(format!("Invalid analytics URL: {}", e)))?;

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| TokenizationError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            client,
            authorization: config.authorization,
            configuration_ttl: config.configuration_ttl,
            cached_configuration: Arc::new(RwLock::new(None)),
            analytics_url,
            session_id: uuid::Uuid::new_v4().simple().to_string(),
        })
    }

    /// Base URL of the client API
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Analytics session id
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Drop any cached configuration so the next fetch hits the network
    pub async fn invalidate_configuration(&self) {
        *self.cached_configuration.write().await = None;
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::connection(format!("Invalid endpoint path {}: {}", path, e)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Braintree-Version", BRAINTREE_VERSION);
        match &self.authorization {
            Authorization::TokenizationKey(key) => request.header("Client-Key", key),
            Authorization::ClientToken {
                authorization_fingerprint,
                ..
            } => request.bearer_auth(authorization_fingerprint),
        }
    }

    async fn read_json(response: reqwest::Response) -> std::result::Result<Value, TransportError> {
        let status = response.status();

        if !status.is_success() {
            let response_body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Client API request failed with status: {}. Response body: {}",
                status,
                response_body
            );
            let body = serde_json::from_str::<Value>(&response_body).ok();
            return Err(TransportError::status(status.as_u16(), body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::decode(status.as_u16(), e.to_string()))
    }

    async fn cached(&self) -> Option<MerchantConfiguration> {
        let cached = self.cached_configuration.read().await;
        cached
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.configuration_ttl)
            .map(|entry| entry.configuration.clone())
    }

    fn post_analytics(&self, url: Url, name: &str) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::debug!(event = name, "no async runtime, analytics event dropped");
                return;
            }
        };

        let body = json!({
            "analytics": [{
                "kind": name,
                "timestamp": chrono::Utc::now().timestamp_millis(),
            }],
            "_meta": {
                "sessionId": self.session_id,
                "platform": "rust",
                "sdkVersion": crate::VERSION,
            },
        });
        let request = self.authorize(self.client.post(url)).json(&body);
        let name = name.to_string();

        handle.spawn(async move {
            if let Err(e) = request.send().await {
                tracing::debug!(event = %name, "analytics upload failed: {}", e);
            }
        });
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn fetch_configuration(&self) -> std::result::Result<MerchantConfiguration, TransportError> {
        if let Some(configuration) = self.cached().await {
            tracing::debug!("Using cached merchant configuration");
            return Ok(configuration);
        }

        let url = self.endpoint(paths::CONFIGURATION)?;
        tracing::debug!("Fetching merchant configuration from: {}", url);

        let response = self
            .authorize(self.client.get(url))
            .query(&[("configVersion", "3")])
            .send()
            .await?;
        let configuration = MerchantConfiguration::new(Self::read_json(response).await?);

        *self.cached_configuration.write().await = Some(CachedConfiguration {
            configuration: configuration.clone(),
            fetched_at: Instant::now(),
        });

        Ok(configuration)
    }

    async fn post(&self, path: &str, body: &Value) -> std::result::Result<Value, TransportError> {
        let url = self.endpoint(path)?;
        tracing::debug!(
            "Client API request body: {}",
            serde_json::to_string_pretty(body).unwrap_or_default()
        );
        tracing::debug!("Sending request to: {}", url);

        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await?;

        Self::read_json(response).await
    }
}

impl AnalyticsSink for HttpApiClient {
    fn send_event(&self, name: &str) {
        match &self.analytics_url {
            Some(url) => self.post_analytics(url.clone(), name),
            None => tracing::debug!(event = name, "analytics event"),
        }
    }
}
