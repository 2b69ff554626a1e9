//! Tokenization transport adapter
//!
//! One `POST` per call, no retries. Failures keep the transport error intact
//! as the cause of [`TokenizationError::TokenizationFailed`].

use crate::api_client::ApiClient;
use crate::{Result, TokenizationError};
use serde_json::Value;

/// Send a tokenization body to `path`
pub async fn send<C>(api: &C, path: &str, body: &Value) -> Result<Value>
where
    C: ApiClient + ?Sized,
{
    tracing::debug!(path, "Sending tokenization request");

    match api.post(path, body).await {
        Ok(response) => {
            tracing::debug!(
                "Tokenization response: {}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
            Ok(response)
        }
        Err(cause) => {
            tracing::error!(path, status = ?cause.status, "Tokenization request failed: {}", cause);
            Err(TokenizationError::tokenization_failed(cause))
        }
    }
}
