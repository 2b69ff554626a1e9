//! Tests for the HTTP client API implementation

use super::{ApiClient, HttpApiClient, TransportError, BRAINTREE_VERSION};
use crate::analytics::AnalyticsSink;
use crate::types::{Authorization, ClientConfig};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

const TOKENIZATION_KEY: &str = "sandbox_tmxhyf7d_dcpspy2brwdjr3qn";

fn tokenization_key_client(url: String) -> HttpApiClient {
    let config = ClientConfig::new(
        url,
        Authorization::TokenizationKey(TOKENIZATION_KEY.to_string()),
    );
    HttpApiClient::new(config).unwrap()
}

#[tokio::test]
async fn test_client_creation_normalizes_base_url() {
    let client = tokenization_key_client("https://example.com/merchants/m1/client_api".to_string());
    assert_eq!(client.base_url(), "https://example.com/merchants/m1/client_api/");
    assert_eq!(client.session_id().len(), 32);
}

#[tokio::test]
async fn test_client_creation_rejects_invalid_config() {
    let config = ClientConfig::new(
        "not-a-url",
        Authorization::TokenizationKey(TOKENIZATION_KEY.to_string()),
    );
    assert!(HttpApiClient::new(config).is_err());
}

#[tokio::test]
async fn test_fetch_configuration_success() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/configuration")
        .match_query(Matcher::UrlEncoded(
            "configVersion".to_string(),
            "3".to_string(),
        ))
        .match_header("Client-Key", TOKENIZATION_KEY)
        .match_header("Braintree-Version", BRAINTREE_VERSION)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "environment": "sandbox",
                "paypalEnabled": true,
                "paypal": { "clientId": "paypal-client-id" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = tokenization_key_client(server.url());
    let configuration = client.fetch_configuration().await.unwrap();

    assert!(configuration.is_paypal_enabled());
    assert_eq!(configuration.environment(), Some("sandbox"));
    assert_eq!(configuration.paypal_client_id(), Some("paypal-client-id"));
}

#[tokio::test]
async fn test_fetch_configuration_is_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/configuration")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "paypalEnabled": true }).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = tokenization_key_client(server.url());
    client.fetch_configuration().await.unwrap();
    client.fetch_configuration().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalidated_configuration_is_refetched() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/configuration")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "paypalEnabled": true }).to_string())
        .expect(2)
        .create_async()
        .await;

    let client = tokenization_key_client(server.url());
    client.fetch_configuration().await.unwrap();
    client.invalidate_configuration().await;
    client.fetch_configuration().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_configuration_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/configuration")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = tokenization_key_client(server.url());
    let error = client.fetch_configuration().await.unwrap_err();

    assert_eq!(error.status, Some(500));
    assert!(error.body.is_none());
    assert!(error.to_string().contains("request failed with status: 500"));
}

#[tokio::test]
async fn test_post_with_client_token_uses_bearer_auth() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/paypal_hermes/create_payment_resource")
        .match_header("Authorization", "Bearer fingerprint")
        .match_body(Matcher::PartialJson(json!({ "amount": "10.00" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "paymentResource": {
                    "redirectUrl": "https://www.sandbox.paypal.com/checkoutnow?token=EC-123"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = ClientConfig::new(
        server.url(),
        Authorization::ClientToken {
            authorization_fingerprint: "fingerprint".to_string(),
            config_url: None,
        },
    );
    let client = HttpApiClient::new(config).unwrap();

    let body = client
        .post(
            "v1/paypal_hermes/create_payment_resource",
            &json!({ "amount": "10.00" }),
        )
        .await
        .unwrap();

    assert_eq!(
        body["paymentResource"]["redirectUrl"],
        "https://www.sandbox.paypal.com/checkoutnow?token=EC-123"
    );
}

#[tokio::test]
async fn test_post_error_keeps_json_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/paypal_hermes/setup_billing_agreement")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "paymentResources": {
                    "errorDetails": [{ "issue": "INSTRUMENT_DECLINED" }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = tokenization_key_client(server.url());
    let error = client
        .post("v1/paypal_hermes/setup_billing_agreement", &json!({}))
        .await
        .unwrap_err();

    assert_eq!(error.status, Some(422));
    assert!(error.message.is_none());
    assert_eq!(
        error.body.unwrap()["paymentResources"]["errorDetails"][0]["issue"],
        "INSTRUMENT_DECLINED"
    );
}

#[tokio::test]
async fn test_post_non_json_success_is_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/payment_methods/paypal_accounts")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = tokenization_key_client(server.url());
    let error = client
        .post("v1/payment_methods/paypal_accounts", &json!({}))
        .await
        .unwrap_err();

    assert_eq!(error.status, Some(200));
    assert!(error.message.is_some());
}

#[tokio::test]
async fn test_post_connection_failure() {
    let config = ClientConfig::new(
        "http://10.255.255.1:9999", // Non-routable IP
        Authorization::TokenizationKey(TOKENIZATION_KEY.to_string()),
    )
    .with_timeout(Duration::from_millis(1));
    let client = HttpApiClient::new(config).unwrap();

    let error: TransportError = client
        .post("v1/paypal_hermes/create_payment_resource", &json!({}))
        .await
        .unwrap_err();

    assert!(error.is_connection_failure());
    assert!(error.message.is_some());
}

#[tokio::test]
async fn test_analytics_events_are_posted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/tracking/batch/events")
        .match_body(Matcher::PartialJson(json!({
            "analytics": [{ "kind": "paypal:tokenize:succeeded" }],
            "_meta": { "platform": "rust" }
        })))
        .with_status(200)
        .create_async()
        .await;

    let config = ClientConfig::new(
        "https://example.com/client_api/",
        Authorization::TokenizationKey(TOKENIZATION_KEY.to_string()),
    )
    .with_analytics_url(format!("{}/v1/tracking/batch/events", server.url()));
    let client = HttpApiClient::new(config).unwrap();

    client.send_event("paypal:tokenize:succeeded");

    for _ in 0..50 {
        if mock.matched_async().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    mock.assert_async().await;
}

#[test]
fn test_analytics_without_runtime_does_not_panic() {
    let config = ClientConfig::new(
        "https://example.com/client_api/",
        Authorization::TokenizationKey(TOKENIZATION_KEY.to_string()),
    )
    .with_analytics_url("https://example.com/events");
    let client = HttpApiClient::new(config).unwrap();

    client.send_event("paypal:tokenize:failed");
}

#[test]
fn test_transport_error_messages() {
    use std::error::Error as _;

    assert_eq!(
        TransportError::status(503, None).to_string(),
        "request failed with status: 503"
    );
    assert_eq!(
        TransportError::decode(200, "expected value").to_string(),
        "HTTP 200: expected value"
    );
    assert_eq!(
        TransportError::connection("connection reset").to_string(),
        "network connection failed: connection reset"
    );

    let error = crate::TokenizationError::tokenization_failed(TransportError::connection("offline"));
    let source = error.source().unwrap();
    assert_eq!(source.to_string(), "network connection failed: offline");
}
