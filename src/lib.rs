//! # PayPal Native Tokenization
//!
//! A **type-safe, async** Rust client for the PayPal native checkout and vault
//! tokenization flow of the Braintree client API.
//!
//! ## Features
//!
//! - 🔒 **Configuration gate**: PayPal availability, client id and environment are checked before any request is built
//! - 🧾 **Deterministic request bodies**: Checkout and vault requests serialize to the exact Hermes wire format
//! - 🌐 **Pluggable transport**: The `ApiClient` trait with a reqwest-backed implementation and cached configuration
//! - 🧭 **Response normalization**: Every known Hermes response layout maps to one typed result
//! - 📈 **Lifecycle analytics**: One conversion per tokenized account and one terminal event per failure, reported without blocking
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paypal_native::{
//!     CheckoutRequest, ClientConfig, NativeCheckoutClient, PaymentIntent, RequestOptions,
//!     RiskContext, TokenizationResult,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_tokenization_key("sandbox_tmxhyf7d_dcpspy2brwdjr3qn")?;
//!     let client = NativeCheckoutClient::from_config(config)?;
//!
//!     let request = CheckoutRequest::new(
//!         "10.00",
//!         RequestOptions::new("com.example.app.payments://paypal").with_display_name("Store"),
//!     )
//!     .with_currency_code("USD")
//!     .with_intent(PaymentIntent::Sale);
//!
//!     match client
//!         .tokenize(&request.into(), &RiskContext::new("risk-correlation-id"))
//!         .await?
//!     {
//!         TokenizationResult::ApprovalPending(approval) => {
//!             println!("Send the payer to {}", approval.approval_url);
//!         }
//!         TokenizationResult::AccountNonce(account) => {
//!             println!("Tokenized account: {}", account.nonce);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Requests, merchant configuration, environments and results
//! - **`gate`**: Configuration gate run before every tokenization
//! - **`parameters`**: Hermes and account tokenization request bodies
//! - **`api_client`**: The `ApiClient` trait and its HTTP implementation
//! - **`transport`**: Single-shot tokenization `POST`
//! - **`normalizer`**: Response shapes, order id extraction and error enrichment
//! - **`analytics`**: Lifecycle events and analytics sinks
//! - **`native_client`**: The end-to-end tokenization pipeline
//! - **`json`**: Optional-chaining access into untyped JSON
//! - **`error`**: Error taxonomy and error codes

pub mod analytics;
pub mod api_client;
pub mod error;
pub mod gate;
pub mod json;
pub mod native_client;
pub mod normalizer;
pub mod parameters;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use analytics::{AnalyticsSink, EventReporter, TokenizeEvent};
pub use api_client::{ApiClient, HttpApiClient, TransportError};
pub use error::{ErrorCode, Result, TokenizationError, ERROR_DOMAIN};
pub use native_client::{ContinuationOutcome, NativeCheckoutClient};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(
            ERROR_DOMAIN,
            "com.braintreepayments.BTPayPalNativeClientErrorDomain"
        );
    }

    #[test]
    fn test_request_flows() {
        let options = RequestOptions::new("com.example.app://paypal");

        let checkout: PaymentRequest = CheckoutRequest::new("1.00", options.clone()).into();
        assert_eq!(checkout.flow(), Some(PaymentFlow::Checkout));
        assert_eq!(
            checkout.flow().map(|f| f.hermes_path()),
            Some("v1/paypal_hermes/create_payment_resource")
        );

        let vault: PaymentRequest = VaultRequest::new(options.clone()).into();
        assert_eq!(
            vault.flow().map(|f| f.hermes_path()),
            Some("v1/paypal_hermes/setup_billing_agreement")
        );

        let bare: PaymentRequest = options.into();
        assert_eq!(bare.flow(), None);
    }
}
