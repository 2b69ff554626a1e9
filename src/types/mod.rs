//! Core types for PayPal native tokenization
//!
//! This module defines the requests a merchant application builds, the remote
//! configuration the gateway returns, and the results the pipeline produces.
//!
//! # Architecture
//!
//! The types module is organized as follows:
//! - [`request`] - Checkout and vault requests, line items, landing pages
//! - [`configuration`] - Remote merchant configuration document
//! - [`environment`] - PayPal environments and the missing-environment policy
//! - [`result`] - Approval contexts and tokenized account nonces
//! - [`risk`] - Correlation id context supplied by the risk-data collector
//! - [`client_config`] - HTTP client configuration and authorization
//! - [`constants`] - Endpoint paths and callback URLs
//!
//! # Examples
//!
//! ## Building a Vault Request
//!
//! ```
//! use paypal_native::types::{LineItem, LineItemKind, PaymentRequest, RequestOptions, VaultRequest};
//!
//! let options = RequestOptions::new("com.example.app://paypal")
//!     .with_display_name("Store")
//!     .with_shipping_address_required(true)
//!     .with_line_items(vec![LineItem::new("1", "10.00", "Widget", LineItemKind::Credit)]);
//!
//! let request: PaymentRequest = VaultRequest::new(options)
//!     .with_description("Monthly widget subscription")
//!     .into();
//! assert!(request.flow().is_some());
//! ```
//!
//! ## Reading Merchant Configuration
//!
//! ```
//! use paypal_native::types::MerchantConfiguration;
//! use serde_json::json;
//!
//! let config = MerchantConfiguration::new(json!({
//!     "environment": "sandbox",
//!     "paypalEnabled": true,
//!     "paypal": { "clientId": "client-id" }
//! }));
//! assert!(config.is_paypal_enabled());
//! assert_eq!(config.paypal_client_id(), Some("client-id"));
//! ```

pub mod client_config;
pub mod configuration;
pub mod constants;
pub mod environment;
pub mod request;
pub mod result;
pub mod risk;

// Re-export commonly used types
pub use client_config::{Authorization, ClientConfig, DEFAULT_CONFIGURATION_TTL};
pub use configuration::MerchantConfiguration;
pub use constants::{callback_urls, environments, paths};
pub use environment::{Environment, EnvironmentPolicy};
pub use request::{
    CheckoutRequest, LandingPageType, LineItem, LineItemKind, PaymentFlow, PaymentIntent,
    PaymentRequest, RequestOptions, VaultRequest,
};
pub use result::{
    AccountDetails, ApprovalContext, PayPalAccountNonce, PostalAddress, TokenizationResult,
    PAYPAL_ACCOUNT_TYPE,
};
pub use risk::RiskContext;
