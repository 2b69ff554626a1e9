//! Endpoint paths and fixed wire values

/// Gateway endpoint paths, relative to the client API base URL
pub mod paths {
    /// Remote merchant configuration
    pub const CONFIGURATION: &str = "v1/configuration";
    /// Hermes endpoint for one-time payments
    pub const CREATE_PAYMENT_RESOURCE: &str = "v1/paypal_hermes/create_payment_resource";
    /// Hermes endpoint for billing agreements
    pub const SETUP_BILLING_AGREEMENT: &str = "v1/paypal_hermes/setup_billing_agreement";
    /// Final account tokenization
    pub const PAYPAL_ACCOUNTS: &str = "v1/payment_methods/paypal_accounts";
}

/// Callback URLs sent with every Hermes request
pub mod callback_urls {
    /// Scheme and host of the SDK callback URLs
    pub const BASE: &str = "sdk.ios.braintree://onetouch/v1/";
    /// Path suffix for an approved flow
    pub const SUCCESS_PATH: &str = "success";
    /// Path suffix for a canceled flow
    pub const CANCEL_PATH: &str = "cancel";

    /// Full success callback URL
    pub fn success() -> String {
        format!("{}{}", BASE, SUCCESS_PATH)
    }

    /// Full cancel callback URL
    pub fn cancel() -> String {
        format!("{}{}", BASE, CANCEL_PATH)
    }
}

/// Recognized environment identifiers
pub mod environments {
    pub const SANDBOX: &str = "sandbox";
    pub const PRODUCTION: &str = "production";
}
