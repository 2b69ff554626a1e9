//! Remote merchant configuration

use crate::json::JsonPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Merchant configuration document fetched from the gateway
///
/// The document is kept as-is; the accessors below read the handful of fields
/// the PayPal flow needs and return `None` when a field is missing or has the
/// wrong type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantConfiguration {
    json: Value,
}

impl MerchantConfiguration {
    /// Wrap a configuration document
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    /// Raw document
    pub fn json(&self) -> &Value {
        &self.json
    }

    fn path(&self) -> JsonPath<'_> {
        JsonPath::new(&self.json)
    }

    /// `paypalEnabled` is literally `true`
    pub fn is_paypal_enabled(&self) -> bool {
        self.path().key("paypalEnabled").is_true()
    }

    /// Gateway environment identifier
    pub fn environment(&self) -> Option<&str> {
        self.path().key("environment").as_str()
    }

    /// PayPal REST client id
    pub fn paypal_client_id(&self) -> Option<&str> {
        self.path().key("paypal").key("clientId").as_non_empty_str()
    }

    /// Merchant display name configured in the control panel
    pub fn default_display_name(&self) -> Option<&str> {
        self.path().key("paypal").key("displayName").as_non_empty_str()
    }

    /// Default currency for PayPal checkout
    pub fn currency_code(&self) -> Option<&str> {
        self.path()
            .key("paypal")
            .key("currencyIsoCode")
            .as_non_empty_str()
    }
}

impl From<Value> for MerchantConfiguration {
    fn from(json: Value) -> Self {
        Self::new(json)
    }
}
