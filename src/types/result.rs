//! Tokenization results

use super::environment::Environment;
use crate::json::JsonPath;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default nonce type reported by the gateway for PayPal accounts
pub const PAYPAL_ACCOUNT_TYPE: &str = "PayPalAccount";

/// Outcome of a successful tokenization call
#[derive(Debug, Clone, PartialEq)]
pub enum TokenizationResult {
    /// The payer still has to approve at `approval_url`
    ApprovalPending(ApprovalContext),
    /// The account is already tokenized
    AccountNonce(PayPalAccountNonce),
}

impl TokenizationResult {
    /// Order id when approval is pending
    pub fn order_id(&self) -> Option<&str> {
        match self {
            TokenizationResult::ApprovalPending(ctx) => Some(&ctx.order_id),
            TokenizationResult::AccountNonce(_) => None,
        }
    }

    /// Nonce when tokenization finished
    pub fn nonce(&self) -> Option<&str> {
        match self {
            TokenizationResult::ApprovalPending(_) => None,
            TokenizationResult::AccountNonce(account) => Some(&account.nonce),
        }
    }
}

/// Everything the continuation step needs to let the payer approve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalContext {
    /// Provider-hosted approval page
    pub approval_url: Url,
    /// Order or billing agreement token taken from the approval URL
    pub order_id: String,
    /// PayPal REST client id from the merchant configuration
    pub client_id: String,
    /// Environment the order was created in
    pub environment: Environment,
}

/// Postal address attached to a PayPal account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub recipient_name: Option<String>,
    pub street_address: Option<String>,
    pub extended_address: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

impl PostalAddress {
    fn from_json(path: JsonPath<'_>) -> Option<Self> {
        path.value().filter(|value| value.is_object())?;
        let field = |key: &str| path.key(key).as_str().map(str::to_string);
        Some(Self {
            recipient_name: field("recipientName"),
            street_address: field("line1").or_else(|| field("street1")),
            extended_address: field("line2").or_else(|| field("street2")),
            locality: field("city"),
            region: field("state"),
            postal_code: field("postalCode"),
            country_code: field("countryCode").or_else(|| field("country")),
        })
    }
}

/// Payer details returned with a PayPal account nonce
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub payer_id: Option<String>,
    pub client_metadata_id: Option<String>,
    pub billing_address: Option<PostalAddress>,
    pub shipping_address: Option<PostalAddress>,
}

/// A tokenized PayPal account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPalAccountNonce {
    /// Single-use reference for a server-side charge
    pub nonce: String,
    /// Payment method type, usually `PayPalAccount`
    #[serde(rename = "type")]
    pub kind: String,
    pub details: AccountDetails,
}

impl PayPalAccountNonce {
    /// Parse a `paypalAccounts` entry; `None` when it carries no usable nonce
    pub fn from_json(account: JsonPath<'_>) -> Option<Self> {
        let nonce = account.key("nonce").as_non_empty_str()?.to_string();
        let kind = account
            .key("type")
            .as_non_empty_str()
            .unwrap_or(PAYPAL_ACCOUNT_TYPE)
            .to_string();

        let details = account.key("details");
        let payer_info = details.key("payerInfo");
        let text = |path: JsonPath<'_>| path.as_non_empty_str().map(str::to_string);

        Some(Self {
            nonce,
            kind,
            details: AccountDetails {
                email: text(details.key("email")).or_else(|| text(payer_info.key("email"))),
                first_name: text(payer_info.key("firstName")),
                last_name: text(payer_info.key("lastName")),
                phone: text(payer_info.key("phone")),
                payer_id: text(payer_info.key("payerId")),
                client_metadata_id: text(details.key("correlationId")),
                billing_address: PostalAddress::from_json(payer_info.key("billingAddress")),
                shipping_address: PostalAddress::from_json(payer_info.key("shippingAddress"))
                    .or_else(|| PostalAddress::from_json(payer_info.key("accountAddress"))),
            },
        })
    }
}
