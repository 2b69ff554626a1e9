//! Response normalizer
//!
//! The Hermes backend has answered with more than one body layout over time.
//! Each known layout is a named [`ResponseShape`] and they are tried in the
//! order of [`RESPONSE_SHAPES`]; the first one that recognizes the body wins.
//! Supporting another layout means appending one entry.
//!
//! | Order | Shape | Key path | Result |
//! |---|---|---|---|
//! | 1 | `payment_resource` | `paymentResource.redirectUrl` | approval pending |
//! | 2 | `agreement_setup` | `agreementSetup.approvalUrl` | approval pending |
//! | 3 | `paypal_account` | `paypalAccounts[0]` | account nonce |

use crate::gate::ValidatedContext;
use crate::json::JsonPath;
use crate::types::{ApprovalContext, PayPalAccountNonce, TokenizationResult};
use crate::{Result, TokenizationError};
use serde_json::Value;
use url::Url;

/// Query parameters that may carry the order id, in priority order
pub const ORDER_ID_PARAMETERS: [&str; 2] = ["token", "ba_token"];

/// What a shape found in a response body
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// The payer still has to visit this URL
    ApprovalUrl(Url),
    /// A finished account payload; `None` when it could not be parsed
    Account(Option<PayPalAccountNonce>),
}

/// A named extractor for one historical response layout
#[derive(Clone, Copy)]
pub struct ResponseShape {
    pub name: &'static str,
    extract: fn(JsonPath<'_>) -> Option<Extracted>,
}

impl std::fmt::Debug for ResponseShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseShape")
            .field("name", &self.name)
            .finish()
    }
}

impl ResponseShape {
    /// Run the extractor against a response body
    pub fn extract(&self, body: &Value) -> Option<Extracted> {
        (self.extract)(JsonPath::new(body))
    }
}

fn payment_resource(body: JsonPath<'_>) -> Option<Extracted> {
    body.key("paymentResource")
        .key("redirectUrl")
        .as_url()
        .map(Extracted::ApprovalUrl)
}

fn agreement_setup(body: JsonPath<'_>) -> Option<Extracted> {
    body.key("agreementSetup")
        .key("approvalUrl")
        .as_url()
        .map(Extracted::ApprovalUrl)
}

fn paypal_account(body: JsonPath<'_>) -> Option<Extracted> {
    let accounts = body.key("paypalAccounts");
    accounts.as_array()?;
    Some(Extracted::Account(PayPalAccountNonce::from_json(
        accounts.first(),
    )))
}

/// Known response layouts, in the order they are tried
pub const RESPONSE_SHAPES: &[ResponseShape] = &[
    ResponseShape {
        name: "payment_resource",
        extract: payment_resource,
    },
    ResponseShape {
        name: "agreement_setup",
        extract: agreement_setup,
    },
    ResponseShape {
        name: "paypal_account",
        extract: paypal_account,
    },
];

/// Pull the order id out of an approval URL
pub fn order_id_from_approval_url(url: &Url) -> Option<String> {
    ORDER_ID_PARAMETERS.iter().find_map(|name| {
        url.query_pairs()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    })
}

/// Turn a Hermes response into a tokenization result
pub fn normalize(body: &Value, context: &ValidatedContext) -> Result<TokenizationResult> {
    let extracted = RESPONSE_SHAPES.iter().find_map(|shape| {
        let extracted = shape.extract(body)?;
        tracing::debug!(shape = shape.name, "Matched response shape");
        Some(extracted)
    });

    match extracted {
        Some(Extracted::ApprovalUrl(approval_url)) => {
            let order_id = order_id_from_approval_url(&approval_url)
                .ok_or(TokenizationError::MissingOrderId)?;
            Ok(TokenizationResult::ApprovalPending(ApprovalContext {
                approval_url,
                order_id,
                client_id: context.client_id.clone(),
                environment: context.environment,
            }))
        }
        Some(Extracted::Account(Some(account))) => Ok(TokenizationResult::AccountNonce(account)),
        Some(Extracted::Account(None)) => Err(TokenizationError::ParsingTokenizationResultFailed),
        None => Err(TokenizationError::MissingApprovalUrl),
    }
}

/// Parse the body of the final account tokenization call
pub fn parse_account_nonce(body: &Value) -> Result<PayPalAccountNonce> {
    match paypal_account(JsonPath::new(body)) {
        Some(Extracted::Account(Some(account))) => Ok(account),
        _ => Err(TokenizationError::ParsingTokenizationResultFailed),
    }
}

/// Issue string from a structured Hermes error body
pub fn error_issue(body: &Value) -> Option<&str> {
    JsonPath::new(body)
        .key("paymentResources")
        .key("errorDetails")
        .first()
        .key("issue")
        .as_non_empty_str()
}

/// Attach the server-reported issue to a transport failure without a message
///
/// Existing messages are left alone, and every other error passes through
/// unchanged.
pub fn enrich_error(error: TokenizationError) -> TokenizationError {
    match error {
        TokenizationError::TokenizationFailed {
            cause,
            message: None,
        } => {
            let message = cause.body.as_ref().and_then(error_issue).map(str::to_string);
            if let Some(issue) = &message {
                tracing::debug!(issue = %issue, "Using server error issue as message");
            }
            TokenizationError::TokenizationFailed { cause, message }
        }
        other => other,
    }
}
