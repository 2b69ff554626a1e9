//! PayPal checkout and vault request types

use super::constants::paths;
use serde::{Deserialize, Serialize};

/// Kind of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    Debit,
    Credit,
}

/// A single line item shown to the payer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Number of units, as a decimal string
    pub quantity: String,
    /// Per-unit price, as a decimal string
    pub unit_amount: String,
    /// Item name
    pub name: String,
    /// Debit or credit
    pub kind: LineItemKind,
}

impl LineItem {
    /// Create a new line item
    pub fn new(
        quantity: impl Into<String>,
        unit_amount: impl Into<String>,
        name: impl Into<String>,
        kind: LineItemKind,
    ) -> Self {
        Self {
            quantity: quantity.into(),
            unit_amount: unit_amount.into(),
            name: name.into(),
            kind,
        }
    }
}

/// Page the payer lands on when the PayPal flow opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandingPageType {
    /// PayPal account login page
    Login,
    /// Guest checkout / card entry page
    Billing,
}

/// Options shared by every PayPal request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// URL the browser continuation returns to
    pub return_url: String,
    /// Merchant name shown during the flow
    pub display_name: Option<String>,
    /// Locale for the PayPal pages, e.g. `en_US`
    pub locale_code: Option<String>,
    /// Merchant account to process under
    pub merchant_account_id: Option<String>,
    /// Whether the payer must provide a shipping address
    pub is_shipping_address_required: bool,
    /// Whether the payer may edit the shipping address
    pub is_shipping_address_editable: bool,
    /// Landing page override
    pub landing_page_type: Option<LandingPageType>,
    /// Line items shown to the payer, in display order
    pub line_items: Vec<LineItem>,
    /// Risk correlation id; overrides the one from the risk context
    pub risk_correlation_id: Option<String>,
}

impl RequestOptions {
    /// Create request options with the browser return URL
    pub fn new(return_url: impl Into<String>) -> Self {
        Self {
            return_url: return_url.into(),
            ..Self::default()
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the locale code
    pub fn with_locale_code(mut self, locale_code: impl Into<String>) -> Self {
        self.locale_code = Some(locale_code.into());
        self
    }

    /// Set the merchant account id
    pub fn with_merchant_account_id(mut self, merchant_account_id: impl Into<String>) -> Self {
        self.merchant_account_id = Some(merchant_account_id.into());
        self
    }

    /// Require a shipping address
    pub fn with_shipping_address_required(mut self, required: bool) -> Self {
        self.is_shipping_address_required = required;
        self
    }

    /// Allow the payer to edit the shipping address
    pub fn with_shipping_address_editable(mut self, editable: bool) -> Self {
        self.is_shipping_address_editable = editable;
        self
    }

    /// Set the landing page
    pub fn with_landing_page_type(mut self, landing_page_type: LandingPageType) -> Self {
        self.landing_page_type = Some(landing_page_type);
        self
    }

    /// Set the line items
    pub fn with_line_items(mut self, line_items: Vec<LineItem>) -> Self {
        self.line_items = line_items;
        self
    }

    /// Set the risk correlation id
    pub fn with_risk_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.risk_correlation_id = Some(correlation_id.into());
        self
    }
}

/// Payment intent for one-time checkout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentIntent {
    #[default]
    Authorize,
    Sale,
    Order,
}

/// One-time payment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub options: RequestOptions,
    /// Amount to charge, as a decimal string
    pub amount: String,
    /// ISO 4217 currency; falls back to the merchant configuration
    pub currency_code: Option<String>,
    pub intent: PaymentIntent,
    /// Offer Pay Later to eligible payers
    pub offer_pay_later: bool,
}

impl CheckoutRequest {
    /// Create a checkout request
    pub fn new(amount: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            options,
            amount: amount.into(),
            currency_code: None,
            intent: PaymentIntent::default(),
            offer_pay_later: false,
        }
    }

    /// Set the currency code
    pub fn with_currency_code(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = Some(currency_code.into());
        self
    }

    /// Set the payment intent
    pub fn with_intent(mut self, intent: PaymentIntent) -> Self {
        self.intent = intent;
        self
    }

    /// Offer Pay Later
    pub fn with_offer_pay_later(mut self, offer: bool) -> Self {
        self.offer_pay_later = offer;
        self
    }
}

/// Billing agreement (vault) request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultRequest {
    pub options: RequestOptions,
    /// Billing agreement description shown to the payer
    pub description: Option<String>,
    /// Offer PayPal Credit to eligible payers
    pub offer_credit: bool,
}

impl VaultRequest {
    /// Create a vault request
    pub fn new(options: RequestOptions) -> Self {
        Self {
            options,
            description: None,
            offer_credit: false,
        }
    }

    /// Set the billing agreement description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Offer PayPal Credit
    pub fn with_offer_credit(mut self, offer: bool) -> Self {
        self.offer_credit = offer;
        self
    }
}

/// Which tokenization flow a request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentFlow {
    Checkout,
    Vault,
}

impl PaymentFlow {
    /// Hermes endpoint that creates the approval resource for this flow
    pub fn hermes_path(&self) -> &'static str {
        match self {
            PaymentFlow::Checkout => paths::CREATE_PAYMENT_RESOURCE,
            PaymentFlow::Vault => paths::SETUP_BILLING_AGREEMENT,
        }
    }
}

/// A PayPal payment request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentRequest {
    /// One-time payment
    Checkout(CheckoutRequest),
    /// Billing agreement
    Vault(VaultRequest),
    /// Shared options only; has no flow and cannot be tokenized
    Unspecified(RequestOptions),
}

impl PaymentRequest {
    /// Options shared across flows
    pub fn options(&self) -> &RequestOptions {
        match self {
            PaymentRequest::Checkout(r) => &r.options,
            PaymentRequest::Vault(r) => &r.options,
            PaymentRequest::Unspecified(options) => options,
        }
    }

    /// Flow for this request, `None` for [`PaymentRequest::Unspecified`]
    pub fn flow(&self) -> Option<PaymentFlow> {
        match self {
            PaymentRequest::Checkout(_) => Some(PaymentFlow::Checkout),
            PaymentRequest::Vault(_) => Some(PaymentFlow::Vault),
            PaymentRequest::Unspecified(_) => None,
        }
    }
}

impl From<CheckoutRequest> for PaymentRequest {
    fn from(request: CheckoutRequest) -> Self {
        PaymentRequest::Checkout(request)
    }
}

impl From<VaultRequest> for PaymentRequest {
    fn from(request: VaultRequest) -> Self {
        PaymentRequest::Vault(request)
    }
}

impl From<RequestOptions> for PaymentRequest {
    fn from(options: RequestOptions) -> Self {
        PaymentRequest::Unspecified(options)
    }
}
