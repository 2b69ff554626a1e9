//! Request parameter builder
//!
//! Translates a [`PaymentRequest`] plus the merchant configuration into the
//! JSON body sent to the Hermes endpoints, and builds the body of the final
//! account tokenization call. Building never fails: optional fields that are
//! missing or empty are simply left out.

use crate::types::{
    callback_urls, LandingPageType, LineItem, MerchantConfiguration, PaymentIntent, PaymentRequest,
};
use serde::Serialize;
use serde_json::Value;

/// Presentation and consent parameters shown by PayPal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceProfile {
    pub no_shipping: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_page_type: Option<LandingPageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_code: Option<String>,
    pub address_override: bool,
}

/// Fields only sent for one-time payments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutParameters {
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_iso_code: Option<String>,
    pub intent: PaymentIntent,
    pub offer_pay_later: bool,
}

/// Fields only sent for billing agreements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub offer_paypal_credit: bool,
}

/// Body of a Hermes request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireParameters {
    pub experience_profile: ExperienceProfile,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_account_id: Option<String>,
    pub return_url: String,
    pub cancel_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(flatten)]
    pub checkout: Option<CheckoutParameters>,
    #[serde(flatten)]
    pub vault: Option<VaultParameters>,
}

impl WireParameters {
    /// JSON body for the transport
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Build the Hermes request body
pub fn build_parameters(
    request: &PaymentRequest,
    configuration: &MerchantConfiguration,
    correlation_id: Option<&str>,
) -> WireParameters {
    let options = request.options();

    let experience_profile = ExperienceProfile {
        no_shipping: !options.is_shipping_address_required,
        brand_name: non_empty(options.display_name.as_deref())
            .or_else(|| non_empty(configuration.default_display_name())),
        landing_page_type: options.landing_page_type,
        locale_code: non_empty(options.locale_code.as_deref()),
        address_override: !options.is_shipping_address_editable,
    };

    let checkout = match request {
        PaymentRequest::Checkout(checkout) => Some(CheckoutParameters {
            amount: checkout.amount.clone(),
            currency_iso_code: non_empty(checkout.currency_code.as_deref())
                .or_else(|| non_empty(configuration.currency_code())),
            intent: checkout.intent,
            offer_pay_later: checkout.offer_pay_later,
        }),
        _ => None,
    };

    let vault = match request {
        PaymentRequest::Vault(vault) => Some(VaultParameters {
            description: non_empty(vault.description.as_deref()),
            offer_paypal_credit: vault.offer_credit,
        }),
        _ => None,
    };

    WireParameters {
        experience_profile,
        line_items: options.line_items.clone(),
        merchant_account_id: non_empty(options.merchant_account_id.as_deref()),
        return_url: callback_urls::success(),
        cancel_url: callback_urls::cancel(),
        correlation_id: non_empty(correlation_id),
        checkout,
        vault,
    }
}

/// Options of the final account tokenization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountOptions {
    pub validate: bool,
}

/// Redirect data handed back by the continuation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponse {
    #[serde(rename = "webURL")]
    pub web_url: String,
}

/// PayPal account payload of the final tokenization call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayPalAccountParameters {
    pub correlation_id: String,
    pub response_type: &'static str,
    pub response: AccountResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<PaymentIntent>,
    pub options: AccountOptions,
}

/// Body of the final `paypal_accounts` tokenization call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountParameters {
    pub paypal_account: PayPalAccountParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_account_id: Option<String>,
}

impl AccountParameters {
    /// JSON body for the transport
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Build the account tokenization body from the continuation's return URL
pub fn build_account_parameters(
    request: &PaymentRequest,
    return_url: &str,
    correlation_id: Option<&str>,
) -> AccountParameters {
    let intent = match request {
        PaymentRequest::Checkout(checkout) => Some(checkout.intent),
        _ => None,
    };

    AccountParameters {
        paypal_account: PayPalAccountParameters {
            correlation_id: correlation_id.unwrap_or_default().to_string(),
            response_type: "web",
            response: AccountResponse {
                web_url: return_url.to_string(),
            },
            intent,
            options: AccountOptions { validate: false },
        },
        merchant_account_id: non_empty(request.options().merchant_account_id.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckoutRequest, LineItemKind, RequestOptions, VaultRequest};
    use serde_json::json;

    fn configuration() -> MerchantConfiguration {
        MerchantConfiguration::new(json!({
            "paypalEnabled": true,
            "paypal": { "environment": "offline" }
        }))
    }

    fn body(request: &PaymentRequest, configuration: &MerchantConfiguration) -> Value {
        build_parameters(request, configuration, None).to_value().unwrap()
    }

    #[test]
    fn test_returns_all_params() {
        let options = RequestOptions::new("returnURL")
            .with_shipping_address_required(true)
            .with_display_name("Display Name")
            .with_landing_page_type(LandingPageType::Login)
            .with_locale_code("locale-code")
            .with_merchant_account_id("merchant-account-id")
            .with_shipping_address_editable(true)
            .with_line_items(vec![LineItem::new("1", "1", "item", LineItemKind::Credit)]);
        let request = PaymentRequest::Unspecified(options);

        let parameters = body(&request, &configuration());
        let profile = &parameters["experience_profile"];

        assert_eq!(profile["no_shipping"], json!(false));
        assert_eq!(profile["brand_name"], json!("Display Name"));
        assert_eq!(profile["landing_page_type"], json!("login"));
        assert_eq!(profile["locale_code"], json!("locale-code"));
        assert_eq!(profile["address_override"], json!(false));
        assert_eq!(parameters["merchant_account_id"], json!("merchant-account-id"));
        assert_eq!(
            parameters["line_items"],
            json!([{ "quantity": "1", "unit_amount": "1", "name": "item", "kind": "credit" }])
        );
        assert_eq!(
            parameters["return_url"],
            json!("sdk.ios.braintree://onetouch/v1/success")
        );
        assert_eq!(
            parameters["cancel_url"],
            json!("sdk.ios.braintree://onetouch/v1/cancel")
        );
    }

    #[test]
    fn test_display_name_falls_back_to_configuration() {
        let config = MerchantConfiguration::new(json!({
            "paypalEnabled": true,
            "paypal": { "environment": "offline", "displayName": "my display name" }
        }));
        let request = PaymentRequest::Unspecified(RequestOptions::new("returnURL"));

        let parameters = body(&request, &config);
        assert_eq!(
            parameters["experience_profile"]["brand_name"],
            json!("my display name")
        );
    }

    #[test]
    fn test_no_shipping_defaults_to_true() {
        let request = PaymentRequest::Unspecified(RequestOptions::new("returnURL"));
        let parameters = body(&request, &configuration());
        let profile = &parameters["experience_profile"];

        assert_eq!(profile["no_shipping"], json!(true));
        assert_eq!(profile["address_override"], json!(true));
    }

    #[test]
    fn test_no_shipping_false_when_shipping_required() {
        let request = PaymentRequest::Unspecified(
            RequestOptions::new("returnURL").with_shipping_address_required(true),
        );
        let parameters = body(&request, &configuration());
        assert_eq!(parameters["experience_profile"]["no_shipping"], json!(false));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let request = PaymentRequest::Unspecified(RequestOptions::new("returnURL"));
        let parameters = body(&request, &configuration());
        let profile = parameters["experience_profile"].as_object().unwrap();

        assert!(!profile.contains_key("brand_name"));
        assert!(!profile.contains_key("landing_page_type"));
        assert!(!profile.contains_key("locale_code"));

        let top = parameters.as_object().unwrap();
        assert!(!top.contains_key("line_items"));
        assert!(!top.contains_key("merchant_account_id"));
        assert!(!top.contains_key("correlation_id"));
        assert!(!top.contains_key("amount"));
        assert!(!top.contains_key("offer_paypal_credit"));
    }

    #[test]
    fn test_return_url_is_not_embedded() {
        let request =
            PaymentRequest::Unspecified(RequestOptions::new("com.example.app://paypal-return"));
        let serialized = serde_json::to_string(&build_parameters(&request, &configuration(), None))
            .unwrap();
        assert!(!serialized.contains("com.example.app"));
    }

    #[test]
    fn test_correlation_id_is_attached() {
        let request = PaymentRequest::Unspecified(RequestOptions::new("returnURL"));
        let parameters = build_parameters(&request, &configuration(), Some("risk-id"))
            .to_value()
            .unwrap();
        assert_eq!(parameters["correlation_id"], json!("risk-id"));
    }

    #[test]
    fn test_builder_is_idempotent() {
        let request: PaymentRequest = CheckoutRequest::new(
            "10.00",
            RequestOptions::new("returnURL")
                .with_display_name("Store")
                .with_line_items(vec![
                    LineItem::new("2", "3.00", "Socks", LineItemKind::Debit),
                    LineItem::new("1", "4.00", "Hat", LineItemKind::Debit),
                ]),
        )
        .into();
        let config = configuration();

        let first = serde_json::to_string(&build_parameters(&request, &config, Some("c"))).unwrap();
        let second = serde_json::to_string(&build_parameters(&request, &config, Some("c"))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_vault_scenario() {
        let request: PaymentRequest = VaultRequest::new(
            RequestOptions::new("returnURL")
                .with_shipping_address_required(true)
                .with_display_name("Store")
                .with_line_items(vec![LineItem::new(
                    "1",
                    "10.00",
                    "Widget",
                    LineItemKind::Credit,
                )]),
        )
        .into();

        let parameters = body(&request, &configuration());

        assert_eq!(
            parameters["experience_profile"],
            json!({ "no_shipping": false, "brand_name": "Store", "address_override": true })
        );
        assert_eq!(
            parameters["line_items"],
            json!([{ "quantity": "1", "unit_amount": "10.00", "name": "Widget", "kind": "credit" }])
        );
        assert_eq!(parameters["offer_paypal_credit"], json!(false));
    }

    #[test]
    fn test_checkout_flow_parameters() {
        let config = MerchantConfiguration::new(json!({
            "paypalEnabled": true,
            "paypal": { "currencyIsoCode": "EUR" }
        }));
        let request: PaymentRequest = CheckoutRequest::new("25.50", RequestOptions::new("r"))
            .with_intent(PaymentIntent::Sale)
            .with_offer_pay_later(true)
            .into();

        let parameters = body(&request, &config);
        assert_eq!(parameters["amount"], json!("25.50"));
        assert_eq!(parameters["currency_iso_code"], json!("EUR"));
        assert_eq!(parameters["intent"], json!("sale"));
        assert_eq!(parameters["offer_pay_later"], json!(true));

        let request: PaymentRequest = CheckoutRequest::new("1.00", RequestOptions::new("r"))
            .with_currency_code("USD")
            .into();
        assert_eq!(body(&request, &config)["currency_iso_code"], json!("USD"));
    }

    #[test]
    fn test_account_parameters() {
        let request: PaymentRequest = CheckoutRequest::new(
            "1.00",
            RequestOptions::new("r").with_merchant_account_id("ma-1"),
        )
        .into();

        let parameters = build_account_parameters(
            &request,
            "sdk.ios.braintree://onetouch/v1/success?token=EC-1",
            Some("risk-id"),
        )
        .to_value()
        .unwrap();

        assert_eq!(
            parameters,
            json!({
                "paypal_account": {
                    "correlation_id": "risk-id",
                    "response_type": "web",
                    "response": { "webURL": "sdk.ios.braintree://onetouch/v1/success?token=EC-1" },
                    "intent": "authorize",
                    "options": { "validate": false }
                },
                "merchant_account_id": "ma-1"
            })
        );

        let vault: PaymentRequest = VaultRequest::new(RequestOptions::new("r")).into();
        let parameters = build_account_parameters(&vault, "x://y", None)
            .to_value()
            .unwrap();
        assert!(parameters["paypal_account"].get("intent").is_none());
        assert_eq!(parameters["paypal_account"]["correlation_id"], json!(""));
    }
}
