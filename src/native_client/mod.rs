//! Native checkout client
//!
//! [`NativeCheckoutClient`] drives one tokenization attempt from a payment
//! request to either an approval context or a PayPal account nonce:
//!
//! 1. reject requests with no flow
//! 2. report the flow's started event
//! 3. fetch and gate the merchant configuration
//! 4. build the Hermes request body
//! 5. send it, enriching failures with the server-reported issue
//! 6. normalize the response
//! 7. report the closing event and return
//!
//! # Examples
//!
//! ```no_run
//! use paypal_native::native_client::NativeCheckoutClient;
//! use paypal_native::types::{ClientConfig, RequestOptions, RiskContext, VaultRequest};
//!
//! # async fn example() -> paypal_native::Result<()> {
//! let config = ClientConfig::from_tokenization_key("sandbox_abc123_merchant456")?;
//! let client = NativeCheckoutClient::from_config(config)?;
//!
//! let request = VaultRequest::new(RequestOptions::new("com.example.app://paypal"))
//!     .with_description("Monthly subscription");
//! let result = client
//!     .tokenize(&request.into(), &RiskContext::new("risk-correlation-id"))
//!     .await?;
//!
//! if let Some(order_id) = result.order_id() {
//!     println!("Payer must approve order {}", order_id);
//! }
//! # Ok(())
//! # }
//! ```

use crate::analytics::{AnalyticsSink, EventReporter, TokenizeEvent};
use crate::api_client::{ApiClient, HttpApiClient, TransportError};
use crate::gate::{self, ValidatedContext};
use crate::normalizer;
use crate::parameters;
use crate::transport;
use crate::types::{
    paths, ClientConfig, EnvironmentPolicy, PayPalAccountNonce, PaymentFlow, PaymentRequest,
    RiskContext, TokenizationResult,
};
use crate::{Result, TokenizationError};
use std::sync::Arc;
use tracing::Instrument;

/// How the browser or native continuation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinuationOutcome {
    /// Payer approved; `return_url` is the URL the flow redirected to
    Approved { return_url: String },
    /// Payer dismissed the flow
    Canceled,
    /// The app lost its connection while switching back from the browser
    ConnectionLost,
}

/// PayPal native checkout and vault tokenization client
#[derive(Debug)]
pub struct NativeCheckoutClient<C = HttpApiClient> {
    api: Arc<C>,
    reporter: EventReporter,
    environment_policy: EnvironmentPolicy,
}

impl<C> Clone for NativeCheckoutClient<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            reporter: self.reporter.clone(),
            environment_policy: self.environment_policy,
        }
    }
}

impl NativeCheckoutClient<HttpApiClient> {
    /// Create a client backed by the HTTP client API
    ///
    /// Analytics events go to the same client, which posts them to the
    /// configured analytics URL or only logs them.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let policy = config.environment_policy;
        let api = Arc::new(HttpApiClient::new(config)?);
        let sink: Arc<dyn AnalyticsSink> = api.clone();
        Ok(Self {
            api,
            reporter: EventReporter::new(sink),
            environment_policy: policy,
        })
    }
}

impl<C: ApiClient> NativeCheckoutClient<C> {
    /// Create a client from an API client and an analytics sink
    pub fn new(api: Arc<C>, sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            api,
            reporter: EventReporter::new(sink),
            environment_policy: EnvironmentPolicy::default(),
        }
    }

    /// Set how a configuration without an environment is treated
    pub fn with_environment_policy(mut self, policy: EnvironmentPolicy) -> Self {
        self.environment_policy = policy;
        self
    }

    /// Underlying API client
    pub fn api(&self) -> &C {
        &self.api
    }

    /// Event reporter used by this client
    pub fn reporter(&self) -> &EventReporter {
        &self.reporter
    }

    /// Run a checkout or vault tokenization
    ///
    /// Performs at most one tokenization `POST`. A failure reports exactly one
    /// terminal event before this returns. A pending approval reports the
    /// browser presentation marker instead of a conversion.
    pub async fn tokenize(
        &self,
        request: &PaymentRequest,
        risk: &RiskContext,
    ) -> Result<TokenizationResult> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("paypal_tokenize", session_id = %session_id);

        async {
            let result = self.run_tokenize(request, risk).await;
            self.finish(result, tokenize_success_event, failure_event)
        }
        .instrument(span)
        .await
    }

    async fn run_tokenize(
        &self,
        request: &PaymentRequest,
        risk: &RiskContext,
    ) -> Result<TokenizationResult> {
        let flow = request.flow().ok_or_else(|| {
            tracing::warn!("Payment request is neither checkout nor vault");
            TokenizationError::InvalidRequestType
        })?;

        self.reporter.report(match flow {
            PaymentFlow::Checkout => TokenizeEvent::CheckoutStarted,
            PaymentFlow::Vault => TokenizeEvent::VaultStarted,
        });

        let context = self.validated_context().await?;
        tracing::info!(
            flow = ?flow,
            environment = context.environment.as_str(),
            "Merchant configuration allows PayPal"
        );

        let correlation_id = risk.resolve(request.options().risk_correlation_id.as_deref());
        let body =
            parameters::build_parameters(request, &context.configuration, correlation_id)
                .to_value()?;

        let response = transport::send(&*self.api, flow.hermes_path(), &body)
            .await
            .map_err(normalizer::enrich_error)?;

        normalizer::normalize(&response, &context)
    }

    async fn validated_context(&self) -> Result<ValidatedContext> {
        let configuration = self.api.fetch_configuration().await.map_err(|e| {
            tracing::error!("Failed to fetch merchant configuration: {}", e);
            TokenizationError::configuration_fetch_failed(e.to_string())
        })?;

        gate::validate(Some(configuration), self.environment_policy, &self.reporter)
    }

    /// Exchange an approved continuation for a PayPal account nonce
    pub async fn tokenize_account(
        &self,
        request: &PaymentRequest,
        return_url: &str,
        risk: &RiskContext,
    ) -> Result<PayPalAccountNonce> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("paypal_tokenize_account", session_id = %session_id);

        async {
            let result = self.run_tokenize_account(request, return_url, risk).await;
            self.finish(result, |_| TokenizeEvent::Succeeded, account_failure_event)
        }
        .instrument(span)
        .await
    }

    async fn run_tokenize_account(
        &self,
        request: &PaymentRequest,
        return_url: &str,
        risk: &RiskContext,
    ) -> Result<PayPalAccountNonce> {
        let correlation_id = risk.resolve(request.options().risk_correlation_id.as_deref());
        let body =
            parameters::build_account_parameters(request, return_url, correlation_id).to_value()?;

        let response = transport::send(&*self.api, paths::PAYPAL_ACCOUNTS, &body)
            .await
            .map_err(normalizer::enrich_error)?;

        normalizer::parse_account_nonce(&response)
    }

    /// Finish a flow once the browser or native continuation has returned
    pub async fn complete_continuation(
        &self,
        request: &PaymentRequest,
        outcome: ContinuationOutcome,
        risk: &RiskContext,
    ) -> Result<PayPalAccountNonce> {
        match outcome {
            ContinuationOutcome::Approved { return_url } => {
                self.tokenize_account(request, &return_url, risk).await
            }
            ContinuationOutcome::Canceled => {
                tracing::info!("Payer canceled the PayPal flow");
                self.finish(
                    Err(TokenizationError::UserCanceled),
                    |_| TokenizeEvent::Succeeded,
                    failure_event,
                )
            }
            ContinuationOutcome::ConnectionLost => {
                tracing::warn!("Connection lost while returning from the browser");
                self.reporter.report(TokenizeEvent::BrowserSwitchConnectionLost);
                Err(TokenizationError::tokenization_failed(
                    TransportError::connection("connection lost during browser switch"),
                ))
            }
        }
    }

    /// Report the closing event for `result` and hand it back
    fn finish<T>(
        &self,
        result: Result<T>,
        on_success: fn(&T) -> TokenizeEvent,
        on_failure: fn(&TokenizationError) -> Option<TokenizeEvent>,
    ) -> Result<T> {
        match &result {
            Ok(value) => self.reporter.report(on_success(value)),
            Err(error) => {
                tracing::warn!(code = error.code().as_i32(), "Tokenization failed: {}", error);
                if let Some(event) = on_failure(error) {
                    self.reporter.report(event);
                }
            }
        }
        result
    }
}

/// Event for a successful `tokenize`
///
/// Only a parsed account nonce counts as a conversion. An approval URL hands
/// the payer over to the browser, and the conversion is reported when the
/// continuation is exchanged for a nonce.
pub fn tokenize_success_event(result: &TokenizationResult) -> TokenizeEvent {
    match result {
        TokenizationResult::AccountNonce(_) => TokenizeEvent::Succeeded,
        TokenizationResult::ApprovalPending(_) => TokenizeEvent::BrowserPresentationStarted,
    }
}

/// Terminal event for a failure, `None` when the gate already reported one
pub fn failure_event(error: &TokenizationError) -> Option<TokenizeEvent> {
    match error {
        TokenizationError::FeatureDisabled => None,
        TokenizationError::UserCanceled => Some(TokenizeEvent::BrowserCanceled),
        TokenizationError::TokenizationFailed { cause, .. } if cause.is_connection_failure() => {
            Some(TokenizeEvent::NetworkFailed)
        }
        _ => Some(TokenizeEvent::Failed),
    }
}

/// Terminal event for a failed account exchange; always `Failed`
pub fn account_failure_event(_error: &TokenizationError) -> Option<TokenizeEvent> {
    Some(TokenizeEvent::Failed)
}
