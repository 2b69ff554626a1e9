//! Configuration gate
//!
//! Checks that the merchant configuration allows a PayPal flow before any
//! request is built.

use crate::analytics::{EventReporter, TokenizeEvent};
use crate::types::{Environment, EnvironmentPolicy, MerchantConfiguration};
use crate::{Result, TokenizationError};

/// Configuration that passed the gate
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedContext {
    pub configuration: MerchantConfiguration,
    /// PayPal REST client id
    pub client_id: String,
    pub environment: Environment,
}

/// Validate a fetched configuration for the PayPal flow
///
/// `configuration` is `None` when the fetch produced no document. The only side
/// effect is the preflight-disabled report when PayPal is turned off.
pub fn validate(
    configuration: Option<MerchantConfiguration>,
    policy: EnvironmentPolicy,
    reporter: &EventReporter,
) -> Result<ValidatedContext> {
    let configuration = configuration.ok_or_else(|| {
        TokenizationError::configuration_fetch_failed("no configuration was returned")
    })?;

    if !configuration.is_paypal_enabled() {
        tracing::warn!("PayPal is not enabled for this merchant");
        reporter.report(TokenizeEvent::PreflightDisabled);
        return Err(TokenizationError::FeatureDisabled);
    }

    let client_id = configuration
        .paypal_client_id()
        .ok_or(TokenizationError::MissingClientId)?
        .to_string();

    let environment = resolve_environment(configuration.environment(), policy)?;

    Ok(ValidatedContext {
        configuration,
        client_id,
        environment,
    })
}

fn resolve_environment(identifier: Option<&str>, policy: EnvironmentPolicy) -> Result<Environment> {
    match (identifier, policy) {
        (Some(identifier), _) => Environment::from_identifier(identifier)
            .ok_or_else(|| TokenizationError::invalid_environment(Some(identifier))),
        (None, EnvironmentPolicy::FallbackToSandbox) => Ok(Environment::Sandbox),
        (None, EnvironmentPolicy::Strict) => Err(TokenizationError::invalid_environment(None)),
    }
}
