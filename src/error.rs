//! Error types for PayPal native tokenization

use crate::api_client::TransportError;
use thiserror::Error;

/// Error domain shared by every error this crate surfaces
pub const ERROR_DOMAIN: &str = "com.braintreepayments.BTPayPalNativeClientErrorDomain";

/// Result type alias for tokenization operations
pub type Result<T> = std::result::Result<T, TokenizationError>;

/// Coarse error classification exposed to merchant applications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unknown error
    Unknown,
    /// PayPal is disabled in configuration
    Disabled,
    /// Invalid request, e.g. missing PayPal request
    InvalidRequest,
    /// SDK is integrated incorrectly
    Integration,
    /// Payment flow was canceled, typically by the payer
    Canceled,
}

impl ErrorCode {
    /// Numeric code within [`ERROR_DOMAIN`]
    pub fn as_i32(&self) -> i32 {
        match self {
            ErrorCode::Unknown => 0,
            ErrorCode::Disabled => 1,
            ErrorCode::InvalidRequest => 2,
            ErrorCode::Integration => 3,
            ErrorCode::Canceled => 4,
        }
    }
}

/// Errors produced by the tokenization pipeline
#[derive(Debug, Error)]
pub enum TokenizationError {
    /// Remote merchant configuration could not be fetched
    #[error("Failed to fetch Braintree configuration: {reason}")]
    ConfigurationFetchFailed { reason: String },

    /// PayPal is turned off for this merchant
    #[error("PayPal is not enabled for this merchant")]
    FeatureDisabled,

    /// Configuration has no PayPal client id
    #[error("Failed to fetch PayPalClientID from Braintree configuration.")]
    MissingClientId,

    /// Configuration carries an unusable environment identifier
    #[error("PayPal Native Checkout failed because an invalid environment identifier was retrieved from the configuration: {environment:?}")]
    InvalidEnvironment { environment: Option<String> },

    /// The request is neither a checkout nor a vault request
    #[error("PayPal native tokenization failed because request is not of type CheckoutRequest or VaultRequest.")]
    InvalidRequestType,

    /// The network exchange with the tokenization endpoint failed
    #[error("Tokenization failed: {}", .message.as_deref().unwrap_or("network request failed"))]
    TokenizationFailed {
        #[source]
        cause: TransportError,
        message: Option<String>,
    },

    /// No known response shape carried an approval URL
    #[error("Failed to fetch PayPal approvalURL.")]
    MissingApprovalUrl,

    /// The approval URL carried no order id
    #[error("Failed to fetch PayPal order id.")]
    MissingOrderId,

    /// A nonce payload was present but could not be parsed
    #[error("Failed to parse the PayPal account tokenization result.")]
    ParsingTokenizationResultFailed,

    /// The payer left the continuation flow before finishing
    #[error("PayPal flow was canceled by the user.")]
    UserCanceled,

    /// Client construction error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TokenizationError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a configuration fetch error
    pub fn configuration_fetch_failed(reason: impl Into<String>) -> Self {
        Self::ConfigurationFetchFailed {
            reason: reason.into(),
        }
    }

    /// Create an invalid environment error
    pub fn invalid_environment(environment: Option<&str>) -> Self {
        Self::InvalidEnvironment {
            environment: environment.map(str::to_string),
        }
    }

    /// Wrap a transport failure, keeping whatever message it already carries
    pub fn tokenization_failed(cause: TransportError) -> Self {
        let message = cause.message.clone();
        Self::TokenizationFailed { cause, message }
    }

    /// Coarse classification of this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FeatureDisabled | Self::MissingClientId => ErrorCode::Disabled,
            Self::InvalidRequestType => ErrorCode::Integration,
            Self::UserCanceled => ErrorCode::Canceled,
            Self::Config { .. } => ErrorCode::InvalidRequest,
            _ => ErrorCode::Unknown,
        }
    }

    /// User-facing message attached to the error, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::TokenizationFailed { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Remediation hint for merchant-facing errors
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::FeatureDisabled => {
                Some("Enable PayPal for this merchant in the Braintree Control Panel")
            }
            _ => None,
        }
    }

    /// Whether the error came from the network rather than the payer or merchant
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::TokenizationFailed { .. } | Self::ConfigurationFetchFailed { .. }
        )
    }
}
