//! Lifecycle analytics for the tokenization flow
//!
//! Events are fire-and-forget: reporting never fails, never blocks on I/O and
//! never changes what the pipeline returns. Sinks that talk to the network are
//! expected to hand the work off (see
//! [`HttpApiClient`](crate::api_client::HttpApiClient)).

use std::fmt;
use std::sync::{Arc, Mutex};

/// Stage transitions reported during tokenization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizeEvent {
    VaultStarted,
    CheckoutStarted,
    Succeeded,
    Failed,
    BrowserCanceled,
    NetworkFailed,
    BrowserSwitchConnectionLost,
    BrowserPresentationStarted,
    BrowserPresentationSucceeded,
    BrowserPresentationFailed,
    AuthSessionBrowserCanceled,
    AuthSessionAlertCanceled,
    /// PayPal is disabled in the merchant configuration
    PreflightDisabled,
}

impl TokenizeEvent {
    /// Event identifier sent to the analytics transport
    pub fn name(&self) -> &'static str {
        match self {
            TokenizeEvent::VaultStarted => "paypal:vault-tokenize:started",
            TokenizeEvent::CheckoutStarted => "paypal:checkout-tokenize:started",
            TokenizeEvent::Succeeded => "paypal:tokenize:succeeded",
            TokenizeEvent::Failed => "paypal:tokenize:failed",
            TokenizeEvent::BrowserCanceled => "paypal:tokenize:browser-login:canceled",
            TokenizeEvent::NetworkFailed => "paypal:tokenize:network-connection:failed",
            TokenizeEvent::BrowserSwitchConnectionLost => {
                "paypal:tokenize:browser-switch-network-connection:failed"
            }
            TokenizeEvent::BrowserPresentationStarted => {
                "paypal:tokenize:browser-presentation:started"
            }
            TokenizeEvent::BrowserPresentationSucceeded => {
                "paypal:tokenize:browser-presentation:succeeded"
            }
            TokenizeEvent::BrowserPresentationFailed => {
                "paypal:tokenize:browser-presentation:failed"
            }
            TokenizeEvent::AuthSessionBrowserCanceled => {
                "paypal:tokenize:authsession-browser:canceled"
            }
            TokenizeEvent::AuthSessionAlertCanceled => "paypal:tokenize:authsession-alert:canceled",
            TokenizeEvent::PreflightDisabled => "ios.paypal-otc.preflight.disabled",
        }
    }

    /// Whether this event closes a tokenization attempt
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TokenizeEvent::Succeeded
                | TokenizeEvent::Failed
                | TokenizeEvent::BrowserCanceled
                | TokenizeEvent::NetworkFailed
                | TokenizeEvent::BrowserSwitchConnectionLost
                | TokenizeEvent::PreflightDisabled
        )
    }
}

impl fmt::Display for TokenizeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives analytics event identifiers
pub trait AnalyticsSink: Send + Sync {
    /// Record an event; must return without waiting on I/O
    fn send_event(&self, name: &str);
}

/// Sink that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn send_event(&self, name: &str) {
        tracing::debug!(event = name, "analytics event");
    }
}

/// Sink that keeps every event in memory, in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far
    pub fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsSink for RecordingSink {
    fn send_event(&self, name: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push(name.to_string());
        }
    }
}

/// Reports pipeline stage transitions to an [`AnalyticsSink`]
#[derive(Clone)]
pub struct EventReporter {
    sink: Arc<dyn AnalyticsSink>,
}

impl fmt::Debug for EventReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventReporter")
            .field("sink", &"<sink>")
            .finish()
    }
}

impl EventReporter {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    /// Report a stage transition
    pub fn report(&self, event: TokenizeEvent) {
        if event.is_terminal() {
            tracing::info!(event = event.name(), "tokenization finished");
        } else {
            tracing::debug!(event = event.name(), "tokenization stage");
        }
        self.sink.send_event(event.name());
    }
}

impl Default for EventReporter {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(
            TokenizeEvent::VaultStarted.name(),
            "paypal:vault-tokenize:started"
        );
        assert_eq!(
            TokenizeEvent::CheckoutStarted.to_string(),
            "paypal:checkout-tokenize:started"
        );
        assert_eq!(
            TokenizeEvent::BrowserCanceled.name(),
            "paypal:tokenize:browser-login:canceled"
        );
        assert!(TokenizeEvent::Failed.is_terminal());
        assert!(!TokenizeEvent::BrowserPresentationStarted.is_terminal());
    }

    #[test]
    fn test_reporter_forwards_in_order() {
        let sink = Arc::new(RecordingSink::new());
        let reporter = EventReporter::new(sink.clone());

        reporter.report(TokenizeEvent::CheckoutStarted);
        reporter.report(TokenizeEvent::Succeeded);

        assert_eq!(
            sink.events(),
            vec![
                "paypal:checkout-tokenize:started".to_string(),
                "paypal:tokenize:succeeded".to_string()
            ]
        );
    }
}
