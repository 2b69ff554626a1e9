//! Risk correlation context

/// Read-only view of the risk-data collector's state for one tokenization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskContext {
    /// Correlation id of the current risk assessment session
    pub correlation_id: Option<String>,
}

impl RiskContext {
    /// Create a context carrying a correlation id
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
        }
    }

    /// A context with no correlation id
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pick the correlation id for a request; the request's own id wins
    pub fn resolve<'a>(&'a self, request_correlation_id: Option<&'a str>) -> Option<&'a str> {
        request_correlation_id
            .filter(|id| !id.is_empty())
            .or_else(|| self.correlation_id.as_deref().filter(|id| !id.is_empty()))
    }
}
