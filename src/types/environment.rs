//! PayPal environment types

use super::constants::environments;

/// PayPal environment a merchant is provisioned in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// Parse a configuration environment identifier
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            environments::SANDBOX => Some(Environment::Sandbox),
            environments::PRODUCTION => Some(Environment::Production),
            _ => None,
        }
    }

    /// Get the environment identifier string
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => environments::SANDBOX,
            Environment::Production => environments::PRODUCTION,
        }
    }

    /// Numeric environment code used by the native checkout SDK
    pub fn native_code(&self) -> i32 {
        match self {
            Environment::Production => 0,
            Environment::Sandbox => 1,
        }
    }
}

/// How the configuration gate treats a configuration without an environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvironmentPolicy {
    /// A missing environment is an error
    #[default]
    Strict,
    /// A missing environment runs against sandbox
    FallbackToSandbox,
}
