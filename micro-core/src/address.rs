use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;

/// Base URL of the remote micro registry (e.g. `https://api.example.com`).
///
/// Validated once at construction and kept verbatim. The target URL of a call
/// is built by parsing `{address}/{service}/{endpoint}`, so it comes out in
/// normalized form: lowercase host, default port dropped, non-ASCII
/// characters percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[non_exhaustive]
pub struct ServiceAddress(String);

impl ServiceAddress {
    /// Creates a `ServiceAddress` from an absolute `http` or `https` URL.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidAddress`] if the value does not parse as a
    /// URL, uses another scheme, or carries a query string or fragment.
    pub fn new(address: impl Into<String>) -> Result<Self, CoreError> {
        let address = address.into();
        let invalid = |reason: String| CoreError::InvalidAddress {
            address: address.clone(),
            reason,
        };

        let parsed = Url::parse(&address).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment".to_owned()));
        }
        if address.ends_with('/') {
            return Err(invalid("must not end with '/'".to_owned()));
        }
        Ok(Self(address))
    }

    /// Returns the address exactly as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ServiceAddress {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceAddress> for String {
    fn from(address: ServiceAddress) -> Self {
        address.0
    }
}

/// Logical tenant sent as the `Micro-Namespace` header on every call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[non_exhaustive]
pub struct Namespace(String);

impl Namespace {
    /// Creates a `Namespace` from any string-like value.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidNamespace`] if the value is empty or holds
    /// characters that are not allowed in an HTTP header value.
    pub fn new(namespace: impl Into<String>) -> Result<Self, CoreError> {
        let namespace = namespace.into();
        if namespace.trim().is_empty() {
            return Err(CoreError::InvalidNamespace {
                namespace,
                reason: "must not be empty".to_owned(),
            });
        }
        if namespace.chars().any(|c| c.is_control() || !c.is_ascii()) {
            return Err(CoreError::InvalidNamespace {
                namespace,
                reason: "must be printable ASCII".to_owned(),
            });
        }
        Ok(Self(namespace))
    }

    /// Returns the namespace string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Namespace {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(namespace: Namespace) -> Self {
        namespace.0
    }
}
