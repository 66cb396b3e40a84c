//! Gateway configuration.

use std::time::Duration;

use micro_core::{Namespace, ServiceAddress};

use crate::ClientError;

/// Environment variable holding the registry base URL.
pub const ADDRESS_ENV: &str = "MICRO_ADDRESS";
/// Environment variable holding the namespace.
pub const NAMESPACE_ENV: &str = "MICRO_NAMESPACE";
/// Environment variable holding an optional request timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "MICRO_TIMEOUT_MS";

/// Registry address used when `MICRO_ADDRESS` is unset.
pub const DEFAULT_ADDRESS: &str = "http://localhost:8080";
/// Namespace used when `MICRO_NAMESPACE` is unset.
pub const DEFAULT_NAMESPACE: &str = "micro";

/// Configuration for a [`MicroService`](crate::MicroService).
///
/// Fixed at construction; the gateway never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct MicroConfig {
    /// Base URL of the registry.
    pub address: ServiceAddress,

    /// Namespace sent as `Micro-Namespace` on every call.
    pub namespace: Namespace,

    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl MicroConfig {
    /// Create a config with no request timeout.
    #[must_use]
    pub fn new(address: ServiceAddress, namespace: Namespace) -> Self {
        Self {
            address,
            namespace,
            timeout: None,
        }
    }

    /// Set a whole-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the config from `MICRO_ADDRESS`, `MICRO_NAMESPACE` and
    /// `MICRO_TIMEOUT_MS`, falling back to local defaults.
    ///
    /// # Errors
    /// Returns [`ClientError::Core`] for an invalid address or namespace, and
    /// [`ClientError::Config`] if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    ///
    /// # Errors
    /// Same as [`MicroConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = lookup(ADDRESS_ENV).unwrap_or_else(|| DEFAULT_ADDRESS.to_owned());
        let namespace = lookup(NAMESPACE_ENV).unwrap_or_else(|| DEFAULT_NAMESPACE.to_owned());

        let mut config = Self::new(ServiceAddress::new(address)?, Namespace::new(namespace)?);

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|e| ClientError::Config {
                key: TIMEOUT_ENV,
                reason: format!("'{raw}' is not a number: {e}"),
            })?;
            if millis == 0 {
                return Err(ClientError::Config {
                    key: TIMEOUT_ENV,
                    reason: "must be greater than zero".to_owned(),
                });
            }
            config = config.with_timeout(Duration::from_millis(millis));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_defaults_when_unset() {
        let config = match MicroConfig::from_lookup(lookup_from(&[])) {
            Ok(c) => c,
            Err(e) => panic!("defaults must be valid: {e}"),
        };
        assert_eq!(config.address.as_str(), DEFAULT_ADDRESS);
        assert_eq!(config.namespace.as_str(), DEFAULT_NAMESPACE);
        assert!(config.timeout.is_none(), "no timeout unless configured");
    }

    #[test]
    fn from_lookup_reads_all_keys() {
        let config = match MicroConfig::from_lookup(lookup_from(&[
            (ADDRESS_ENV, "https://api.example.com"),
            (NAMESPACE_ENV, "default"),
            (TIMEOUT_ENV, "2500"),
        ])) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.address.as_str(), "https://api.example.com");
        assert_eq!(config.namespace.as_str(), "default");
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let result = MicroConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]));
        assert!(
            matches!(result, Err(ClientError::Config { key: TIMEOUT_ENV, .. })),
            "non-numeric timeout must be a Config error"
        );

        let zero = MicroConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "0")]));
        assert!(matches!(zero, Err(ClientError::Config { .. })), "zero timeout must be rejected");
    }

    #[test]
    fn from_lookup_rejects_bad_address() {
        let result = MicroConfig::from_lookup(lookup_from(&[(ADDRESS_ENV, "not a url")]));
        assert!(matches!(result, Err(ClientError::Core(_))));
    }
}
