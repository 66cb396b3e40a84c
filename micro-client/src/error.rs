//! Error types for the client crate.

use http::StatusCode;
use url::Url;

/// Errors that can occur while calling the micro registry.
///
/// The gateway never retries or reclassifies these; they reach the caller
/// exactly as produced.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Invalid address, namespace, segment or URL.
    #[error(transparent)]
    Core(#[from] micro_core::CoreError),

    /// An environment variable held an unusable value.
    #[error("invalid configuration {key}: {reason}")]
    Config { key: &'static str, reason: String },

    /// Connection, DNS, TLS or timeout failure before a response arrived.
    #[error("transport error calling {url}: {reason}")]
    Transport { url: Url, reason: String },

    /// The registry answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: StatusCode,
        url: Url,
        body: String,
    },

    /// The response body is not valid JSON or does not match the schema.
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status carried by the error, if the registry responded at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
