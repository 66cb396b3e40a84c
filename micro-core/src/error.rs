/// Errors produced by the `micro-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The registry address is not an absolute `http`/`https` URL.
    #[error("invalid service address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The namespace is empty or cannot be sent as a header value.
    #[error("invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    /// A service or endpoint path segment failed validation.
    #[error("invalid {field} segment '{value}': {reason}")]
    InvalidSegment {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The joined target URL could not be parsed.
    #[error("invalid target url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A response body did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
