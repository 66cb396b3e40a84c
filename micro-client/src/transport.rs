//! Transport abstraction trait.
//!
//! Separates request construction from the network so the gateway can be
//! driven by reqwest in production and by in-process fakes in tests.

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

use crate::ClientError;

/// A fully built request, ready to hand to a [`Transport`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct OutboundRequest {
    /// HTTP method. The gateway only issues `GET`.
    pub method: Method,

    /// Absolute target URL including any query string.
    pub url: Url,

    /// Request headers.
    pub headers: HeaderMap,
}

impl OutboundRequest {
    /// Create a request.
    #[must_use]
    pub fn new(method: Method, url: Url, headers: HeaderMap) -> Self {
        Self { method, url, headers }
    }
}

/// A fully buffered HTTP response.
///
/// Fields reflect the response as received; nothing is parsed here.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RawResponse {
    /// Final URL of the response (after redirects, if any).
    pub url: Url,

    /// HTTP status code.
    pub status: StatusCode,

    /// Response headers.
    pub headers: HeaderMap,

    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a response.
    #[must_use]
    pub fn new(url: Url, status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { url, status, headers, body }
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request and buffers the response.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Cancel Safety
/// Dropping the returned future abandons the request; no state is kept
/// between calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the buffered response, whatever its status.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] if no response could be obtained.
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ClientError>;
}
