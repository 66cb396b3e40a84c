//! Production [`Transport`] built on reqwest.

use std::time::Duration;

use async_trait::async_trait;

use crate::transport::{OutboundRequest, RawResponse, Transport};
use crate::ClientError;

/// Sends requests with a shared `reqwest::Client`.
///
/// The client pools connections, so one instance should be reused for the
/// lifetime of the gateway.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport, optionally bounding every request by `timeout`.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the TLS backend fails to initialise.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ClientError::Config {
            key: "http client",
            reason: e.to_string(),
        })?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ClientError> {
        let OutboundRequest { method, url, headers } = request;
        let transport_err = |e: reqwest::Error| ClientError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        };

        let res = self
            .client
            .request(method, url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(transport_err)?;

        let final_url = res.url().clone();
        let status = res.status();
        let headers = res.headers().clone();

        // Fully buffered; responses from the registry are small JSON documents.
        let body = res.bytes().await.map_err(transport_err)?.to_vec();

        Ok(RawResponse::new(final_url, status, headers, body))
    }
}
