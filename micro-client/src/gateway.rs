//! The registry gateway: builds `{address}/{service}/{endpoint}` requests,
//! scopes them to a namespace, and decodes JSON responses.

use http::{HeaderMap, HeaderValue, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use micro_core::{Namespace, PostQuery, PostsResponse, QueryParams, ServiceAddress, ServiceCall};

use crate::net::ReqwestTransport;
use crate::transport::{OutboundRequest, RawResponse, Transport};
use crate::{ClientError, MicroConfig};

/// Header scoping each call to a registry namespace (`Micro-Namespace`).
///
/// Header names are case-insensitive; `http` stores them lowercased.
pub const NAMESPACE_HEADER: &str = "micro-namespace";

/// HTTP gateway to a path-addressed micro registry.
///
/// Holds the immutable [`MicroConfig`] and a [`Transport`]. Every call is an
/// independent GET: nothing is cached, deduplicated or retried.
#[derive(Debug)]
pub struct MicroService<T: Transport = ReqwestTransport> {
    config: MicroConfig,
    transport: T,
}

impl MicroService<ReqwestTransport> {
    /// Create a gateway backed by reqwest, honouring `config.timeout`.
    ///
    /// # Errors
    /// Propagates errors from [`ReqwestTransport::new`].
    pub fn connect(config: MicroConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> MicroService<T> {
    /// Create a gateway over the given transport.
    #[must_use]
    pub fn new(config: MicroConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The configuration this gateway was built with.
    #[must_use]
    pub fn config(&self) -> &MicroConfig {
        &self.config
    }

    /// Base URL every call is made against.
    #[must_use]
    pub fn address(&self) -> &ServiceAddress {
        &self.config.address
    }

    /// Namespace sent with every call.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.config.namespace
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `call` without sending it.
    ///
    /// # Errors
    /// Returns [`ClientError::Core`] if the target URL cannot be built.
    pub fn request(&self, call: &ServiceCall) -> Result<OutboundRequest, ClientError> {
        let url = call.target_url(&self.config.address)?;

        let mut headers = HeaderMap::new();
        // Namespace is validated as printable ASCII at construction.
        let value = HeaderValue::from_str(self.config.namespace.as_str()).map_err(|e| {
            micro_core::CoreError::InvalidNamespace {
                namespace: self.config.namespace.to_string(),
                reason: e.to_string(),
            }
        })?;
        headers.insert(NAMESPACE_HEADER, value);

        Ok(OutboundRequest::new(Method::GET, url, headers))
    }

    /// `GET {address}/{service}/{endpoint}` and parse the body as JSON.
    ///
    /// `params`, when given and non-empty, become the query string.
    ///
    /// # Errors
    /// - [`ClientError::Core`] for an invalid `service` or `endpoint`
    /// - [`ClientError::Transport`] if the request could not be completed
    /// - [`ClientError::Status`] for any non-2xx response
    /// - [`ClientError::Decode`] if the body is not valid JSON
    pub async fn get(
        &self,
        service: &str,
        endpoint: &str,
        params: Option<QueryParams>,
    ) -> Result<Value, ClientError> {
        let call = ServiceCall::new(service, endpoint)?.with_params(params);
        self.call_json(&call).await
    }

    /// Issue `call` and decode the body into `R`.
    ///
    /// # Errors
    /// Same as [`MicroService::get`], with [`ClientError::Decode`] also
    /// covering a body that does not match `R`.
    pub async fn call_json<R: DeserializeOwned>(&self, call: &ServiceCall) -> Result<R, ClientError> {
        let response = self.send(call).await?;
        serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
            url: response.url,
            source,
        })
    }

    /// Query the posts service.
    ///
    /// A response without a `posts` key yields `posts: None`.
    ///
    /// # Errors
    /// Same as [`MicroService::call_json`].
    pub async fn query_posts(&self, query: PostQuery) -> Result<PostsResponse, ClientError> {
        let call = ServiceCall::new("posts", "query")?.with_params(query.into_params());
        self.call_json(&call).await
    }

    async fn send(&self, call: &ServiceCall) -> Result<RawResponse, ClientError> {
        let request = self.request(call)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            namespace = %self.config.namespace,
            "calling micro registry"
        );

        let response = self.transport.send(request).await?;

        if !response.status.is_success() {
            tracing::debug!(
                status = %response.status,
                url = %response.url,
                "registry returned non-success status"
            );
            return Err(ClientError::Status {
                status: response.status,
                body: response.text_lossy(),
                url: response.url,
            });
        }

        tracing::debug!(
            status = %response.status,
            bytes = response.body.len(),
            "registry response received"
        );
        Ok(response)
    }
}
