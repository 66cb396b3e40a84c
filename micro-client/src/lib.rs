//! HTTP gateway to a namespace-scoped micro service registry.
//!
//! Issues `GET {address}/{service}/{endpoint}` with a `Micro-Namespace`
//! header and decodes the JSON body, untyped or into a schema.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod net;
pub mod transport;

pub use config::MicroConfig;
pub use error::ClientError;
pub use gateway::{MicroService, NAMESPACE_HEADER};
pub use net::ReqwestTransport;
pub use transport::{OutboundRequest, RawResponse, Transport};

/// Alias used by consumers that think of the gateway by its role.
pub type HttpGateway<T = ReqwestTransport> = MicroService<T>;
