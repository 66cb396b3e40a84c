//! Core types for the micro posts front-end.
//!
//! Defines the registry address and namespace, the `{service}/{endpoint}`
//! call model with its query parameters, and the post records returned by
//! the posts service.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod address;
pub mod call;
pub mod error;
pub mod post;
pub mod samples;
pub mod segment;

pub use address::{Namespace, ServiceAddress};
pub use call::{QueryParams, ServiceCall};
pub use error::CoreError;
pub use post::{Post, PostQuery, PostsResponse};
pub use segment::{Segment, SegmentKind};
