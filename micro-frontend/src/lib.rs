//! Post list view over the micro registry gateway.
//!
//! The view fetches `posts/query` once when initialized, keeps the result
//! for rendering, and discards late responses after teardown.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod render;
pub mod view;

pub use error::ViewError;
pub use view::{InflightLoad, PostListView, ViewState};
