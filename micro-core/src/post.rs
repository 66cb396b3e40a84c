use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::call::QueryParams;
use crate::error::CoreError;

/// A single blog post as returned by the posts service.
///
/// Every known field is optional on the wire and an explicit `null` reads as
/// the field's default; anything else the service sends is kept in
/// [`Post::extra`] untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Post {
    /// Unique identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Display title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// URL-friendly form of the title.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Body text.
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    /// Free-form tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Creation time, unix seconds. Accepts a JSON number or a numeric
    /// string (the protobuf JSON form of an int64); any other string reads
    /// as unset.
    #[serde(
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<i64>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Create a post with the given identity fields.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            ..Self::default()
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Seconds(i64),
    Text(String),
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Timestamp>::deserialize(deserializer)? {
        Some(Timestamp::Seconds(secs)) => Some(secs),
        Some(Timestamp::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// Request accepted by `posts/query`.
///
/// Lookups by `slug` take precedence over `id`; with neither set the service
/// lists the newest posts, paged by `offset` and `limit` (the service
/// defaults to 20 per page).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PostQuery {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

impl PostQuery {
    /// A query that lists the newest posts with server defaults.
    #[must_use]
    pub fn latest() -> Self {
        Self::default()
    }

    /// Look up a single post by slug.
    #[must_use]
    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Look up a single post by id.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Set the page window.
    #[must_use]
    pub fn page(mut self, offset: u64, limit: u32) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    /// Convert to query parameters, emitting only the fields that are set.
    ///
    /// Returns `None` for an empty query so the request carries no query
    /// string at all.
    #[must_use]
    pub fn into_params(self) -> Option<QueryParams> {
        let mut params = QueryParams::new();
        if let Some(id) = self.id {
            params.insert("id".to_owned(), id);
        }
        if let Some(slug) = self.slug {
            params.insert("slug".to_owned(), slug);
        }
        if let Some(offset) = self.offset {
            params.insert("offset".to_owned(), offset.to_string());
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_owned(), limit.to_string());
        }
        (!params.is_empty()).then_some(params)
    }
}

/// Decoded body of a `posts/query` response.
///
/// A body without a `posts` key decodes to `posts: None`; this is treated as
/// "no posts" rather than an error. A `posts` value of the wrong shape is a
/// decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PostsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
}

impl PostsResponse {
    /// Decode from an already-parsed JSON value.
    ///
    /// # Errors
    /// Returns [`CoreError::Decode`] if the `posts` field is present but is
    /// not an array of objects.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decode from raw body bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Decode`] on malformed JSON or a mismatched shape.
    pub fn from_slice(body: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(body)?)
    }
}
