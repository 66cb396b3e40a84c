use std::fmt;

use crate::error::CoreError;

/// Which half of the `{service}/{endpoint}` pair a [`Segment`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SegmentKind {
    /// The target microservice (e.g. `posts`).
    Service,
    /// The route within the service (e.g. `query`).
    Endpoint,
}

impl SegmentKind {
    /// Field name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Endpoint => "endpoint",
        }
    }
}

/// A single non-empty URL path segment.
///
/// Segments are inserted into the target URL without escaping, so anything
/// that would change the URL structure is rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Segment(String);

impl Segment {
    /// Creates a `Segment` for the given position.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidSegment`] if `value` is empty or contains
    /// `/`, `\`, `?`, `#`, `%`, whitespace or control characters, or is a
    /// `.`/`..` dot segment.
    pub fn new(kind: SegmentKind, value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        let reason = if value.is_empty() {
            Some("must not be empty".to_owned())
        } else if value == "." || value == ".." {
            Some("must not be a dot segment".to_owned())
        } else {
            value
                .chars()
                .find(|c| {
                    matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
                })
                .map(|c| format!("contains forbidden character {c:?}"))
        };

        match reason {
            Some(reason) => Err(CoreError::InvalidSegment {
                field: kind.as_str(),
                value,
                reason,
            }),
            None => Ok(Self(value)),
        }
    }

    /// Returns the segment string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
