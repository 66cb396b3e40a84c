//! Error types for the view crate.

/// Lifecycle misuse of a [`PostListView`](crate::view::PostListView).
///
/// Fetch failures are not errors at this level: they are recorded in the
/// view's [`ViewState`](crate::view::ViewState) instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViewError {
    /// `on_init` was already called on this view instance.
    #[error("view already initialized")]
    AlreadyInitialized,

    /// `on_init` was called after `on_destroy`.
    #[error("view has been destroyed")]
    Destroyed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_error_display_is_human_readable() {
        assert_eq!(ViewError::AlreadyInitialized.to_string(), "view already initialized");
        assert_eq!(ViewError::Destroyed.to_string(), "view has been destroyed");
    }
}
