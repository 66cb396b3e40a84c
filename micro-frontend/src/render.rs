//! Plain-text rendering of the post list.

use std::fmt::Write as _;

use micro_core::Post;

use crate::view::ViewState;

/// Render `posts` for the given lifecycle state.
///
/// A failed fetch renders differently from an empty or absent list.
#[must_use]
pub fn render(state: &ViewState, posts: Option<&[Post]>) -> String {
    match state {
        ViewState::Idle | ViewState::Loading => "Loading posts...\n".to_owned(),
        ViewState::Failed { reason } => format!("Failed to load posts: {reason}\n"),
        ViewState::Cancelled => "Post list closed before loading finished.\n".to_owned(),
        ViewState::Loaded => match posts {
            Some(posts) if !posts.is_empty() => render_posts(posts),
            _ => "No posts.\n".to_owned(),
        },
    }
}

fn render_posts(posts: &[Post]) -> String {
    let mut out = String::new();
    for post in posts {
        let title = if post.title.is_empty() { "(untitled)" } else { &post.title };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{title}");
        if !post.slug.is_empty() {
            let _ = writeln!(out, "  /{}", post.slug);
        }
        if !post.tags.is_empty() {
            let _ = writeln!(out, "  tags: {}", post.tags.join(", "));
        }
    }
    out
}
