//! Sample post records demonstrating the schema.
//!
//! Used by tests across the workspace and by fake registries standing in
//! for the posts service.

use serde_json::{json, Value};

use crate::post::Post;

/// Returns the three canonical sample posts, newest first.
#[must_use]
pub fn sample_posts() -> Vec<Post> {
    let mut hello = Post::new("7f3a", "Hello, micro", "hello-micro");
    hello.content = "First post served through the registry.".to_owned();
    hello.tags = vec!["intro".to_owned()];
    hello.created = Some(1_700_000_300);

    let namespaces = {
        let mut p = Post::new("51c2", "Namespaces in practice", "namespaces-in-practice");
        p.content = "Every call carries a Micro-Namespace header.".to_owned();
        p.tags = vec!["routing".to_owned(), "tenancy".to_owned()];
        p.created = Some(1_700_000_200);
        p
    };

    let mut drafts = Post::new("0be9", "Drafts", "drafts");
    drafts.created = Some(1_700_000_100);

    vec![hello, namespaces, drafts]
}

/// The `posts/query` response body for [`sample_posts`].
///
/// # Panics
/// Never panics: `Post` serialization has no fallible fields.
#[must_use]
pub fn sample_query_body() -> Value {
    #[expect(clippy::expect_used, reason = "Post always serializes")]
    let posts = serde_json::to_value(sample_posts()).expect("sample posts serialize");
    json!({ "posts": posts })
}
