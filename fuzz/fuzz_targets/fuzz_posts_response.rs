//! Fuzz target: decoding of `posts/query` response bodies.
//!
//! Arbitrary bytes must either decode or fail with a typed error, never
//! panic. A successful decode must serialize again.

#![no_main]

use libfuzzer_sys::fuzz_target;
use micro_core::PostsResponse;

fuzz_target!(|data: &[u8]| {
    if let Ok(resp) = PostsResponse::from_slice(data) {
        serde_json::to_vec(&resp).expect("decoded response must serialize");
    }
});
