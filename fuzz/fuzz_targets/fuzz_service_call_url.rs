//! Fuzz target: `{address}/{service}/{endpoint}` construction.
//!
//! Any pair of strings accepted as segments must produce a URL whose path
//! is exactly those two segments, percent-encoded as path segments.

#![no_main]

use libfuzzer_sys::fuzz_target;
use micro_core::{ServiceAddress, ServiceCall};
use url::Url;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some((service, endpoint)) = text.split_once('\n') else {
        return;
    };
    let Ok(call) = ServiceCall::new(service, endpoint) else {
        return;
    };

    let address = ServiceAddress::new("http://localhost:8080").expect("static address is valid");
    let url = call.target_url(&address).expect("valid segments must join into a URL");
    assert!(url.query().is_none(), "no params must mean no query string");
    assert_eq!(url.host_str(), Some("localhost"), "segments must not change the host");

    let mut expected = Url::parse("http://localhost:8080").expect("static url is valid");
    expected
        .path_segments_mut()
        .expect("http urls have a path")
        .clear()
        .push(service)
        .push(endpoint);
    assert_eq!(url.path(), expected.path(), "path must be exactly the two segments");
});
