use indexmap::IndexMap;
use url::Url;

use crate::address::ServiceAddress;
use crate::error::CoreError;
use crate::segment::{Segment, SegmentKind};

/// Query-string parameters, serialized in insertion order.
pub type QueryParams = IndexMap<String, String>;

/// One GET against `{address}/{service}/{endpoint}`.
///
/// Calls are transient: built, turned into a request, and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ServiceCall {
    /// The target microservice.
    pub service: Segment,
    /// The route within that service.
    pub endpoint: Segment,
    /// Optional query parameters; `None` means no query string at all.
    pub params: Option<QueryParams>,
}

impl ServiceCall {
    /// Create a call without query parameters.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidSegment`] if either segment is invalid.
    pub fn new(service: &str, endpoint: &str) -> Result<Self, CoreError> {
        Ok(Self {
            service: Segment::new(SegmentKind::Service, service)?,
            endpoint: Segment::new(SegmentKind::Endpoint, endpoint)?,
            params: None,
        })
    }

    /// Attach query parameters, replacing any previously set.
    #[must_use]
    pub fn with_params(mut self, params: Option<QueryParams>) -> Self {
        self.params = params;
        self
    }

    /// The `{service}/{endpoint}` path, without a leading slash.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.service, self.endpoint)
    }

    /// Build the absolute target URL against `address`.
    ///
    /// The result is `{address}/{service}/{endpoint}` as normalized by the
    /// URL parser (host lowercased, default port dropped, non-ASCII
    /// percent-encoded), followed by `?k=v&...` only when at least one
    /// parameter is present.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidUrl`] if the joined string fails to parse.
    pub fn target_url(&self, address: &ServiceAddress) -> Result<Url, CoreError> {
        let raw = format!("{address}/{}", self.path());
        let mut url = Url::parse(&raw).map_err(|e| CoreError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if let Some(params) = self.params.as_ref().filter(|p| !p.is_empty()) {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(s: &str) -> ServiceAddress {
        match ServiceAddress::new(s) {
            Ok(a) => a,
            Err(e) => panic!("invalid test address {s}: {e}"),
        }
    }

    fn call(service: &str, endpoint: &str) -> ServiceCall {
        match ServiceCall::new(service, endpoint) {
            Ok(c) => c,
            Err(e) => panic!("invalid test call: {e}"),
        }
    }

    #[test]
    fn target_url_without_params_has_no_query() {
        let url = match call("posts", "query").target_url(&address("https://api.example.com")) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(url.as_str(), "https://api.example.com/posts/query");
        assert!(url.query().is_none(), "no params must mean no query string");
    }

    #[test]
    fn target_url_keeps_address_path_prefix() {
        let url = match call("posts", "query").target_url(&address("http://localhost:8080/api")) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(url.as_str(), "http://localhost:8080/api/posts/query");
    }

    #[test]
    fn target_url_serializes_params_in_insertion_order() {
        let mut params = QueryParams::new();
        params.insert("slug".to_owned(), "hello-world".to_owned());
        params.insert("limit".to_owned(), "5".to_owned());
        let c = call("posts", "query").with_params(Some(params));

        let url = match c.target_url(&address("https://api.example.com")) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(url.query(), Some("slug=hello-world&limit=5"));
    }

    #[test]
    fn target_url_empty_params_behave_like_none() {
        let c = call("posts", "query").with_params(Some(QueryParams::new()));
        let url = match c.target_url(&address("https://api.example.com")) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(url.as_str(), "https://api.example.com/posts/query");
    }

    #[test]
    fn target_url_percent_encodes_param_values() {
        let mut params = QueryParams::new();
        params.insert("title".to_owned(), "a b&c".to_owned());
        let c = call("posts", "query").with_params(Some(params));
        let url = match c.target_url(&address("https://api.example.com")) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("title".to_owned(), "a b&c".to_owned())]);
    }

    #[test]
    fn target_url_is_normalized_by_the_parser() {
        let url = match call("posts", "qu\u{e9}ry").target_url(&address("http://API.example.com:80")) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(url.as_str(), "http://api.example.com/posts/qu%C3%A9ry");
    }

    #[test]
    fn new_rejects_empty_and_structural_segments() {
        assert!(ServiceCall::new("", "query").is_err());
        assert!(ServiceCall::new("posts", "").is_err());
        assert!(ServiceCall::new("posts/v2", "query").is_err());
        assert!(ServiceCall::new("posts", "query?x=1").is_err());
        assert!(ServiceCall::new("..", "query").is_err());
        assert!(ServiceCall::new("posts", "a\\b").is_err());
    }

    #[test]
    fn invalid_endpoint_error_names_the_field() {
        match ServiceCall::new("posts", "") {
            Err(CoreError::InvalidSegment { field, .. }) => assert_eq!(field, "endpoint"),
            other => panic!("expected InvalidSegment, got {other:?}"),
        }
    }

    proptest::proptest! {
        #[test]
        fn proptest_url_is_address_service_endpoint(
            service in "[a-z][a-z0-9_-]{0,15}",
            endpoint in "[A-Za-z][A-Za-z0-9_.-]{0,15}",
        ) {
            let base = address("https://api.example.com");
            let c = ServiceCall::new(&service, &endpoint);
            proptest::prop_assert!(c.is_ok());
            if let Ok(c) = c {
                let url = c.target_url(&base);
                proptest::prop_assert!(url.is_ok());
                if let Ok(url) = url {
                    proptest::prop_assert_eq!(
                        url.as_str(),
                        format!("https://api.example.com/{service}/{endpoint}")
                    );
                }
            }
        }

        #[test]
        fn proptest_params_round_trip_through_query(
            params in proptest::collection::btree_map("[a-z]{1,8}", "[ -~]{0,12}", 1..5usize),
        ) {
            let base = address("http://localhost:8080");
            let query: QueryParams = params.clone().into_iter().collect();
            let c = call("posts", "query").with_params(Some(query));
            let url = c.target_url(&base);
            proptest::prop_assert!(url.is_ok());
            if let Ok(url) = url {
                proptest::prop_assert_eq!(url.path(), "/posts/query");
                let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
                let expected: Vec<(String, String)> = params.into_iter().collect();
                proptest::prop_assert_eq!(decoded, expected);
            }
        }
    }
}
