use http::header::{HeaderMap, HeaderName, HeaderValue};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for test output once; later calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a request from repeatable header pairs and an optional raw query.
#[allow(dead_code)]
pub fn request(headers: &[(&str, &str)], query: Option<&str>) -> conneg::RequestParts {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.append(
            name.parse::<HeaderName>().expect("valid header name"),
            HeaderValue::from_str(value).expect("valid header value"),
        );
    }
    conneg::RequestParts::new(map, query)
}
