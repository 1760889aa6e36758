//! Request abstraction consumed by the matcher.
//!
//! The matcher only ever needs two things from a request: repeatable header
//! values by case-insensitive name, and query parameters with first-value
//! semantics. [`RequestParts`] captures exactly that, built from `http`
//! types so hosts on any server stack can feed it.

use http::HeaderMap;
use tracing::debug;

/// The negotiation-relevant slice of an incoming request.
///
/// Construction extracts everything up front; evaluation afterwards is pure
/// reads over immutable data.
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    headers: HeaderMap,
    /// Query pairs in arrival order. Kept as a list, not a map, so repeated
    /// keys preserve first-value semantics.
    query: Vec<(String, String)>,
}

impl RequestParts {
    /// Build from a header map and the raw query-string portion of the URI
    /// (without the leading `?`).
    ///
    /// A query string with invalid percent-encoding is logged and dropped
    /// wholesale; the matcher then sees every override key as absent and
    /// falls through to header negotiation.
    #[must_use]
    pub fn new(headers: HeaderMap, raw_query: Option<&str>) -> Self {
        let query = raw_query.map(parse_query).unwrap_or_default();
        Self { headers, query }
    }

    /// Build from any `http::Request`, ignoring the body.
    #[must_use]
    pub fn from_request<B>(request: &http::Request<B>) -> Self {
        Self::new(request.headers().clone(), request.uri().query())
    }

    /// All values of a header, in arrival order. Non-UTF-8 values are
    /// skipped.
    pub fn header_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
    }

    /// First value of a query parameter, if present.
    #[must_use]
    pub fn first_query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a raw query string into ordered key/value pairs.
///
/// Returns an empty list when the query contains an invalid percent escape,
/// mirroring a form-parse failure: the whole query is unusable, not just the
/// offending pair.
fn parse_query(raw: &str) -> Vec<(String, String)> {
    if !valid_percent_encoding(raw) {
        debug!(query = %raw, "Problem parsing query string");
        return Vec::new();
    }
    url::form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// every '%' must introduce exactly two hex digits
fn valid_percent_encoding(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
