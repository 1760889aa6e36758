//! Shorthand values accepted by override query parameters.
//!
//! When an override key is configured (say `force_type_query_string:
//! format`), a request URI ending in `?format=tei` resolves to
//! `application/tei+xml` and then matches or not based on whether that type
//! is among the axis's offers. The table is a process-wide constant; it is
//! never mutated at runtime.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static ALIASES: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("text/html", &["html", "htm"][..]),
        ("application/rdf+xml", &["rdf"][..]),
        ("application/tei+xml", &["tei", "xml"][..]),
        ("application/pdf", &["pdf"][..]),
    ])
});

/// Aliases registered for a canonical offer string, if any.
pub(crate) fn for_offer(offer: &str) -> Option<&'static [&'static str]> {
    ALIASES.get(offer).copied()
}
