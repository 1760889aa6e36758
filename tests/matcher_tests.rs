use std::collections::HashMap;

use conneg::{ConnegConfig, ConnegMatcher, NullSink};

mod common;
use common::{init_tracing, request};

fn matcher(config: ConnegConfig) -> ConnegMatcher {
    ConnegMatcher::new(config).expect("valid test configuration")
}

#[test]
fn test_axis_without_offers_always_matches() {
    init_tracing();
    let m = matcher(ConnegConfig {
        match_encodings: vec!["gzip".into()],
        ..Default::default()
    });
    // hostile content on unconfigured axes is never even parsed
    let req = request(
        &[
            ("accept", "not a header !!!"),
            ("accept-charset", ";;;"),
            ("accept-encoding", "gzip"),
        ],
        None,
    );
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert!(vars.is_empty());
}

#[test]
fn test_missing_header_on_configured_axis_is_no_match() {
    let m = matcher(ConnegConfig {
        match_charsets: vec!["utf-8".into()],
        ..Default::default()
    });
    assert!(!m.evaluate(&request(&[], None), &mut NullSink));
}

#[test]
fn test_malformed_header_downgrades_only_its_axis() {
    let m = matcher(ConnegConfig {
        match_charsets: vec!["utf-8".into()],
        match_encodings: vec!["gzip".into()],
        ..Default::default()
    });
    // charset header carries trailing garbage: zero usable candidates
    let req = request(
        &[
            ("accept-charset", "utf-8; ;"),
            ("accept-encoding", "gzip"),
        ],
        None,
    );
    assert!(!m.evaluate(&req, &mut NullSink));

    // the encoding axis was unaffected by its sibling's failure
    let req = request(&[("accept-encoding", "gzip")], None);
    let m = matcher(ConnegConfig {
        match_encodings: vec!["gzip".into()],
        ..Default::default()
    });
    assert!(m.evaluate(&req, &mut NullSink));
}

#[test]
fn test_later_header_instance_wins() {
    let m = matcher(ConnegConfig {
        match_encodings: vec!["gzip".into(), "br".into()],
        var_encoding: Some("enc".into()),
        ..Default::default()
    });
    let req = request(
        &[("accept-encoding", "gzip"), ("accept-encoding", "br")],
        None,
    );
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert_eq!(vars.get("conneg_enc").map(String::as_str), Some("br"));

    // an instance that fails to parse contributes nothing and does not
    // clobber an earlier instance's match
    let req = request(
        &[("accept-encoding", "gzip"), ("accept-encoding", "br;; ")],
        None,
    );
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert_eq!(vars.get("conneg_enc").map(String::as_str), Some("gzip"));
}

#[test]
fn test_override_forces_offer_and_skips_headers() {
    let m = matcher(ConnegConfig {
        match_types: vec!["text/html".into(), "application/rdf+xml".into()],
        force_type_query_string: Some("format".into()),
        var_type: Some("type".into()),
        ..Default::default()
    });
    // the Accept header prefers text/html, but the override wins
    let req = request(&[("accept", "text/html")], Some("format=rdf"));
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert_eq!(
        vars.get("conneg_type").map(String::as_str),
        Some("application/rdf+xml")
    );
}

#[test]
fn test_override_vetoes_even_when_headers_would_match() {
    let m = matcher(ConnegConfig {
        match_types: vec!["text/html".into()],
        force_type_query_string: Some("format".into()),
        ..Default::default()
    });
    let req = request(&[("accept", "text/html")], Some("format=pdf"));
    assert!(!m.evaluate(&req, &mut NullSink));
}

#[test]
fn test_absent_override_key_falls_through_to_headers() {
    let m = matcher(ConnegConfig {
        match_types: vec!["text/html".into()],
        force_type_query_string: Some("format".into()),
        ..Default::default()
    });
    let req = request(&[("accept", "text/html")], Some("page=2"));
    assert!(m.evaluate(&req, &mut NullSink));
}

#[test]
fn test_unparseable_query_falls_through_to_headers() {
    let m = matcher(ConnegConfig {
        match_types: vec!["text/html".into()],
        force_type_query_string: Some("format".into()),
        ..Default::default()
    });
    // invalid percent escape drops the whole query; the override key is
    // treated as absent, not as a veto
    let req = request(&[("accept", "text/html")], Some("format=%zz"));
    assert!(m.evaluate(&req, &mut NullSink));
}

#[test]
fn test_override_uses_first_query_value() {
    let m = matcher(ConnegConfig {
        match_types: vec!["text/html".into(), "application/pdf".into()],
        force_type_query_string: Some("format".into()),
        var_type: Some("type".into()),
        ..Default::default()
    });
    let req = request(&[], Some("format=pdf&format=html"));
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert_eq!(
        vars.get("conneg_type").map(String::as_str),
        Some("application/pdf")
    );
}

#[test]
fn test_header_path_publishes_winning_offer() {
    let m = matcher(ConnegConfig {
        match_encodings: vec!["gzip".into(), "*".into()],
        var_encoding: Some("encoding".into()),
        ..Default::default()
    });
    let req = request(&[("accept-encoding", "gzip;q=0.5, *;q=0.9")], None);
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert_eq!(vars.get("conneg_encoding").map(String::as_str), Some("*"));
}

#[test]
fn test_publication_happens_even_when_another_axis_rejects() {
    let m = matcher(ConnegConfig {
        match_types: vec!["text/html".into()],
        match_charsets: vec!["utf-8".into()],
        var_type: Some("type".into()),
        ..Default::default()
    });
    // type matches and publishes; charset has no header and rejects
    let req = request(&[("accept", "text/html")], None);
    let mut vars = HashMap::new();
    assert!(!m.evaluate(&req, &mut vars));
    assert_eq!(vars.get("conneg_type").map(String::as_str), Some("text/html"));
}

#[test]
fn test_published_value_preserves_configured_case() {
    let m = matcher(ConnegConfig {
        match_charsets: vec!["UTF-8".into()],
        var_charset: Some("cs".into()),
        ..Default::default()
    });
    let req = request(&[("accept-charset", "utf-8")], None);
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert_eq!(vars.get("conneg_cs").map(String::as_str), Some("UTF-8"));
}

#[test]
fn test_language_axis_negotiates_tags() {
    init_tracing();
    let m = matcher(ConnegConfig {
        match_languages: vec!["de".into(), "en".into()],
        var_language: Some("lang".into()),
        ..Default::default()
    });
    let req = request(&[("accept-language", "de-CH, en;q=0.5")], None);
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert_eq!(
        vars.get("conneg_lang").map(String::as_str),
        Some("German/Deutsch")
    );
}

#[test]
fn test_language_axis_rejects_on_fallback() {
    let m = matcher(ConnegConfig {
        match_languages: vec!["de".into(), "en".into()],
        ..Default::default()
    });
    let req = request(&[("accept-language", "fr-FR")], None);
    assert!(!m.evaluate(&req, &mut NullSink));
}

#[test]
fn test_language_override_publishes_configured_tag() {
    let m = matcher(ConnegConfig {
        match_languages: vec!["de".into(), "en".into()],
        force_language_query_string: Some("lang".into()),
        var_language: Some("lang".into()),
        ..Default::default()
    });
    // the override path publishes the configured tag, not the display label
    let req = request(&[("accept-language", "fr-FR")], Some("lang=de"));
    let mut vars = HashMap::new();
    assert!(m.evaluate(&req, &mut vars));
    assert_eq!(vars.get("conneg_lang").map(String::as_str), Some("de"));
}

#[test]
fn test_end_to_end_override_and_language_veto() {
    init_tracing();
    // type axis is forced to application/rdf+xml by ?format=rdf; the
    // language axis negotiates fr-FR against [de, en], falls back to und,
    // and sinks the overall verdict
    let m = matcher(ConnegConfig {
        match_types: vec![
            "application/rdf+xml".into(),
            "application/tei+xml".into(),
        ],
        match_languages: vec!["de".into(), "en".into()],
        force_type_query_string: Some("format".into()),
        var_type: Some("type".into()),
        ..Default::default()
    });
    let req = request(
        &[
            ("accept", "application/tei+xml"),
            ("accept-language", "fr-FR"),
        ],
        Some("format=rdf&lang=de"),
    );
    let mut vars = HashMap::new();
    assert!(!m.evaluate(&req, &mut vars));
    // the type axis still published its forced value
    assert_eq!(
        vars.get("conneg_type").map(String::as_str),
        Some("application/rdf+xml")
    );
}

#[test]
fn test_alias_shorthands() {
    let m = matcher(ConnegConfig {
        match_types: vec!["text/html".into(), "application/tei+xml".into()],
        force_type_query_string: Some("format".into()),
        var_type: Some("type".into()),
        ..Default::default()
    });
    for (value, expected) in [
        ("html", "text/html"),
        ("htm", "text/html"),
        ("tei", "application/tei+xml"),
        ("xml", "application/tei+xml"),
    ] {
        let req = request(&[], Some(&format!("format={value}")));
        let mut vars = HashMap::new();
        assert!(m.evaluate(&req, &mut vars), "format={value}");
        assert_eq!(
            vars.get("conneg_type").map(String::as_str),
            Some(expected),
            "format={value}"
        );
    }
}
