use conneg::language::{display_label, LanguageNegotiator, LanguageTag, TagMatcher, UNDETERMINED};

fn candidates(offers: &[&str]) -> Vec<LanguageTag> {
    // the matcher always seeds the undetermined fallback first
    let mut tags = vec![LanguageTag::undetermined()];
    tags.extend(offers.iter().map(|o| LanguageTag::new(o)));
    tags
}

#[test]
fn test_exact_tag_wins() {
    let tags = candidates(&["de", "en"]);
    assert_eq!(TagMatcher.best_match("en", &tags).as_str(), "en");
}

#[test]
fn test_region_range_truncates_to_base_tag() {
    let tags = candidates(&["de", "en"]);
    assert_eq!(TagMatcher.best_match("de-CH", &tags).as_str(), "de");
}

#[test]
fn test_base_range_extends_to_regional_tag() {
    let tags = candidates(&["de-CH"]);
    assert_eq!(TagMatcher.best_match("de", &tags).as_str(), "de-CH");
}

#[test]
fn test_weights_rank_ranges() {
    let tags = candidates(&["de", "en"]);
    assert_eq!(
        TagMatcher.best_match("de;q=0.3, en;q=0.8", &tags).as_str(),
        "en"
    );
    // an unmatchable high-weight range falls through to the next one
    assert_eq!(
        TagMatcher.best_match("fr;q=0.9, de;q=0.2", &tags).as_str(),
        "de"
    );
}

#[test]
fn test_zero_weight_range_is_skipped() {
    let tags = candidates(&["de", "en"]);
    assert_eq!(TagMatcher.best_match("de;q=0, en;q=0.5", &tags).as_str(), "en");
}

#[test]
fn test_wildcard_range_resolves_to_fallback() {
    let tags = candidates(&["de", "en"]);
    assert!(TagMatcher.best_match("*", &tags).is_undetermined());
}

#[test]
fn test_unmatched_header_resolves_to_fallback() {
    let tags = candidates(&["de", "en"]);
    for header in ["fr-FR", "", "???", "ja, ko;q=0.8"] {
        let got = TagMatcher.best_match(header, &tags);
        assert!(got.is_undetermined(), "header {header:?}");
        assert_eq!(got.as_str(), UNDETERMINED);
    }
}

#[test]
fn test_garbage_ranges_are_skipped_not_fatal() {
    // the capability is lenient where the Accept grammar is strict
    let tags = candidates(&["en"]);
    assert_eq!(TagMatcher.best_match("<?>, en;q=0.5", &tags).as_str(), "en");
}

#[test]
fn test_display_labels() {
    assert_eq!(display_label(&LanguageTag::new("de")), "German/Deutsch");
    assert_eq!(display_label(&LanguageTag::new("en")), "English/English");
    assert_eq!(display_label(&LanguageTag::new("fr")), "French/français");
    // unknown primary subtags fall back to the raw tag on both sides
    assert_eq!(display_label(&LanguageTag::new("x-priv")), "x-priv/x-priv");
}
