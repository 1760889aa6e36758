//! # Language Negotiation
//!
//! BCP-47 language-range matching for the language axis.
//!
//! Language matching needs tag-fallback semantics (`de-CH` degrades to `de`)
//! that raw value equality cannot express, so the language axis bypasses the
//! generic [`crate::accept`] selector and consults a [`LanguageNegotiator`]
//! instead. The capability is a trait so hosts can plug a full ICU-grade
//! matcher; the bundled [`TagMatcher`] implements standard lookup rules:
//!
//! - ranges are ranked by `;q=` weight, ties by arrival order;
//! - a range matches a candidate tag exactly, by truncating the range at
//!   subtag boundaries, or by tag-side extension (range `de` matches
//!   candidate `de-CH`);
//! - the wildcard range `*` resolves to the first-listed candidate, which
//!   by convention is the "undetermined" fallback tag.
//!
//! The matcher seeds its candidate list with [`UNDETERMINED`] first, so an
//! unsatisfiable header resolves to `und` and the axis reports no match.

mod names;

/// The "undetermined" fallback tag. Always present as the first candidate
/// handed to the negotiator; resolving to it means no configured language
/// was acceptable.
pub const UNDETERMINED: &str = "und";

/// A normalized BCP-47-style language tag.
///
/// Normalization is case-only: the primary subtag is lower-cased, two-letter
/// region subtags are upper-cased, everything else is lower-cased. No
/// registry validation is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    tag: String,
}

impl LanguageTag {
    /// Build a tag from a raw string, normalizing subtag case.
    pub fn new(raw: &str) -> Self {
        let mut parts = Vec::new();
        for (i, subtag) in raw.split('-').enumerate() {
            if i > 0 && subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic()) {
                parts.push(subtag.to_ascii_uppercase());
            } else {
                parts.push(subtag.to_ascii_lowercase());
            }
        }
        Self {
            tag: parts.join("-"),
        }
    }

    /// The undetermined fallback tag.
    #[must_use]
    pub fn undetermined() -> Self {
        Self {
            tag: UNDETERMINED.to_string(),
        }
    }

    /// Full normalized tag, e.g. `de-CH`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// Primary language subtag, e.g. `de` for `de-CH`.
    #[inline]
    #[must_use]
    pub fn primary(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }

    /// Whether this is the undetermined fallback.
    #[inline]
    #[must_use]
    pub fn is_undetermined(&self) -> bool {
        self.primary() == UNDETERMINED
    }
}

/// A language-range negotiation capability.
///
/// `ranges` is a raw `Accept-Language`-style header value (multiple header
/// instances joined with `", "`). `tags` is the ranked candidate list; it is
/// never empty, and implementations must return one of its elements - the
/// first one when nothing matches.
pub trait LanguageNegotiator: Send + Sync {
    /// Resolve the best-matching candidate tag for the client's ranges.
    fn best_match<'a>(&self, ranges: &str, tags: &'a [LanguageTag]) -> &'a LanguageTag;
}

/// One parsed language range with its weight.
struct Range {
    tag: String,
    quality: u16,
    order: usize,
}

/// Default [`LanguageNegotiator`] with RFC 4647 lookup-style fallback.
///
/// Deliberately lenient where the Accept-grammar parser is strict: this
/// models an external capability with its own tolerance, so unparseable
/// ranges are skipped instead of invalidating the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagMatcher;

impl TagMatcher {
    fn parse_ranges(header: &str) -> Vec<Range> {
        let mut ranges = Vec::new();
        for (order, entry) in header.split(',').enumerate() {
            let mut parts = entry.trim().split(';');
            let Some(tag) = parts.next() else { continue };
            let tag = tag.trim();
            if tag.is_empty()
                || !tag
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'*')
            {
                continue;
            }

            let mut quality = 1000u16;
            for param in parts {
                if let Some((key, value)) = param.split_once('=') {
                    if key.trim() == "q" {
                        if let Ok(q) = value.trim().parse::<f32>() {
                            quality = (q.clamp(0.0, 1.0) * 1000.0) as u16;
                        }
                    }
                }
            }
            ranges.push(Range {
                tag: tag.to_ascii_lowercase(),
                quality,
                order,
            });
        }
        ranges.sort_by(|a, b| b.quality.cmp(&a.quality).then(a.order.cmp(&b.order)));
        ranges
    }

    /// Find a candidate for one range: exact, then progressively truncated
    /// prefixes of the range, each tried exactly and by tag-side extension.
    fn match_range<'a>(range: &str, tags: &'a [LanguageTag]) -> Option<&'a LanguageTag> {
        let mut prefix = range;
        loop {
            if let Some(tag) = tags
                .iter()
                .find(|t| t.as_str().eq_ignore_ascii_case(prefix))
            {
                return Some(tag);
            }
            if let Some(tag) = tags.iter().find(|t| {
                let bytes = t.as_str().as_bytes();
                bytes.len() > prefix.len()
                    && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
                    && bytes[prefix.len()] == b'-'
            }) {
                return Some(tag);
            }
            match prefix.rfind('-') {
                Some(cut) => prefix = &prefix[..cut],
                None => return None,
            }
        }
    }
}

impl LanguageNegotiator for TagMatcher {
    fn best_match<'a>(&self, ranges: &str, tags: &'a [LanguageTag]) -> &'a LanguageTag {
        for range in Self::parse_ranges(ranges) {
            if range.quality == 0 {
                continue;
            }
            if range.tag == "*" {
                return &tags[0];
            }
            if let Some(tag) = Self::match_range(&range.tag, tags) {
                return tag;
            }
        }
        &tags[0]
    }
}

/// Compose the published label for a matched tag, e.g. `"German/Deutsch"`.
#[must_use]
pub fn display_label(tag: &LanguageTag) -> String {
    match names::lookup(tag.primary()) {
        Some((english, native)) => format!("{}/{}", english, native),
        None => format!("{}/{}", tag.as_str(), tag.as_str()),
    }
}
