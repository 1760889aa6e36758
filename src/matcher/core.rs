//! Axis pipeline and request evaluation - hot path for matching.

use std::fmt;

use tracing::{debug, info};

use crate::accept::{self, Offer, Parameters};
use crate::config::{ConfigError, ConnegConfig};
use crate::language::{display_label, LanguageNegotiator, LanguageTag, TagMatcher};
use crate::request::RequestParts;

use super::aliases;

/// Published variable names carry this prefix.
const VAR_PREFIX: &str = "conneg_";

/// One of the four independent negotiation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Media type, negotiated over `Accept`.
    Type,
    /// Language, negotiated over `Accept-Language`.
    Language,
    /// Character set, negotiated over `Accept-Charset`.
    Charset,
    /// Content encoding, negotiated over `Accept-Encoding`.
    Encoding,
}

impl Axis {
    /// The request header carrying this axis's client preferences.
    #[must_use]
    pub fn header_name(self) -> &'static str {
        match self {
            Axis::Type => "accept",
            Axis::Language => "accept-language",
            Axis::Charset => "accept-charset",
            Axis::Encoding => "accept-encoding",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::Type => "type",
            Axis::Language => "language",
            Axis::Charset => "charset",
            Axis::Encoding => "encoding",
        };
        write!(f, "{}", s)
    }
}

/// Per-axis outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationResult {
    /// Whether the axis accepted the request.
    pub matched: bool,
    /// The winning offer's canonical string, or the composed language
    /// label. `None` for an unmatched axis or an axis with no offers.
    pub value: Option<String>,
    /// Extension parameters carried by the winning candidate, when the
    /// header path decided the axis.
    pub extension_parameters: Option<Parameters>,
}

impl NegotiationResult {
    fn matched(value: String, extension_parameters: Option<Parameters>) -> Self {
        Self {
            matched: true,
            value: Some(value),
            extension_parameters,
        }
    }

    fn unmatched() -> Self {
        Self {
            matched: false,
            value: None,
            extension_parameters: None,
        }
    }

    /// An axis with no offers configured accepts every request.
    fn vacuous() -> Self {
        Self {
            matched: true,
            value: None,
            extension_parameters: None,
        }
    }
}

/// Destination for negotiated values, visible to later stages of the same
/// request's processing. Publication is fire-and-forget.
pub trait VarSink {
    /// Publish `value` under `name`.
    fn publish(&mut self, name: &str, value: &str);
}

impl VarSink for std::collections::HashMap<String, String> {
    fn publish(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

/// Discards every publication. Useful when a host only wants the verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl VarSink for NullSink {
    fn publish(&mut self, _name: &str, _value: &str) {}
}

/// How header-path negotiation is performed for an axis.
enum AxisBackend {
    /// Generic quality-weighted selection (type, charset, encoding).
    Accept { offers: Vec<Offer> },
    /// Tag-fallback language matching; `tags[0]` is always `und`.
    Language { tags: Vec<LanguageTag> },
}

/// Immutable per-axis plan built at provisioning time.
struct AxisPlan {
    axis: Axis,
    /// Offer strings as configured, for override equality and publication.
    canonical: Vec<String>,
    backend: AxisBackend,
    force_key: Option<String>,
    var_name: Option<String>,
}

impl AxisPlan {
    fn accept(
        axis: Axis,
        offers: &[String],
        force_key: Option<&String>,
        var_name: Option<&String>,
    ) -> Self {
        Self {
            axis,
            canonical: offers.to_vec(),
            backend: AxisBackend::Accept {
                offers: offers.iter().map(|o| Offer::new(o.as_str())).collect(),
            },
            force_key: force_key.cloned(),
            var_name: var_name.cloned(),
        }
    }

    fn language(
        offers: &[String],
        force_key: Option<&String>,
        var_name: Option<&String>,
    ) -> Self {
        // the undetermined fallback is always the first candidate handed to
        // the negotiator; resolving to it means "no acceptable language"
        let mut tags = vec![LanguageTag::undetermined()];
        tags.extend(offers.iter().map(|o| LanguageTag::new(o)));
        Self {
            axis: Axis::Language,
            canonical: offers.to_vec(),
            backend: AxisBackend::Language { tags },
            force_key: force_key.cloned(),
            var_name: var_name.cloned(),
        }
    }
}

/// Content-negotiation request matcher.
///
/// Holds the immutable offer/axis configuration and evaluates requests
/// against it. Evaluation is fully synchronous and deterministic; the
/// matcher is `Send + Sync` and is shared read-only across concurrent
/// requests (wrap it in an `Arc`, no locking required).
pub struct ConnegMatcher {
    axes: Vec<AxisPlan>,
    negotiator: Box<dyn LanguageNegotiator>,
}

impl ConnegMatcher {
    /// Build a matcher from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is unusable; an
    /// invalid configuration must never reach `evaluate`.
    pub fn new(config: ConnegConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let axes = vec![
            AxisPlan::accept(
                Axis::Type,
                &config.match_types,
                config.force_type_query_string.as_ref(),
                config.var_type.as_ref(),
            ),
            AxisPlan::language(
                &config.match_languages,
                config.force_language_query_string.as_ref(),
                config.var_language.as_ref(),
            ),
            AxisPlan::accept(
                Axis::Charset,
                &config.match_charsets,
                config.force_charset_query_string.as_ref(),
                config.var_charset.as_ref(),
            ),
            AxisPlan::accept(
                Axis::Encoding,
                &config.match_encodings,
                config.force_encoding_query_string.as_ref(),
                config.var_encoding.as_ref(),
            ),
        ];

        info!(
            types = ?config.match_types,
            languages = ?config.match_languages,
            charsets = ?config.match_charsets,
            encodings = ?config.match_encodings,
            "Conneg matcher provisioned"
        );

        Ok(Self {
            axes,
            negotiator: Box::new(TagMatcher),
        })
    }

    /// Replace the language-negotiation capability.
    #[must_use]
    pub fn with_negotiator(mut self, negotiator: Box<dyn LanguageNegotiator>) -> Self {
        self.negotiator = negotiator;
        self
    }

    /// Evaluate a request against every axis.
    ///
    /// Returns the logical AND of the four per-axis verdicts. As a side
    /// effect, each matched axis with a configured output variable has its
    /// value published to `vars` - per-axis, as soon as that axis's own
    /// match is known, even if a later axis ends up rejecting the request.
    ///
    /// Never panics and never errors: malformed headers and query strings
    /// only ever downgrade the affected axis to "no match".
    pub fn evaluate(&self, request: &RequestParts, vars: &mut dyn VarSink) -> bool {
        let mut verdict = true;
        for plan in &self.axes {
            let result = self.evaluate_axis(plan, request);
            debug!(
                axis = %plan.axis,
                matched = result.matched,
                value = ?result.value,
                "Axis negotiated"
            );
            if result.matched {
                if let (Some(var), Some(value)) = (&plan.var_name, &result.value) {
                    vars.publish(&format!("{}{}", VAR_PREFIX, var), value);
                }
            }
            verdict = verdict && result.matched;
        }
        verdict
    }

    fn evaluate_axis(&self, plan: &AxisPlan, request: &RequestParts) -> NegotiationResult {
        if plan.canonical.is_empty() {
            return NegotiationResult::vacuous();
        }

        if let Some(key) = &plan.force_key {
            if let Some(forced) = request.first_query_value(key) {
                return match resolve_override(forced, &plan.canonical) {
                    Some(index) => {
                        debug!(axis = %plan.axis, forced = %forced, offer = %plan.canonical[index], "Axis forced by query parameter");
                        NegotiationResult::matched(plan.canonical[index].clone(), None)
                    }
                    None => {
                        // an unmatched override vetoes the axis outright
                        debug!(axis = %plan.axis, forced = %forced, "Override value matches no offer");
                        NegotiationResult::unmatched()
                    }
                };
            }
        }

        match &plan.backend {
            AxisBackend::Accept { offers } => {
                let mut outcome = NegotiationResult::unmatched();
                for raw in request.header_values(plan.axis.header_name()) {
                    match accept::parse(raw) {
                        Ok(candidates) => {
                            if let Some(selection) = accept::select(&candidates, offers) {
                                outcome = NegotiationResult::matched(
                                    plan.canonical[selection.offer_index].clone(),
                                    Some(selection.extension_parameters),
                                );
                            }
                        }
                        Err(error) => {
                            debug!(axis = %plan.axis, header = %raw, %error, "Rejected malformed header");
                        }
                    }
                }
                outcome
            }
            AxisBackend::Language { tags } => {
                let joined = request
                    .header_values(plan.axis.header_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                let tag = self.negotiator.best_match(&joined, tags);
                if tag.is_undetermined() {
                    NegotiationResult::unmatched()
                } else {
                    NegotiationResult::matched(display_label(tag), None)
                }
            }
        }
    }
}

/// Resolve an override value against the configured offers, honoring the
/// alias table. The last matching offer wins when several match.
fn resolve_override(value: &str, offers: &[String]) -> Option<usize> {
    let mut resolved = None;
    for (index, offer) in offers.iter().enumerate() {
        let hit = offer == value
            || aliases::for_offer(offer).is_some_and(|entries| entries.contains(&value));
        if hit {
            resolved = Some(index);
        }
    }
    resolved
}
