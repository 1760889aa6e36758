//! # Configuration Module
//!
//! Offer lists and per-axis settings for the content-negotiation matcher.
//!
//! ## Overview
//!
//! A [`ConnegConfig`] lists, per axis, the representations the server is
//! willing to produce, an optional query-string key that lets a request
//! override negotiation for that axis, and an optional variable name under
//! which the negotiated value is published for later pipeline stages.
//!
//! Configuration is deserialized with serde and can be loaded from YAML or
//! JSON files, selected by extension. It is validated once, when the
//! matcher is constructed; an invalid configuration must never serve a
//! request.
//!
//! ## Example
//!
//! ```yaml
//! match_types:
//!   - application/rdf+xml
//!   - application/tei+xml
//! match_languages:
//!   - de
//!   - en
//! force_type_query_string: format
//! var_type: negotiated_type
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::matcher::Axis;

/// Content-negotiation matcher configuration.
///
/// Field names follow the wire format: `match_*` are the per-axis offer
/// lists, `force_*_query_string` the override keys, `var_*` the output-slot
/// names (published with a `conneg_` prefix).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnegConfig {
    /// Media types to match against. Default: empty list.
    pub match_types: Vec<String>,
    /// Language tags to match against. Default: empty list.
    pub match_languages: Vec<String>,
    /// Character sets to match against. Default: empty list.
    pub match_charsets: Vec<String>,
    /// Content encodings to match against. Default: empty list.
    pub match_encodings: Vec<String>,
    /// Query-string key overriding media-type negotiation.
    pub force_type_query_string: Option<String>,
    /// Query-string key overriding language negotiation.
    pub force_language_query_string: Option<String>,
    /// Query-string key overriding charset negotiation.
    pub force_charset_query_string: Option<String>,
    /// Query-string key overriding encoding negotiation.
    pub force_encoding_query_string: Option<String>,
    /// Variable name for the negotiated media type.
    pub var_type: Option<String>,
    /// Variable name for the negotiated language label.
    pub var_language: Option<String>,
    /// Variable name for the negotiated charset.
    pub var_charset: Option<String>,
    /// Variable name for the negotiated encoding.
    pub var_encoding: Option<String>,
}

/// Rejected configurations. Construction of the matcher fails with one of
/// these before any request is served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Every axis has an empty offer list; the matcher would match nothing.
    #[error(
        "one of match_types, match_languages, match_charsets or match_encodings must be set"
    )]
    NoOffers,
    /// An output variable is configured for an axis without offers.
    /// (Use the axis wildcard as an offer to publish unconditionally.)
    #[error("var_{axis} requires a non-empty match_{axis}s offer list")]
    SlotWithoutOffers {
        /// The offending axis.
        axis: Axis,
    },
}

impl ConnegConfig {
    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoOffers`] when no axis has any offers;
    /// [`ConfigError::SlotWithoutOffers`] when a `var_*` name is set but the
    /// corresponding `match_*` list is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.match_types.is_empty()
            && self.match_languages.is_empty()
            && self.match_charsets.is_empty()
            && self.match_encodings.is_empty()
        {
            return Err(ConfigError::NoOffers);
        }
        for (axis, offers, var) in [
            (Axis::Type, &self.match_types, &self.var_type),
            (Axis::Language, &self.match_languages, &self.var_language),
            (Axis::Charset, &self.match_charsets, &self.var_charset),
            (Axis::Encoding, &self.match_encodings, &self.var_encoding),
        ] {
            if var.is_some() && offers.is_empty() {
                return Err(ConfigError::SlotWithoutOffers { axis });
            }
        }
        Ok(())
    }
}

/// Load a configuration from a YAML or JSON file, selected by extension.
///
/// Validation is *not* performed here; it happens when the matcher is
/// constructed from the returned value.
pub fn load_config(file_path: &str) -> anyhow::Result<ConnegConfig> {
    let content = std::fs::read_to_string(file_path)?;
    let config: ConnegConfig = if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(config)
}
