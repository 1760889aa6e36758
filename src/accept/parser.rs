//! Accept-style header grammar - hot path for header negotiation.
//!
//! Parses one raw header field value (`Accept`, `Accept-Charset`,
//! `Accept-Encoding`) into an ordered list of [`Candidate`]s. The grammar is
//! strict: a header that does not parse in full yields an error and zero
//! candidates, never a usable prefix.

use std::collections::BTreeMap;

use thiserror::Error;

/// Parameter map for candidates and offers.
///
/// Keys and values are lower-cased tokens. `BTreeMap` keeps iteration order
/// deterministic, which matters for logging and test output.
pub type Parameters = BTreeMap<String, String>;

/// Default quality weight when a range carries no `q` parameter (1.000).
pub const DEFAULT_QUALITY: u16 = 1000;

/// Errors produced while parsing an Accept-style header value.
///
/// Any variant invalidates the entire header: callers must treat the header
/// as contributing no candidates rather than salvaging what parsed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A range value was empty or started with a non-token byte.
    #[error("invalid value in Accept-style header")]
    InvalidValue,
    /// A `;key=value` parameter was malformed.
    #[error("invalid parameter in Accept-style header")]
    InvalidParameter,
    /// A `q` parameter value did not conform to the quality-value grammar.
    #[error("invalid weight in Accept-style header")]
    InvalidWeight,
    /// Input remained after the last range that no production could consume.
    #[error("trailing input in Accept-style header")]
    TrailingInput,
}

/// One value parsed out of an Accept-style header.
///
/// Candidates are ephemeral: they are rebuilt from the raw header text on
/// every request and discarded once the axis has been negotiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Lower-cased value: a token, `*`, or a `type/subtype` pair.
    pub value: String,
    /// Parameters seen before any `q` parameter.
    pub parameters: Parameters,
    /// Fixed-point quality weight, 0-1000 representing 0.000-1.000.
    pub quality: u16,
    /// Parameters seen after the `q` parameter. Carried through selection,
    /// never consulted for precedence.
    pub extension_parameters: Parameters,
    /// 0-based position in the header's comma-separated list.
    pub order: usize,
}

// token = 1*<any visible ASCII byte except separators> (RFC 7230, 3.2.6)
#[inline]
fn is_token_char(c: u8) -> bool {
    (0x21..=0x7e).contains(&c) && !b"\"(),/:;<=>?@[]\\{}".contains(&c)
}

// SP / HTAB (RFC 7230, 3.2.3)
#[inline]
fn is_whitespace_char(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn skip_space(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_ascii() && is_whitespace_char(c as u8))
}

/// Consume a maximal token run, case-folded to lower case.
///
/// Returns the token (possibly empty) and the unconsumed remainder; callers
/// decide whether an empty token is an error.
fn consume_token(s: &str) -> (String, &str) {
    let end = s
        .bytes()
        .position(|b| !is_token_char(b))
        .unwrap_or(s.len());
    (s[..end].to_ascii_lowercase(), &s[end..])
}

/// Consume a range value: a token, optionally extended to a `token/token`
/// media-range pair so the media-type axis parses with the same grammar as
/// the charset and encoding axes.
fn consume_value(s: &str) -> Result<(String, &str), ParseError> {
    let (token, rest) = consume_token(s);
    if token.is_empty() {
        return Err(ParseError::InvalidValue);
    }
    if let Some(after_slash) = rest.strip_prefix('/') {
        let (subtype, rest) = consume_token(after_slash);
        if subtype.is_empty() {
            return Err(ParseError::InvalidValue);
        }
        let mut value = token;
        value.push('/');
        value.push_str(&subtype);
        return Ok((value, rest));
    }
    Ok((token, rest))
}

/// Consume one `;`-introduced `key=value` parameter.
///
/// Whitespace is tolerated before the key and after the value, but not
/// around the `=` sign: a token stops at whitespace, and anything other
/// than `=` immediately after the key fails the parse.
fn consume_parameter(s: &str) -> Result<(String, String, &str), ParseError> {
    let s = skip_space(s);
    let (key, s) = consume_token(s);
    if key.is_empty() {
        return Err(ParseError::InvalidParameter);
    }
    let s = s.strip_prefix('=').ok_or(ParseError::InvalidParameter)?;
    let (value, s) = consume_token(s);
    if value.is_empty() {
        return Err(ParseError::InvalidParameter);
    }
    Ok((key, value, skip_space(s)))
}

/// Parse a quality value into fixed-point 0-1000 (RFC 7231, 5.3.1).
///
/// At most 5 characters, first character `0` or `1`, optional `.` plus up to
/// three digits; when the integer part is `1` every following digit must be
/// `0`. The literal decimal value is scaled by 1000 and truncated.
fn parse_weight(s: &str) -> Result<u16, ParseError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes.len() > 5 {
        return Err(ParseError::InvalidWeight);
    }

    let mut result: u16 = 0;
    let mut multiplier: u16 = 1000;
    for (i, &b) in bytes.iter().enumerate() {
        match i {
            0 => {
                if b != b'0' && b != b'1' {
                    return Err(ParseError::InvalidWeight);
                }
                result = u16::from(b - b'0') * multiplier;
                multiplier /= 10;
            }
            1 => {
                if b != b'.' {
                    return Err(ParseError::InvalidWeight);
                }
            }
            _ => {
                if (bytes[0] == b'1' && b != b'0') || !b.is_ascii_digit() {
                    return Err(ParseError::InvalidWeight);
                }
                result += u16::from(b - b'0') * multiplier;
                multiplier /= 10;
            }
        }
    }
    Ok(result)
}

/// Parse a raw Accept-style header value into ordered candidates.
///
/// The grammar is applied left to right: comma-separated ranges, each a
/// value token optionally followed by `;key=value` parameters. A `q`
/// parameter closes the candidate's own parameter block; everything after it
/// lands in [`Candidate::extension_parameters`].
///
/// # Errors
///
/// Returns a [`ParseError`] if any range, parameter, or weight is malformed
/// or if unconsumed input remains. The whole header is invalid in that case;
/// no partial candidate list is produced.
pub fn parse(header: &str) -> Result<Vec<Candidate>, ParseError> {
    let mut s = header;
    let mut candidates = Vec::new();

    for order in 0usize.. {
        if s.is_empty() {
            break;
        }
        if order > 0 {
            // every range after the first one must start with a comma
            match s.strip_prefix(',') {
                Some(rest) => s = rest,
                None => break,
            }
        }
        s = skip_space(s);

        let (value, rest) = consume_value(s)?;
        s = rest;

        let mut parameters = Parameters::new();
        let mut quality = DEFAULT_QUALITY;
        while let Some(after) = s.strip_prefix(';') {
            let (key, val, rest) = consume_parameter(after)?;
            s = rest;
            if key == "q" {
                quality = parse_weight(&val)?;
                // "q" separates the range's own parameters from extensions
                break;
            }
            parameters.insert(key, val);
        }

        let mut extension_parameters = Parameters::new();
        while let Some(after) = s.strip_prefix(';') {
            let (key, val, rest) = consume_parameter(after)?;
            s = rest;
            extension_parameters.insert(key, val);
        }

        candidates.push(Candidate {
            value,
            parameters,
            quality,
            extension_parameters,
            order,
        });
        s = skip_space(s);
    }

    // there must not be anything left after parsing the header
    if !s.is_empty() {
        return Err(ParseError::TrailingInput);
    }
    Ok(candidates)
}
