//! # conneg
//!
//! **conneg** is a quality-weighted HTTP content-negotiation request matcher
//! for Rust, driven entirely by a configured set of offered representations.
//!
//! ## Overview
//!
//! Given the representations a server can produce - media types, languages,
//! character sets, content encodings - the matcher decides per request
//! whether the client's stated preferences (`Accept`, `Accept-Language`,
//! `Accept-Charset`, `Accept-Encoding`) can be satisfied, and which offer
//! wins on each axis. An optional query-string override per axis lets a
//! request force or veto the negotiated outcome (`?format=rdf`), with a
//! built-in alias table for common shorthands.
//!
//! ## Architecture
//!
//! The library is organized into a few small modules:
//!
//! - **[`accept`]** - Accept-style header grammar and quality-weighted
//!   candidate selection over an offer list
//! - **[`language`]** - BCP-47 language-range matching with tag-fallback
//!   semantics and an `und` ("undetermined") no-match sentinel
//! - **[`matcher`]** - the four-axis pipeline: override resolution, header
//!   negotiation, value publication, and the combined verdict
//! - **[`config`]** - serde-based configuration with startup validation
//! - **[`request`]** - the thin request abstraction the matcher consumes
//!
//! ### Request Evaluation Flow
//!
//! Each of the four axes runs independently through the same pipeline:
//!
//! ```text
//! offers empty? ──yes──▶ axis matches trivially
//!      │no
//! override key present? ──yes──▶ offer/alias hit? ──▶ force match / veto
//!      │no
//! parse header instances ──▶ select best offer by weight ──▶ match / no match
//! ```
//!
//! The overall verdict is the logical AND of the per-axis outcomes. A
//! matched axis with a configured output variable publishes its negotiated
//! value (prefixed `conneg_`) to the host-provided [`VarSink`] as soon as
//! the axis is decided, so later pipeline stages can consume it even when a
//! different axis ultimately rejects the request.
//!
//! ## Quick Start
//!
//! ```
//! use conneg::{ConnegConfig, ConnegMatcher, NullSink, RequestParts};
//! use http::header::{HeaderMap, HeaderValue};
//!
//! let config = ConnegConfig {
//!     match_encodings: vec!["gzip".into(), "identity".into()],
//!     ..Default::default()
//! };
//! let matcher = ConnegMatcher::new(config).expect("usable configuration");
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("accept-encoding", HeaderValue::from_static("gzip;q=0.8, br"));
//! let request = RequestParts::new(headers, None);
//!
//! assert!(matcher.evaluate(&request, &mut NullSink));
//! ```
//!
//! ## Guarantees
//!
//! - **Deterministic**: evaluation has no I/O, no clock, no randomness.
//! - **Infallible at request time**: malformed headers or query strings
//!   only ever downgrade a single axis to "no match"; `evaluate` itself
//!   never errors and never panics.
//! - **Share-nothing concurrency**: the matcher is immutable after
//!   construction; wrap it in an `Arc` and evaluate from as many threads
//!   as the host runs.
//! - **Fail-fast configuration**: an empty offer set, or an output
//!   variable on an offerless axis, is rejected at construction - never at
//!   request time.

pub mod accept;
pub mod config;
pub mod language;
pub mod matcher;
pub mod request;

pub use config::{load_config, ConfigError, ConnegConfig};
pub use matcher::{Axis, ConnegMatcher, NegotiationResult, NullSink, VarSink};
pub use request::RequestParts;
