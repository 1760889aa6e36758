//! # Matcher Module
//!
//! The axis combinator: override resolution, per-axis negotiation, value
//! publication, and the final AND verdict.
//!
//! ## Overview
//!
//! Evaluation runs the four axes in a fixed order (type, language, charset,
//! encoding). Each axis goes through the same pipeline:
//!
//! 1. An axis with no configured offers accepts trivially; no override or
//!    header work is performed.
//! 2. If an override query key is configured and present on the request,
//!    its first value decides the axis on its own: a value resolving to an
//!    offer (directly or through the [`aliases`] table) forces a match and
//!    skips header parsing entirely; a value resolving to nothing vetoes
//!    the axis no matter what the headers say.
//! 3. Otherwise the axis's header instances are parsed and selected by
//!    [`crate::accept`] - or, for the language axis, resolved through the
//!    [`crate::language`] capability.
//!
//! A matched axis with a configured output variable publishes its value to
//! the host's [`VarSink`] immediately, independent of how the other axes
//! fare. The overall verdict is the AND of the four per-axis outcomes.

mod aliases;
mod core;

pub use core::{Axis, ConnegMatcher, NegotiationResult, NullSink, VarSink};
