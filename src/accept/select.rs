//! Candidate selection over a configured offer list.
//!
//! For every offer the selector retains the single most *specific* matching
//! candidate (specificity is decided before quality is ever looked at), then
//! picks the offer whose retained candidate carries the greatest quality
//! weight. The two-level tie-break is deliberate and observably different
//! from a flat weighted comparison on multi-candidate headers.

use smallvec::SmallVec;

use super::parser::{Candidate, Parameters};

/// Offer slots are stack-allocated up to this count. Real configurations
/// list a handful of representations per axis.
const MAX_INLINE_OFFERS: usize = 8;

/// An axis-specific value the server can produce.
///
/// Offers are built once at provisioning time and shared read-only across
/// requests. The parameter mapping is honored by the matching predicate even
/// though current configuration surfaces never populate it; parameterized
/// offers are supported on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Lower-cased offer value, e.g. `gzip`, `utf-8`, `application/pdf`,
    /// or a wildcard (`*`, `*/*`).
    pub value: String,
    /// Optional parameter restrictions, lower-cased keys and values.
    pub parameters: Parameters,
}

impl Offer {
    /// Create an offer with no parameter restrictions.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into().to_ascii_lowercase(),
            parameters: Parameters::new(),
        }
    }

    /// Create an offer that additionally restricts on parameters.
    pub fn with_parameters(value: impl Into<String>, parameters: Parameters) -> Self {
        let parameters = parameters
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_ascii_lowercase()))
            .collect();
        Self {
            value: value.into().to_ascii_lowercase(),
            parameters,
        }
    }

    /// Whether this offer admits any candidate value.
    #[inline]
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.value == "*" || self.value == "*/*"
    }
}

/// Outcome of selecting over one header's candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index of the winning offer in the configured list.
    pub offer_index: usize,
    /// Quality weight the retained candidate carried.
    pub quality: u16,
    /// Extension parameters of the retained candidate.
    pub extension_parameters: Parameters,
}

/// Matching predicate between a parsed candidate and a configured offer.
///
/// True iff the offer is a wildcard or the values are equal. An offer
/// without parameters restricts on the bare value only; a parameterized
/// offer additionally requires every parameter present on the *candidate*
/// to appear among its own with an identical value. Candidate-side
/// wildcards do not match concrete offers: a client sending `*` only hits
/// an offer configured as `*`.
fn matches(candidate: &Candidate, offer: &Offer) -> bool {
    if !offer.is_wildcard() && offer.value != candidate.value {
        return false;
    }
    offer.parameters.is_empty()
        || candidate
            .parameters
            .iter()
            .all(|(key, value)| offer.parameters.get(key) == Some(value))
}

/// Per-offer retention: does `new` displace the currently held candidate?
///
/// An exact value match outranks a candidate admitted only through an
/// offer-side wildcard; between candidates of equal exactness the one
/// carrying more parameters wins. Parameter *count* is compared, not
/// content. Quality never participates here.
fn supersedes(new: &Candidate, held: &Candidate, offer: &Offer) -> bool {
    let new_exact = new.value == offer.value;
    let held_exact = held.value == offer.value;
    if new_exact != held_exact {
        return new_exact;
    }
    held.parameters.len() < new.parameters.len()
}

/// Select the best offer for one header's candidate list.
///
/// Returns `None` when no offer slot retains a candidate with positive
/// weight - a logical "no acceptable value", not a fault. Ties on quality
/// are broken by the retained candidate's arrival order in the header, then
/// by offer configuration order.
#[must_use]
pub fn select(candidates: &[Candidate], offers: &[Offer]) -> Option<Selection> {
    let mut slots: SmallVec<[Option<&Candidate>; MAX_INLINE_OFFERS]> =
        SmallVec::from_elem(None, offers.len());

    for candidate in candidates {
        for (index, offer) in offers.iter().enumerate() {
            if !matches(candidate, offer) {
                continue;
            }
            let displace = match slots[index] {
                None => true,
                Some(held) => supersedes(candidate, held, offer),
            };
            if displace {
                slots[index] = Some(candidate);
            }
        }
    }

    let mut best: Option<usize> = None;
    for (index, slot) in slots.iter().enumerate() {
        let Some(candidate) = slot else { continue };
        if candidate.quality == 0 {
            continue;
        }
        match best {
            None => best = Some(index),
            Some(current) => {
                // slots[current] is always occupied once `best` is set
                if let Some(held) = slots[current] {
                    if candidate.quality > held.quality
                        || (candidate.quality == held.quality && candidate.order < held.order)
                    {
                        best = Some(index);
                    }
                }
            }
        }
    }

    let index = best?;
    let candidate = slots[index]?;
    Some(Selection {
        offer_index: index,
        quality: candidate.quality,
        extension_parameters: candidate.extension_parameters.clone(),
    })
}
