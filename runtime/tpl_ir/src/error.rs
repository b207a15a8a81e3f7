//! Contract violations raised while building or matching templates.
//!
//! Every variant indicates a bug in the caller or in template construction.
//! They abort the current operation; they are never folded into a `false`
//! match verdict.

use crate::{LengthRestriction, MatchMode};

/// A malformed template or a request the engine cannot honour.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A permutation interval whose start lies after its end.
    #[error(
        "wrong permutation interval settings: start ({start}) can not be greater than end ({end})"
    )]
    InvertedPermutation { start: usize, end: usize },

    /// A permutation interval that starts at or before the end of the
    /// previous one.
    #[error("permutation #{index} ({start}..={end}) overlaps the previous one")]
    OverlappingPermutation {
        index: usize,
        start: usize,
        end: usize,
    },

    /// A permutation interval reaching past the last template slot.
    #[error("permutation #{index} ends at slot {end}, but the template has {len} slots")]
    PermutationOutOfBounds { index: usize, end: usize, len: usize },

    /// Lookup of a permutation interval that does not exist.
    #[error("permutation index overflow ({index}), the template has {count} permutations")]
    PermutationIndex { index: usize, count: usize },

    /// A length range with its upper limit below its lower limit.
    #[error(
        "the upper limit for the length ({max}) is smaller than the lower limit ({min}) in a template with length restriction"
    )]
    InvalidLengthRange { min: usize, max: usize },

    /// A template selection the requested operation cannot work with.
    #[error("{operation}: unsupported template selection `{selection}`")]
    UnsupportedSelection {
        operation: &'static str,
        selection: &'static str,
    },

    /// A set-style match mode requested for a template whose permutation
    /// intervals do not cover it entirely.
    #[error("{mode} matching requires a single permutation spanning the whole template")]
    IncompatibleMode { mode: MatchMode },

    /// `size_of` on a template whose size is not pinned down.
    #[error("performing sizeof() on a template with no exact size")]
    NoExactSize,

    /// `size_of` on a template whose content contradicts its declared length.
    #[error("the size ({size}) contradicts the template's {restriction}")]
    LengthContradiction {
        size: usize,
        restriction: LengthRestriction,
    },
}
