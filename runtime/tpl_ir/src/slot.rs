//! Template slots.

use std::fmt;

/// One position of a collection template.
///
/// The matching engine never inspects the variant directly: it asks a slot
/// whether it is an [`AnyOrNone`](Slot::AnyOrNone) wildcard and otherwise
/// whether it accepts a given value. [`Any`](Slot::Any) therefore behaves
/// like a literal that accepts every value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot<P> {
    /// A sub-pattern that must match exactly one value.
    Literal(P),
    /// `?`: exactly one arbitrary value.
    Any,
    /// `*`: zero or more arbitrary values.
    AnyOrNone,
}

impl<P> Slot<P> {
    #[inline]
    pub fn is_any_or_none(&self) -> bool {
        matches!(self, Slot::AnyOrNone)
    }

    #[inline]
    pub fn literal(&self) -> Option<&P> {
        match self {
            Slot::Literal(p) => Some(p),
            Slot::Any | Slot::AnyOrNone => None,
        }
    }
}

impl<P: fmt::Display> fmt::Display for Slot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Literal(p) => p.fmt(f),
            Slot::Any => f.write_str("?"),
            Slot::AnyOrNone => f.write_str("*"),
        }
    }
}
