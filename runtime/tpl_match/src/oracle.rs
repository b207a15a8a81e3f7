//! Capabilities the engine needs from the surrounding code.
//!
//! The engine never sees values or template slots. It works on indices and
//! asks an oracle two questions: "is slot `j` a `*` wildcard?" and "does value
//! `i` match slot `j`?". Both go through one method with a [`Probe`], the way
//! generated matching code exposes a single callback per collection type.

/// The value side of an oracle query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Probe {
    /// Ask whether the slot is an any-or-none (`*`) wildcard.
    Wildcard,
    /// Ask whether the value at this index matches the slot.
    Value(usize),
}

/// Answers match queries between value indices and template slot indices.
///
/// Implemented for every `Fn(Probe, usize) -> bool`, so a closure over the
/// caller's value and template storage is enough.
pub trait MatchOracle {
    fn check(&self, probe: Probe, slot: usize) -> bool;

    #[inline]
    fn is_wildcard(&self, slot: usize) -> bool {
        self.check(Probe::Wildcard, slot)
    }

    #[inline]
    fn matches(&self, value: usize, slot: usize) -> bool {
        self.check(Probe::Value(value), slot)
    }
}

impl<F> MatchOracle for F
where
    F: Fn(Probe, usize) -> bool,
{
    #[inline]
    fn check(&self, probe: Probe, slot: usize) -> bool {
        self(probe, slot)
    }
}

/// Element equality for the multiset checker.
///
/// Implementors promise a genuine equivalence relation (reflexive, symmetric,
/// transitive). The greedy multiset check is only correct under that
/// promise, which is why this is a separate capability from [`MatchOracle`]
/// rather than any boolean callback.
pub trait Equivalence {
    fn equivalent(&self, left: usize, right: usize) -> bool;
}

/// Opt-in wrapper declaring that a closure is an equivalence relation.
#[derive(Copy, Clone, Debug)]
pub struct Equiv<F>(pub F);

impl<F> Equivalence for Equiv<F>
where
    F: Fn(usize, usize) -> bool,
{
    #[inline]
    fn equivalent(&self, left: usize, right: usize) -> bool {
        (self.0)(left, right)
    }
}

/// Index-level equality over two slices of `Eq` elements.
#[derive(Copy, Clone, Debug)]
pub struct SliceEq<'a, T> {
    pub left: &'a [T],
    pub right: &'a [T],
}

impl<T: Eq> Equivalence for SliceEq<'_, T> {
    #[inline]
    fn equivalent(&self, left: usize, right: usize) -> bool {
        self.left[left] == self.right[right]
    }
}
