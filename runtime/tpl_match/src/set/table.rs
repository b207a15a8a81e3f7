//! Working state of one set-matcher call.

use std::ops::Range;

use crate::oracle::MatchOracle;

/// The non-wildcard slots of a template window.
///
/// Set matching works on *real* slot indices `0..len()`, which skip every `*`
/// slot; `absolute` maps them back to template indices for the oracle.
pub(super) struct RealSlots {
    absolute: Vec<usize>,
    total: usize,
}

impl RealSlots {
    pub(super) fn scan<O>(oracle: &O, slots: Range<usize>) -> Self
    where
        O: MatchOracle + ?Sized,
    {
        let total = slots.len();
        let absolute = slots.filter(|&slot| !oracle.is_wildcard(slot)).collect();
        RealSlots { absolute, total }
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.absolute.len()
    }

    #[inline]
    pub(super) fn has_wildcard(&self) -> bool {
        self.absolute.len() < self.total
    }

    #[inline]
    fn absolute(&self, real: usize) -> usize {
        self.absolute[real]
    }
}

/// Edge cache and current pairing between real slots and window values.
///
/// Value indices are relative to the window start. An edge is computed at
/// most once per call; pairing never changes whether an edge exists.
pub(super) struct MatchingTable<'a, O: ?Sized> {
    oracle: &'a O,
    slots: &'a RealSlots,
    value_start: usize,
    value_len: usize,
    /// `slots.len() × value_len`, row-major by slot.
    edges: Vec<Option<bool>>,
    /// For each value, the slot it is paired with.
    covered_by: Vec<Option<usize>>,
    /// For each slot, the value it is paired with.
    paired_with: Vec<Option<usize>>,
    covered: usize,
}

impl<'a, O> MatchingTable<'a, O>
where
    O: MatchOracle + ?Sized,
{
    pub(super) fn new(oracle: &'a O, slots: &'a RealSlots, values: Range<usize>) -> Self {
        let value_len = values.len();
        MatchingTable {
            oracle,
            slots,
            value_start: values.start,
            value_len,
            edges: vec![None; slots.len() * value_len],
            covered_by: vec![None; value_len],
            paired_with: vec![None; slots.len()],
            covered: 0,
        }
    }

    #[inline]
    pub(super) fn value_len(&self) -> usize {
        self.value_len
    }

    /// Whether `value` matches `slot`, asking the oracle on first use.
    pub(super) fn edge(&mut self, slot: usize, value: usize) -> bool {
        let cell = &mut self.edges[slot * self.value_len + value];
        if let Some(known) = *cell {
            return known;
        }
        let found = self
            .oracle
            .matches(self.value_start + value, self.slots.absolute(slot));
        *cell = Some(found);
        found
    }

    #[inline]
    pub(super) fn covered_by(&self, value: usize) -> Option<usize> {
        self.covered_by[value]
    }

    #[inline]
    pub(super) fn is_covered(&self, value: usize) -> bool {
        self.covered_by[value].is_some()
    }

    #[inline]
    pub(super) fn paired_with(&self, slot: usize) -> Option<usize> {
        self.paired_with[slot]
    }

    /// Number of values currently paired.
    #[inline]
    pub(super) fn covered(&self) -> usize {
        self.covered
    }

    /// Pair `slot` with `value`, returning the value `slot` held before.
    ///
    /// A pair carried over from an earlier call is a known edge, so it is
    /// recorded in the cache without asking the oracle.
    pub(super) fn pair(&mut self, slot: usize, value: usize) -> Option<usize> {
        if self.covered_by[value].is_none() {
            self.covered += 1;
        }
        self.covered_by[value] = Some(slot);
        self.edges[slot * self.value_len + value] = Some(true);
        self.paired_with[slot].replace(value)
    }

    /// Current pairs, indexed by real slot.
    pub(super) fn pairs(&self) -> &[Option<usize>] {
        &self.paired_with
    }
}
