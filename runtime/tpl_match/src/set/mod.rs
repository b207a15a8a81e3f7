//! Unordered matching of values against template slots.
//!
//! # Algorithm
//!
//! Values and non-wildcard slots form a bipartite graph with an edge wherever
//! a value matches a slot. Each unpaired slot in turn looks for a free value
//! it matches. When every matching value is already taken, the search grows
//! an alternating tree breadth-first: a taken value's owner joins the tree
//! and looks for a free value of its own, and so on. Reaching a free value
//! from any node yields an augmenting path; flipping it pairs one more slot
//! without unpairing anyone.
//!
//! A slot with no augmenting path at its turn will never get one later in
//! the same call, so each slot is searched once. How a failed slot is
//! treated depends on the [`MatchMode`]:
//!
//! - `Exact`: fail immediately.
//! - `Superset`: fail immediately, unless the caller counts uncovered slots
//!   (see [`Incremental`]), in which case keep going and report the count.
//! - `Subset`: leave the slot unpaired; the verdict is whether every value
//!   got covered.
//!
//! The greedy multiset check in `multiset` is not enough here: "matches a
//! pattern" is neither symmetric nor transitive, so an early pairing can
//! block a later slot that only a swap can rescue.

mod table;
mod tree;

use std::ops::Range;

use tpl_ir::MatchMode;

use crate::oracle::MatchOracle;
use table::{MatchingTable, RealSlots};
use tree::AlternatingTree;

/// Outcome of one set-matcher call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SetVerdict {
    Matched,
    Unmatched,
    /// Superset matching with counting enabled: this many real slots found no
    /// value. At least that many more values are needed before a retry can
    /// succeed.
    Uncovered(usize),
}

/// Pairs carried across calls on a growing value window.
///
/// The permutation matcher probes the same slots against windows that only
/// ever grow at the end. Seeding each call with the previous pairs and the
/// size of the previous window means only the newly added values are probed
/// as direct candidates for still-unpaired slots.
pub(crate) struct Incremental<'p> {
    /// Value paired with each real slot, relative to the window start.
    pub pairs: &'p mut [Option<usize>],
    /// Window size of the previous call. Values below it were already tried
    /// against every unpaired slot.
    pub probed: usize,
}

/// Match `value_len` unordered values against `template_len` unordered slots.
pub fn match_set<O>(oracle: &O, value_len: usize, template_len: usize, mode: MatchMode) -> bool
where
    O: MatchOracle + ?Sized,
{
    match_set_window(oracle, 0..value_len, 0..template_len, mode, None) == SetVerdict::Matched
}

/// Set matching on a window of the values and a window of the slots.
pub(crate) fn match_set_window<O>(
    oracle: &O,
    values: Range<usize>,
    slots: Range<usize>,
    mode: MatchMode,
    incremental: Option<Incremental<'_>>,
) -> SetVerdict
where
    O: MatchOracle + ?Sized,
{
    let template_len = slots.len();
    let value_len = values.len();
    let real = RealSlots::scan(oracle, slots);
    let real_len = real.len();

    // A `*` among set members turns exact matching into superset matching,
    // and makes subset matching trivially true.
    let mode = match mode {
        MatchMode::Exact if real.has_wildcard() => MatchMode::Superset,
        MatchMode::Subset if real.has_wildcard() => return SetVerdict::Matched,
        mode => mode,
    };

    let cardinality_ok = match mode {
        MatchMode::Exact => value_len == real_len,
        MatchMode::Subset => value_len <= real_len,
        MatchMode::Superset => value_len >= real_len,
    };
    if !cardinality_ok {
        return SetVerdict::Unmatched;
    }

    if real_len == 0 {
        // Only `*` slots match everything; the empty template matches the
        // empty value, and is a superset of anything.
        return if template_len > 0 || value_len == 0 || mode == MatchMode::Superset {
            SetVerdict::Matched
        } else {
            SetVerdict::Unmatched
        };
    }

    let mut table = MatchingTable::new(oracle, &real, values);
    let counting = incremental.is_some();
    let mut probed = 0;
    let mut carried = None;
    if let Some(Incremental { pairs, probed: previous }) = incremental {
        for (slot, value) in pairs.iter().enumerate().take(real_len) {
            if let Some(value) = *value {
                table.pair(slot, value);
            }
        }
        probed = previous;
        carried = Some(pairs);
    }

    for root in 0..real_len {
        if table.paired_with(root).is_some() {
            continue;
        }
        if augment_from(&mut table, root, real_len, probed) {
            if mode == MatchMode::Subset && table.covered() == value_len {
                return SetVerdict::Matched;
            }
            continue;
        }
        match mode {
            MatchMode::Exact => return SetVerdict::Unmatched,
            MatchMode::Superset if !counting => return SetVerdict::Unmatched,
            // Subset leaves the slot unpaired; counting superset tallies it
            // at the end.
            MatchMode::Superset | MatchMode::Subset => {}
        }
    }

    if let Some(pairs) = carried {
        for (carried, current) in pairs.iter_mut().zip(table.pairs()) {
            *carried = *current;
        }
    }

    let found = table.covered();
    tracing::trace!(%mode, value_len, real_len, found, "set match finished");
    match mode {
        MatchMode::Subset if found == value_len => SetVerdict::Matched,
        MatchMode::Subset => SetVerdict::Unmatched,
        MatchMode::Exact => SetVerdict::Matched,
        MatchMode::Superset if counting && found < real_len => {
            SetVerdict::Uncovered(real_len - found)
        }
        MatchMode::Superset => SetVerdict::Matched,
    }
}

/// Search for an augmenting path starting at the unpaired slot `root` and
/// flip it. Returns whether one was found.
///
/// `probed` only limits the root's direct scan: values below it were free
/// and tried against this root in an earlier call, and an edge does not
/// appear later. Deeper nodes see a pairing that may have changed since, so
/// they scan every value.
fn augment_from<O>(table: &mut MatchingTable<'_, O>, root: usize, slot_count: usize, probed: usize) -> bool
where
    O: MatchOracle + ?Sized,
{
    let value_len = table.value_len();
    let mut tree = AlternatingTree::new(root, slot_count);
    let mut at = 0;

    loop {
        let slot = tree.slot(at);
        let first = if at == 0 { probed } else { 0 };

        let free = (first..value_len).find(|&value| !table.is_covered(value) && table.edge(slot, value));
        if let Some(free) = free {
            flip(table, &tree, at, free);
            return true;
        }

        // Every value this slot matches is taken. Their owners join the tree
        // to look for replacements.
        for value in 0..value_len {
            let Some(owner) = table.covered_by(value) else {
                continue;
            };
            if !tree.contains(owner) && table.edge(slot, value) {
                tree.push(owner, at);
            }
        }

        at += 1;
        if at == tree.len() {
            return false;
        }
    }
}

/// Flip the alternating path ending at node `at`, which found `free`.
///
/// Each node takes the value handed down to it and hands its previous value
/// up to its parent, which reached it through exactly that value.
fn flip<O>(table: &mut MatchingTable<'_, O>, tree: &AlternatingTree, mut at: usize, free: usize)
where
    O: MatchOracle + ?Sized,
{
    let mut value = free;
    loop {
        let previous = table.pair(tree.slot(at), value);
        let Some(parent) = tree.parent(at) else {
            return;
        };
        let Some(previous) = previous else {
            debug_assert!(false, "non-root tree node without a pair");
            return;
        };
        value = previous;
        at = parent;
    }
}
