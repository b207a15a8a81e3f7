//! Ordered matching with wildcards and no permutations.
//!
//! # Algorithm
//!
//! Two cursors walk the values and the slots. A `*` slot is recorded as the
//! backtrack point together with the value cursor and initially absorbs
//! nothing. A literal slot either matches the current value (both cursors
//! advance) or sends the scan back to the last `*`, which then absorbs one
//! more value.
//!
//! Only the most recent `*` is ever revisited. Extending an earlier `*`
//! cannot help: everything it would shift over was already matched by slots
//! the later `*` can absorb just as well.

use crate::oracle::MatchOracle;

/// Where to resume after a literal mismatch.
#[derive(Copy, Clone, Debug)]
struct Backtrack {
    /// Index of the last `*` slot seen.
    wildcard: usize,
    /// Value index the `*` currently absorbs up to (exclusive).
    value: usize,
}

impl Backtrack {
    /// Let the wildcard absorb one more value. Returns the new cursors.
    fn absorb_one(&mut self) -> (usize, usize) {
        self.value += 1;
        (self.wildcard + 1, self.value)
    }
}

/// Match `value_len` values against `template_len` ordered slots.
///
/// The empty template matches only the empty value.
pub fn match_sequence<O>(oracle: &O, value_len: usize, template_len: usize) -> bool
where
    O: MatchOracle + ?Sized,
{
    if template_len == 0 {
        return value_len == 0;
    }

    let mut slot = 0;
    let mut value = 0;
    let mut backtrack: Option<Backtrack> = None;

    loop {
        if slot == template_len {
            // A trailing `*` eats whatever values are left.
            if value == value_len || oracle.is_wildcard(slot - 1) {
                return true;
            }
            let Some(bt) = backtrack.as_mut() else {
                return false;
            };
            (slot, value) = bt.absorb_one();
            continue;
        }

        if value == value_len {
            return only_wildcards(oracle, slot..template_len);
        }

        if oracle.is_wildcard(slot) {
            backtrack = Some(Backtrack {
                wildcard: slot,
                value,
            });
            slot += 1;
        } else if oracle.matches(value, slot) {
            value += 1;
            slot += 1;
        } else {
            let Some(bt) = backtrack.as_mut() else {
                return false;
            };
            (slot, value) = bt.absorb_one();
        }
    }
}

/// Whether every slot in `slots` is a `*` wildcard.
pub(crate) fn only_wildcards<O>(oracle: &O, mut slots: std::ops::Range<usize>) -> bool
where
    O: MatchOracle + ?Sized,
{
    slots.all(|slot| oracle.is_wildcard(slot))
}
