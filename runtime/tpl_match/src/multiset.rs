//! Multiset equality of two concrete collections.
//!
//! # Algorithm
//!
//! Greedy: each left element takes the first uncovered right element it is
//! equivalent to. Under an equivalence relation, elements of one class are
//! interchangeable, so no earlier choice can block a later one and no
//! backtracking is needed. The scanned window `[first, last]` of the right
//! side shrinks past covered elements at either end.
//!
//! Not usable for template matching: "matches a pattern" is no equivalence.
//! That needs the set matcher.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::oracle::{Equivalence, SliceEq};

/// Whether `left_len` left elements and `right_len` right elements form
/// equal multisets under `eq`.
pub fn values_equal<E>(eq: &E, left_len: usize, right_len: usize) -> bool
where
    E: Equivalence + ?Sized,
{
    if left_len != right_len {
        return false;
    }
    if left_len == 0 {
        return true;
    }

    let mut covered = vec![false; right_len];
    let mut first = 0;
    let mut last = right_len - 1;

    for left in 0..left_len {
        let Some(right) = (first..=last).find(|&right| !covered[right] && eq.equivalent(left, right)) else {
            tracing::trace!(left, "no partner for left element");
            return false;
        };
        covered[right] = true;

        if right == first {
            while first < last && covered[first] {
                first += 1;
            }
        }
        if right == last {
            while last > first && covered[last] {
                last -= 1;
            }
        }
    }
    true
}

/// Multiset equality of two slices.
pub fn multiset_eq<T: Eq>(left: &[T], right: &[T]) -> bool {
    values_equal(&SliceEq { left, right }, left.len(), right.len())
}

/// Multiset equality of two slices of hashable elements, by counting.
///
/// Linear instead of quadratic; agrees with [`multiset_eq`] whenever `Hash`
/// is consistent with `Eq`.
pub fn multiset_eq_hashed<T: Hash + Eq>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut counts: FxHashMap<&T, usize> = FxHashMap::default();
    counts.reserve(left.len());
    for item in left {
        *counts.entry(item).or_default() += 1;
    }
    for item in right {
        match counts.get_mut(item) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }
    true
}
