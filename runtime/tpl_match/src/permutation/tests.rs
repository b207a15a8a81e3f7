#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{lits, Fixture, P};

fn perms(intervals: &[(usize, usize)]) -> Permutations {
    Permutations::from_intervals(intervals.iter().copied()).unwrap()
}

fn run(values: &[i32], slots: &[P], intervals: &[(usize, usize)]) -> bool {
    let fx = Fixture::new(values, slots);
    match_permuted_sequence(&fx, values.len(), slots.len(), &perms(intervals), MatchMode::Exact).unwrap()
}

// Dispatch

#[test]
fn no_intervals_matches_in_order() {
    let slots = [P::Lit(1), P::Star, P::Lit(3)];
    assert!(run(&[1, 7, 7, 3], &slots, &[]));
    assert!(!run(&[3, 1], &slots, &[]));
}

#[test]
fn whole_interval_uses_set_semantics() {
    let slots = lits(&[1, 2, 3]);
    assert!(run(&[3, 1, 2], &slots, &[(0, 2)]));
    assert!(!run(&[3, 1, 1], &slots, &[(0, 2)]));
}

#[test]
fn whole_interval_honours_mode() {
    let slots = lits(&[1, 2]);
    let fx_values = [2, 5, 1];
    let fx = Fixture::new(&fx_values, &slots);
    let found = match_permuted_sequence(&fx, 3, 2, &perms(&[(0, 1)]), MatchMode::Superset);
    assert_eq!(found, Ok(true));
}

#[test]
fn non_exact_mode_needs_a_whole_interval() {
    let slots = lits(&[1, 2, 3]);
    let values = [1, 2, 3];
    let fx = Fixture::new(&values, &slots);
    let found = match_permuted_sequence(&fx, 3, 3, &perms(&[(1, 2)]), MatchMode::Subset);
    assert_eq!(
        found,
        Err(TemplateError::IncompatibleMode {
            mode: MatchMode::Subset
        })
    );
    assert_eq!(fx.value_calls.get(), 0);
}

#[test]
fn interval_past_the_end_is_rejected_before_matching() {
    let slots = lits(&[1, 2]);
    let values = [1, 2];
    let fx = Fixture::new(&values, &slots);
    let found = match_permuted_sequence(&fx, 2, 2, &perms(&[(1, 2)]), MatchMode::Exact);
    assert_eq!(
        found,
        Err(TemplateError::PermutationOutOfBounds {
            index: 0,
            end: 2,
            len: 2
        })
    );
    assert_eq!(fx.calls.get(), 0);
}

#[test]
fn overlapping_intervals_never_reach_the_engine() {
    let found = Permutations::from_intervals([(0, 1), (1, 2)]);
    assert_eq!(
        found,
        Err(TemplateError::OverlappingPermutation {
            index: 1,
            start: 1,
            end: 2
        })
    );
}

// Islands

#[test]
fn island_in_the_middle() {
    let slots = lits(&[1, 3, 2, 4, 5]);
    assert!(run(&[1, 2, 3, 4, 5], &slots, &[(1, 3)]));
    assert!(run(&[1, 4, 3, 2, 5], &slots, &[(1, 3)]));
    assert!(!run(&[1, 2, 3, 5, 4], &slots, &[(1, 3)]));
    assert!(!run(&[1, 2, 3, 4], &slots, &[(1, 3)]));
}

#[test]
fn island_at_either_end() {
    let slots = lits(&[2, 1, 9]);
    assert!(run(&[1, 2, 9], &slots, &[(0, 1)]));
    assert!(!run(&[1, 9, 2], &slots, &[(0, 1)]));

    let slots = lits(&[9, 2, 1]);
    assert!(run(&[9, 1, 2], &slots, &[(1, 2)]));
    assert!(!run(&[9, 1, 2, 2], &slots, &[(1, 2)]));
}

#[test]
fn adjacent_islands_keep_their_boundary() {
    let slots = lits(&[1, 2, 3, 4]);
    let intervals = [(0, 1), (2, 3)];
    assert!(run(&[2, 1, 4, 3], &slots, &intervals));
    assert!(!run(&[2, 3, 1, 4], &slots, &intervals));
}

#[test]
fn island_with_a_star_absorbs_extra_values() {
    let slots = [P::Lit(1), P::Lit(2), P::Star, P::Lit(5)];
    assert!(run(&[1, 9, 2, 8, 5], &slots, &[(1, 2)]));
    assert!(run(&[1, 2, 5], &slots, &[(1, 2)]));
    assert!(!run(&[1, 9, 8, 5], &slots, &[(1, 2)]));
}

#[test]
fn island_of_only_a_star() {
    let slots = [P::Star, P::Lit(1)];
    assert!(run(&[5, 5, 1], &slots, &[(0, 0)]));
    assert!(run(&[1], &slots, &[(0, 0)]));
    assert!(!run(&[1, 5], &slots, &[(0, 0)]));
}

#[test]
fn island_needs_more_values_than_exist() {
    let slots = [P::Lit(0), P::Lit(1), P::Lit(2), P::Lit(3)];
    assert!(!run(&[0, 1], &slots, &[(1, 3)]));
}

// Lone wildcards around islands

#[test]
fn stars_around_an_island() {
    let slots = [P::Star, P::Lit(1), P::Lit(2), P::Star];
    assert!(run(&[7, 2, 1, 9], &slots, &[(1, 2)]));
    assert!(run(&[2, 1], &slots, &[(1, 2)]));
    assert!(!run(&[7, 2, 9, 1], &slots, &[(1, 2)]));
}

#[test]
fn literal_run_after_a_star_finds_its_anchor() {
    let slots = [P::Lit(1), P::Lit(2), P::Star, P::Lit(7), P::Lit(8)];
    let intervals = [(0, 1)];
    assert!(run(&[2, 1, 5, 7, 6, 7, 8], &slots, &intervals));
    assert!(!run(&[2, 1, 5, 7, 6, 8, 7], &slots, &intervals));
}

#[test]
fn question_mark_inside_an_island() {
    let slots = [P::Lit(0), P::Any, P::Lit(4), P::Lit(9)];
    assert!(run(&[0, 4, 3, 9], &slots, &[(1, 2)]));
    assert!(!run(&[0, 4, 9], &slots, &[(1, 2)]));
}

// Step outcomes

fn step(values: &[i32], slots: &[P], intervals: &[(usize, usize)]) -> Step {
    let fx = Fixture::new(values, slots);
    let permutations = perms(intervals);
    let matcher = PermutationMatcher {
        oracle: &fx,
        permutations: &permutations,
    };
    matcher.step(0..values.len(), 0..slots.len(), 0).unwrap()
}

#[test]
fn literal_miss_hints_at_the_next_candidate() {
    // Slot 0 wants 7; the next 7 is two values further on.
    let slots = [P::Lit(7), P::Lit(8), P::Star];
    assert_eq!(step(&[6, 5, 7, 8], &slots, &[]), Step::Failure { shift: 2 });
}

#[test]
fn literal_with_no_candidate_gives_up() {
    let slots = [P::Lit(7), P::Lit(8), P::Star];
    assert_eq!(step(&[6, 5, 4], &slots, &[]), Step::NoChance);
}

#[test]
fn literal_run_longer_than_the_values_gives_up() {
    let slots = [P::Lit(1), P::Lit(2), P::Lit(3), P::Star];
    assert_eq!(step(&[1, 2], &slots, &[]), Step::NoChance);
}

#[test]
fn no_chance_stops_the_enclosing_scan() {
    // The value 9 never appears, so every split after the leading island is
    // hopeless and the scan stops after the first attempt.
    let slots = [P::Lit(1), P::Lit(2), P::Star, P::Lit(9)];
    let values = [2, 1, 3, 3, 3, 3, 3, 3];
    let fx = Fixture::new(&values, &slots);
    let found = match_permuted_sequence(&fx, values.len(), slots.len(), &perms(&[(0, 1)]), MatchMode::Exact);
    assert_eq!(found, Ok(false));
    // Two island members against two values, then one scan of the tail for 9.
    assert!(fx.value_calls.get() <= 4 + values.len());
}

#[test]
fn oracle_sees_only_indices_in_bounds() {
    // The fixture indexes its slices directly and would panic otherwise.
    let slots = [P::Star, P::Lit(1), P::Lit(2), P::Star, P::Lit(3), P::Any, P::Star];
    let intervals = [(1, 2), (4, 6)];
    for len in 0..7 {
        let values: Vec<i32> = (0..len).map(|i| i % 4).collect();
        let _ = run(&values, &slots, &intervals);
    }
}

#[test]
fn many_islands_in_a_long_template() {
    let pairs = 3_000_usize;
    let num = |n: usize| i32::try_from(n).unwrap();
    let template: Vec<i32> = (0..pairs * 2).map(num).collect();
    let values: Vec<i32> = (0..pairs).flat_map(|k| [num(2 * k + 1), num(2 * k)]).collect();
    let intervals: Vec<(usize, usize)> = (0..pairs).map(|k| (2 * k, 2 * k + 1)).collect();
    let slots = lits(&template);

    assert!(run(&values, &slots, &intervals));

    let mut broken = values.clone();
    broken.swap(1, 2);
    assert!(!run(&broken, &slots, &intervals));
}
