#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn interval_len_and_contains() {
    let p = PermutationInterval::new(1, 3).unwrap();
    assert_eq!(p.len(), 3);
    assert!(p.contains(1));
    assert!(p.contains(3));
    assert!(!p.contains(0));
    assert!(!p.contains(4));
}

#[test]
fn single_slot_interval() {
    let p = PermutationInterval::new(2, 2).unwrap();
    assert_eq!(p.len(), 1);
}

#[test]
fn inverted_interval_rejected() {
    assert_eq!(
        PermutationInterval::new(3, 1),
        Err(TemplateError::InvertedPermutation { start: 3, end: 1 })
    );
}

#[test]
fn push_keeps_order() {
    let perms = Permutations::from_intervals([(0, 1), (3, 4), (6, 6)]).unwrap();
    assert_eq!(perms.len(), 3);
    assert_eq!(perms.get(1).unwrap(), PermutationInterval { start: 3, end: 4 });
    assert!(perms.starts_at(3));
    assert!(!perms.starts_at(4));
    assert!(perms.ends_at(4));
    assert!(perms.ends_at(6));
}

#[test]
fn overlapping_interval_rejected() {
    let mut perms = Permutations::new();
    perms.push(1, 3).unwrap();
    assert_eq!(
        perms.push(3, 5),
        Err(TemplateError::OverlappingPermutation {
            index: 1,
            start: 3,
            end: 5,
        })
    );
    // The failed push leaves the list untouched.
    assert_eq!(perms.len(), 1);
}

#[test]
fn out_of_order_interval_rejected() {
    let err = Permutations::from_intervals([(4, 5), (0, 1)]).unwrap_err();
    assert_eq!(
        err,
        TemplateError::OverlappingPermutation {
            index: 1,
            start: 0,
            end: 1,
        }
    );
}

#[test]
fn get_out_of_range() {
    let perms = Permutations::new();
    assert_eq!(
        perms.get(0),
        Err(TemplateError::PermutationIndex { index: 0, count: 0 })
    );
}

#[test]
fn validate_bounds() {
    let perms = Permutations::from_intervals([(1, 3)]).unwrap();
    assert_eq!(perms.validate_for(4), Ok(()));
    assert_eq!(
        perms.validate_for(3),
        Err(TemplateError::PermutationOutOfBounds {
            index: 0,
            end: 3,
            len: 3,
        })
    );
}

#[test]
fn covers_whole() {
    let whole = Permutations::from_intervals([(0, 2)]).unwrap();
    assert!(whole.covers_whole(3));
    assert!(!whole.covers_whole(4));

    let partial = Permutations::from_intervals([(1, 2)]).unwrap();
    assert!(!partial.covers_whole(3));

    let split = Permutations::from_intervals([(0, 0), (1, 2)]).unwrap();
    assert!(!split.covers_whole(3));

    assert!(!Permutations::new().covers_whole(0));
}
