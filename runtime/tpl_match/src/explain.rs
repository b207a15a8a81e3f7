//! Mismatch diagnostics.
//!
//! After a failed match, [`explain_mismatch`] collects hints a person can use
//! to find the culprit: which values pair with no slot at all, which slots
//! pair with no value, and which value/slot combinations do match. The report
//! is advisory. It is built from fresh oracle queries and never feeds back
//! into a verdict.
//!
//! The checks treat the template as unordered, so for ordered templates the
//! hints are a heuristic: a value "with a pair" may still sit in the wrong
//! place.

use std::fmt;

use tpl_ir::LengthRestriction;

use crate::oracle::MatchOracle;
use crate::options::Verbosity;

/// Renders the pieces a report mentions.
pub trait DescribeMismatch {
    fn describe_value(&self, value: usize) -> String;

    fn describe_slot(&self, slot: usize) -> String;

    /// Why `value` does not match `slot`, one level down.
    fn explain_pair(&self, value: usize, slot: usize) -> String;
}

/// An element or slot mentioned by a report, with its rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Described {
    pub index: usize,
    pub text: String,
}

/// A value and a slot that both lack a partner, with the nested reason they
/// do not match each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairExplanation {
    pub value: usize,
    pub slot: usize,
    pub text: String,
}

/// Pairing hints for a collection whose sizes are compatible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hints {
    pub verbosity: Verbosity,
    /// Values that match no slot. Empty in compact reports.
    pub unmatched_values: Vec<Described>,
    /// Non-`*` slots that match no value. Empty in compact reports.
    pub unmatched_slots: Vec<Described>,
    /// Every matching `(value, slot)` combination. Empty in compact reports.
    pub candidate_pairs: Vec<(usize, usize)>,
    /// One entry per combination of an unmatched value and an unmatched
    /// slot.
    pub pair_explanations: Vec<PairExplanation>,
}

/// What [`explain_mismatch`] found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MismatchReport {
    /// Nothing useful to say.
    Nothing,
    /// The value's length violates the template's length restriction.
    LengthUnsatisfiable,
    /// Fewer values than non-`*` slots. `at_least` is set when the template
    /// has a `*` and so could take more.
    TooFewValues {
        expected: usize,
        actual: usize,
        at_least: bool,
    },
    /// More values than slots, and no `*` to absorb them.
    TooManyValues { expected: usize, actual: usize },
    Hints(Hints),
}

/// Explain why `value_len` values do not match `template_len` slots.
pub fn explain_mismatch<O, D>(
    oracle: &O,
    describe: &D,
    value_len: usize,
    template_len: usize,
    length: LengthRestriction,
    verbosity: Verbosity,
) -> MismatchReport
where
    O: MatchOracle + ?Sized,
    D: DescribeMismatch + ?Sized,
{
    if value_len == 0 && template_len == 0 {
        return MismatchReport::Nothing;
    }
    if !length.matches(value_len) {
        return MismatchReport::LengthUnsatisfiable;
    }

    let wild: Vec<bool> = (0..template_len).map(|slot| oracle.is_wildcard(slot)).collect();
    let wildcards = wild.iter().filter(|&&w| w).count();
    let required = template_len - wildcards;
    if value_len < required {
        return MismatchReport::TooFewValues {
            expected: required,
            actual: value_len,
            at_least: wildcards > 0,
        };
    }
    if wildcards == 0 && value_len > template_len {
        return MismatchReport::TooManyValues {
            expected: template_len,
            actual: value_len,
        };
    }
    if value_len == 0 || template_len == 0 {
        return MismatchReport::Nothing;
    }

    // A `*` pairs with every value and never needs a partner itself.
    let pairs = |value: usize, slot: usize| wild[slot] || oracle.matches(value, slot);
    let value_unmatched: Vec<bool> = (0..value_len)
        .map(|value| !(0..template_len).any(|slot| pairs(value, slot)))
        .collect();
    let slot_unmatched: Vec<bool> = (0..template_len)
        .map(|slot| !wild[slot] && !(0..value_len).any(|value| oracle.matches(value, slot)))
        .collect();

    let mut hints = Hints {
        verbosity,
        unmatched_values: Vec::new(),
        unmatched_slots: Vec::new(),
        candidate_pairs: Vec::new(),
        pair_explanations: Vec::new(),
    };

    if !verbosity.is_compact() {
        hints.unmatched_values = flagged(&value_unmatched)
            .map(|index| Described {
                index,
                text: describe.describe_value(index),
            })
            .collect();
        hints.unmatched_slots = flagged(&slot_unmatched)
            .map(|index| Described {
                index,
                text: describe.describe_slot(index),
            })
            .collect();
        hints.candidate_pairs = (0..value_len)
            .flat_map(|value| (0..template_len).map(move |slot| (value, slot)))
            .filter(|&(value, slot)| pairs(value, slot))
            .collect();
    }

    for value in flagged(&value_unmatched) {
        for slot in flagged(&slot_unmatched) {
            hints.pair_explanations.push(PairExplanation {
                value,
                slot,
                text: describe.explain_pair(value, slot),
            });
        }
    }

    tracing::debug!(
        value_len,
        template_len,
        unmatched_values = value_unmatched.iter().filter(|&&u| u).count(),
        unmatched_slots = slot_unmatched.iter().filter(|&&u| u).count(),
        "mismatch hints collected"
    );
    MismatchReport::Hints(hints)
}

fn flagged(flags: &[bool]) -> impl Iterator<Item = usize> + '_ {
    flags
        .iter()
        .enumerate()
        .filter_map(|(index, &set)| set.then_some(index))
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReport::Nothing => Ok(()),
            MismatchReport::LengthUnsatisfiable => {
                write!(f, "Length restriction cannot be satisfied.")
            }
            MismatchReport::TooFewValues {
                expected,
                actual,
                at_least: false,
            } => write!(
                f,
                "Too few elements in value are present: {expected} was expected instead of {actual}"
            ),
            MismatchReport::TooFewValues {
                expected,
                actual,
                at_least: true,
            } => write!(
                f,
                "Too few value elements are present in value: at least {expected} was expected instead of {actual}"
            ),
            MismatchReport::TooManyValues { expected, actual } => write!(
                f,
                "Too many elements are present in value: {expected} was expected instead of {actual}"
            ),
            MismatchReport::Hints(hints) => hints.fmt(f),
        }
    }
}

impl fmt::Display for Hints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verbosity.is_compact() {
            for (i, pair) in self.pair_explanations.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "[{} <-> {}] {}", pair.value, pair.slot, pair.text)?;
            }
            return Ok(());
        }

        f.write_str("Some hints to find the reason of mismatch: { ")?;
        f.write_str("value elements that have no pairs in the template: ")?;
        write_described(f, &self.unmatched_values)?;
        f.write_str(", template elements that have no pairs in the value: ")?;
        write_described(f, &self.unmatched_slots)?;

        f.write_str(", matching value <-> template index pairs: ")?;
        if self.candidate_pairs.is_empty() {
            f.write_str("none")?;
        } else {
            for (i, (value, slot)) in self.candidate_pairs.iter().enumerate() {
                f.write_str(if i == 0 { "{" } else { "," })?;
                write!(f, " {value} <-> {slot}")?;
            }
            f.write_str(" }")?;
        }

        if !self.pair_explanations.is_empty() {
            f.write_str(", matching unmatched value <-> template index pairs: ")?;
            for (i, pair) in self.pair_explanations.iter().enumerate() {
                let sep = if i == 0 { '{' } else { ',' };
                write!(f, "{sep} {} <-> {}:{{ {} }}", pair.value, pair.slot, pair.text)?;
            }
            f.write_str(" }")?;
        }
        f.write_str(" }")
    }
}

fn write_described(f: &mut fmt::Formatter<'_>, items: &[Described]) -> fmt::Result {
    if items.is_empty() {
        return f.write_str("none");
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} at index {}", item.text, item.index)?;
    }
    Ok(())
}
