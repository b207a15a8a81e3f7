//! Ordered matching with permutation islands.
//!
//! # Algorithm
//!
//! Recursive descent over the template. Each level looks at the first
//! remaining slot:
//!
//! 1. **Permutation start**: the island must match a contiguous run of
//!    values in any order. Its smallest run is the number of non-`*` members;
//!    it can only grow beyond that when it contains a `*`. The smallest run
//!    that is a superset of the island is found with incremental set
//!    matching; then the rest of the template is matched against the rest of
//!    the values, widening the run on failure.
//! 2. **Lone `*`**: handled like an island with no members, spanning
//!    anywhere from zero values to all of them.
//! 3. **Literal run**: slots up to the next `*` or island are matched one for
//!    one, then the next level takes over.
//!
//! # Pruning
//!
//! A failing level reports how far the caller may jump ahead
//! ([`Step::Failure`]'s `shift`): when a literal slot misses, the distance to
//! the next value it accepts. A level that can prove no larger offset helps
//! returns [`Step::NoChance`], which every enclosing level passes straight
//! up. Both prunings rely on the offsets a level hands down only ever
//! growing.
//!
//! Recursion depth follows template structure (islands and `*` slots), not
//! value length.

use std::ops::Range;

use smallvec::{smallvec, SmallVec};
use tpl_ir::{MatchMode, PermutationInterval, Permutations, TemplateError};

use crate::linear::match_sequence;
use crate::oracle::MatchOracle;
use crate::set::{match_set, match_set_window, Incremental, SetVerdict};
use crate::stack::ensure_sufficient_stack;

/// Outcome of one recursion level.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    Success,
    /// No match at this split. The caller's next useful offset is at least
    /// `shift` further on (`0` means no hint).
    Failure { shift: usize },
    /// No split, however chosen, can succeed from here.
    NoChance,
}

/// Match `value_len` ordered values against a template that may declare
/// permutation intervals.
///
/// Picks the cheapest matcher the template's structure allows: plain
/// wildcard matching without intervals, set matching when one interval spans
/// the whole template, the recursive matcher otherwise. `mode` is honoured
/// only by set matching; any other mode than `Exact` on a template that is
/// not a single permutation is a contract violation, as is any malformed
/// interval. Both are reported before a single value is examined.
pub fn match_permuted_sequence<O>(
    oracle: &O,
    value_len: usize,
    template_len: usize,
    permutations: &Permutations,
    mode: MatchMode,
) -> Result<bool, TemplateError>
where
    O: MatchOracle + ?Sized,
{
    permutations.validate_for(template_len)?;

    if permutations.covers_whole(template_len) {
        tracing::debug!(%mode, value_len, template_len, "whole template is one permutation");
        return Ok(match_set(oracle, value_len, template_len, mode));
    }
    if mode != MatchMode::Exact {
        return Err(TemplateError::IncompatibleMode { mode });
    }
    if permutations.is_empty() {
        tracing::debug!(value_len, template_len, "no permutations, matching in order");
        return Ok(match_sequence(oracle, value_len, template_len));
    }

    tracing::debug!(
        value_len,
        template_len,
        islands = permutations.len(),
        "matching permutation islands"
    );
    let matcher = PermutationMatcher {
        oracle,
        permutations,
    };
    Ok(matcher.step(0..value_len, 0..template_len, 0)? == Step::Success)
}

/// How many values an island (or a lone `*`) may take.
#[derive(Copy, Clone, Debug)]
struct Island {
    /// Template slots the island spans.
    size: usize,
    /// Non-`*` members; the fewest values it can take.
    smallest: usize,
    /// The most values it can take.
    largest: usize,
    /// Contains a `*`, so it can take more than `smallest`.
    open: bool,
    /// Interval index for the level after the island.
    next_interval: usize,
}

struct PermutationMatcher<'a, O: ?Sized> {
    oracle: &'a O,
    permutations: &'a Permutations,
}

impl<O> PermutationMatcher<'_, O>
where
    O: MatchOracle + ?Sized,
{
    /// Match `values` against `slots`. `interval` is the first permutation
    /// interval not yet behind `slots.start`.
    fn step(
        &self,
        values: Range<usize>,
        slots: Range<usize>,
        interval: usize,
    ) -> Result<Step, TemplateError> {
        let count = self.permutations.len();
        if interval > count {
            return Err(TemplateError::PermutationIndex {
                index: interval,
                count,
            });
        }

        if slots.is_empty() {
            return Ok(if values.is_empty() {
                Step::Success
            } else {
                Step::Failure { shift: 0 }
            });
        }

        let next = if interval < count {
            let p = self.permutations.get(interval)?;
            if p.end >= slots.end {
                return Err(TemplateError::PermutationOutOfBounds {
                    index: interval,
                    end: p.end,
                    len: slots.end,
                });
            }
            Some(p)
        } else {
            None
        };

        match next {
            Some(p) if p.start == slots.start => self.island(values, slots, interval, Some(p)),
            _ if self.oracle.is_wildcard(slots.start) => self.island(values, slots, interval, None),
            _ => self.literal_run(values, slots, interval, next),
        }
    }

    /// Level starting at a permutation interval, or at a lone `*` when
    /// `interval_here` is `None`.
    fn island(
        &self,
        values: Range<usize>,
        slots: Range<usize>,
        interval: usize,
        interval_here: Option<PermutationInterval>,
    ) -> Result<Step, TemplateError> {
        let value_len = values.len();
        let island = match interval_here {
            Some(p) => {
                let smallest = (p.start..=p.end)
                    .filter(|&slot| !self.oracle.is_wildcard(slot))
                    .count();
                if smallest > value_len {
                    return Ok(Step::NoChance);
                }
                let open = smallest < p.len();
                Island {
                    size: p.len(),
                    smallest,
                    largest: if open { value_len } else { smallest },
                    open,
                    next_interval: interval + 1,
                }
            }
            None => Island {
                size: 1,
                smallest: 0,
                largest: value_len,
                open: true,
                next_interval: interval,
            },
        };

        let mut run = island.smallest;
        if island.smallest > 0 {
            match self.smallest_superset_run(values.start, slots.start, island) {
                Some(found) => run = found,
                None => return Ok(Step::Failure { shift: 0 }),
            }
        }

        if island.size == slots.len() {
            // Nothing after the island: it must take every remaining value.
            return Ok(if island.open || run == value_len {
                Step::Success
            } else {
                Step::Failure { shift: 0 }
            });
        }

        // A run that is a superset stays one as it grows, so the set
        // matcher is not consulted again.
        let rest = slots.start + island.size..slots.end;
        let mut taken = run;
        while taken <= island.largest {
            let step = ensure_sufficient_stack(|| {
                self.step(
                    values.start + taken..values.end,
                    rest.clone(),
                    island.next_interval,
                )
            })?;
            match step {
                Step::Success => return Ok(Step::Success),
                Step::NoChance => return Ok(Step::NoChance),
                Step::Failure { .. } if taken == value_len => return Ok(Step::NoChance),
                Step::Failure { shift } => taken += shift.max(1),
            }
        }

        Ok(Step::Failure {
            shift: taken - island.largest,
        })
    }

    /// The smallest run of values starting at `value_start` that pairs every
    /// non-`*` member of the island, or `None` if no run up to the island's
    /// largest size does.
    ///
    /// Each retry grows the run by the number of members still unpaired:
    /// every added value pairs at most one more member, so smaller steps
    /// cannot succeed.
    fn smallest_superset_run(&self, value_start: usize, slot_start: usize, island: Island) -> Option<usize> {
        let mut pairs: SmallVec<[Option<usize>; 8]> = smallvec![None; island.size];
        let mut run = island.smallest;
        let mut probed = 0;
        loop {
            let verdict = match_set_window(
                self.oracle,
                value_start..value_start + run,
                slot_start..slot_start + island.size,
                MatchMode::Superset,
                Some(Incremental {
                    pairs: &mut pairs,
                    probed,
                }),
            );
            match verdict {
                SetVerdict::Matched => return Some(run),
                SetVerdict::Uncovered(missing) if island.open && run + missing <= island.largest => {
                    tracing::trace!(run, missing, "growing permutation window");
                    probed = run;
                    run += missing;
                }
                SetVerdict::Uncovered(_) | SetVerdict::Unmatched => return None,
            }
        }
    }

    /// Level starting at a literal slot: match one for one up to the next
    /// `*` or interval start.
    fn literal_run(
        &self,
        values: Range<usize>,
        slots: Range<usize>,
        interval: usize,
        next: Option<PermutationInterval>,
    ) -> Result<Step, TemplateError> {
        let value_len = values.len();
        if value_len == 0 {
            return Ok(Step::Failure { shift: 0 });
        }
        let distance = next.map_or(slots.len(), |p| p.start - slots.start);

        let mut matched = 0;
        let good = loop {
            let good = self.oracle.matches(values.start + matched, slots.start + matched);
            matched += 1;
            if !good
                || matched == value_len
                || matched == distance
                || self.oracle.is_wildcard(slots.start + matched)
            {
                break good;
            }
        };

        let at_boundary = matched == distance || self.oracle.is_wildcard(slots.start + matched);
        if good && at_boundary {
            if matched == slots.len() {
                return Ok(if matched < value_len {
                    Step::Failure { shift: 0 }
                } else {
                    Step::Success
                });
            }
            return ensure_sufficient_stack(|| {
                self.step(
                    values.start + matched..values.end,
                    slots.start + matched..slots.end,
                    interval,
                )
            });
        }

        // Values ran out before the run did: later offsets leave even fewer.
        if matched == value_len {
            return Ok(Step::NoChance);
        }

        // The slot at `failed` missed. Offsets that keep it in front of the
        // next value it accepts fail the same way.
        let failed = matched - 1;
        let slot = slots.start + failed;
        let shift = (1..value_len - failed)
            .find(|&shift| self.oracle.matches(values.start + failed + shift, slot));
        Ok(match shift {
            Some(shift) => Step::Failure { shift },
            // The slot accepts nothing further on.
            None => Step::NoChance,
        })
    }
}

#[cfg(test)]
mod tests;
