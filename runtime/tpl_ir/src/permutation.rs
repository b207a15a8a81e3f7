//! Permutation intervals.
//!
//! A permutation interval marks a contiguous run of template slots that must
//! match some contiguous run of values in any order. A template may declare
//! any number of them; they are kept sorted and pairwise disjoint, and every
//! mutation re-checks that invariant so a malformed list is rejected at
//! construction time rather than in the middle of a match.

use smallvec::SmallVec;

use crate::TemplateError;

/// A closed range `[start, end]` of template slot indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermutationInterval {
    pub start: usize,
    pub end: usize,
}

impl PermutationInterval {
    pub fn new(start: usize, end: usize) -> Result<Self, TemplateError> {
        if start > end {
            return Err(TemplateError::InvertedPermutation { start, end });
        }
        Ok(PermutationInterval { start, end })
    }

    /// Number of template slots covered. Never zero.
    #[inline]
    #[allow(clippy::len_without_is_empty, reason = "an interval is never empty")]
    pub const fn len(self) -> usize {
        self.end - self.start + 1
    }

    #[inline]
    pub const fn contains(self, slot: usize) -> bool {
        slot >= self.start && slot <= self.end
    }
}

/// Ordered, disjoint permutation intervals of one template.
///
/// Most templates declare none or one, so storage is inline for the common
/// case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutations {
    intervals: SmallVec<[PermutationInterval; 2]>,
}

impl Permutations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from intervals given in template order.
    pub fn from_intervals(
        intervals: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, TemplateError> {
        let mut permutations = Self::new();
        for (start, end) in intervals {
            permutations.push(start, end)?;
        }
        Ok(permutations)
    }

    /// Append an interval after the last one.
    pub fn push(&mut self, start: usize, end: usize) -> Result<(), TemplateError> {
        let interval = PermutationInterval::new(start, end)?;
        if let Some(last) = self.intervals.last() {
            if last.end >= start {
                return Err(TemplateError::OverlappingPermutation {
                    index: self.intervals.len(),
                    start,
                    end,
                });
            }
        }
        self.intervals.push(interval);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The interval at `index`.
    pub fn get(&self, index: usize) -> Result<PermutationInterval, TemplateError> {
        self.intervals
            .get(index)
            .copied()
            .ok_or(TemplateError::PermutationIndex {
                index,
                count: self.intervals.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = PermutationInterval> + '_ {
        self.intervals.iter().copied()
    }

    /// Whether some interval starts at `slot`.
    pub fn starts_at(&self, slot: usize) -> bool {
        self.intervals.iter().any(|p| p.start == slot)
    }

    /// Whether some interval ends at `slot`.
    pub fn ends_at(&self, slot: usize) -> bool {
        self.intervals.iter().any(|p| p.end == slot)
    }

    /// Whether the list is exactly one interval spanning all `template_len`
    /// slots.
    pub fn covers_whole(&self, template_len: usize) -> bool {
        match self.intervals.as_slice() {
            [only] => only.start == 0 && only.end + 1 == template_len,
            _ => false,
        }
    }

    /// Check every invariant against a template of `template_len` slots.
    ///
    /// `push` already keeps the list sorted and disjoint; this re-checks it
    /// for lists that arrived by other routes (deserialization) and adds the
    /// bound check that needs the template length.
    pub fn validate_for(&self, template_len: usize) -> Result<(), TemplateError> {
        let mut previous_end: Option<usize> = None;
        for (index, p) in self.intervals.iter().enumerate() {
            if p.start > p.end {
                return Err(TemplateError::InvertedPermutation {
                    start: p.start,
                    end: p.end,
                });
            }
            if previous_end.is_some_and(|end| end >= p.start) {
                return Err(TemplateError::OverlappingPermutation {
                    index,
                    start: p.start,
                    end: p.end,
                });
            }
            if p.end >= template_len {
                return Err(TemplateError::PermutationOutOfBounds {
                    index,
                    end: p.end,
                    len: template_len,
                });
            }
            previous_end = Some(p.end);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
