//! Length restrictions attached to collection templates.
//!
//! A restriction is independent of the template's content: it is checked
//! against the value length before any element is examined, so a value of
//! the wrong size is rejected without a single element-level comparison.

use std::fmt;

use crate::TemplateError;

/// Declared length of the values a template accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthRestriction {
    /// Any length.
    #[default]
    None,
    /// Exactly `n` elements.
    Single(usize),
    /// At least `min` elements, and at most `max` when it is set.
    Range { min: usize, max: Option<usize> },
}

impl LengthRestriction {
    /// Exactly `n` elements.
    #[inline]
    pub const fn single(n: usize) -> Self {
        LengthRestriction::Single(n)
    }

    /// Between `min` and `max` elements, both inclusive.
    pub fn range(min: usize, max: usize) -> Result<Self, TemplateError> {
        if min > max {
            return Err(TemplateError::InvalidLengthRange { min, max });
        }
        Ok(LengthRestriction::Range {
            min,
            max: Some(max),
        })
    }

    /// At least `min` elements, no upper limit.
    #[inline]
    pub const fn at_least(min: usize) -> Self {
        LengthRestriction::Range { min, max: None }
    }

    /// Whether a restriction is declared at all.
    #[inline]
    pub const fn is_restricted(self) -> bool {
        !matches!(self, LengthRestriction::None)
    }

    /// Check a value length against the restriction.
    pub fn matches(self, len: usize) -> bool {
        match self {
            LengthRestriction::None => true,
            LengthRestriction::Single(n) => len == n,
            LengthRestriction::Range { min, max } => len >= min && max.map_or(true, |max| len <= max),
        }
    }

    /// Resolve the exact size of a template.
    ///
    /// `min_size` is the number of slots that consume exactly one value.
    /// When `has_any_or_none` is false the content has exactly that size and
    /// the restriction must agree with it. Otherwise the content accepts any
    /// size from `min_size` upwards and only a restriction that narrows the
    /// candidates down to one length yields an answer.
    pub fn resolve_size(self, min_size: usize, has_any_or_none: bool) -> Result<usize, TemplateError> {
        if !has_any_or_none {
            if self.matches(min_size) {
                return Ok(min_size);
            }
            return Err(TemplateError::LengthContradiction {
                size: min_size,
                restriction: self,
            });
        }

        let (low, high) = match self {
            LengthRestriction::None => return Err(TemplateError::NoExactSize),
            LengthRestriction::Single(n) => (n, Some(n)),
            LengthRestriction::Range { min, max } => (min, max),
        };
        let low = low.max(min_size);
        match high {
            Some(high) if high < low => Err(TemplateError::LengthContradiction {
                size: min_size,
                restriction: self,
            }),
            Some(high) if high == low => Ok(low),
            _ => Err(TemplateError::NoExactSize),
        }
    }
}

impl fmt::Display for LengthRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthRestriction::None => Ok(()),
            LengthRestriction::Single(n) => write!(f, "length ({n})"),
            LengthRestriction::Range { min, max: Some(max) } => {
                write!(f, "length ({min} .. {max})")
            }
            LengthRestriction::Range { min, max: None } => write!(f, "length ({min} .. infinity)"),
        }
    }
}
