//! Template selections and the set semantics they imply.

use std::fmt;

use crate::TemplateError;

/// Set semantics for matching an unordered value against unordered slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchMode {
    /// Same cardinality, every value paired with a distinct slot.
    #[default]
    Exact,
    /// Every value pairs with a distinct slot; slots may stay unpaired.
    Subset,
    /// Every non-wildcard slot pairs with a distinct value; values may stay
    /// unpaired.
    Superset,
}

impl MatchMode {
    /// The mode a collection template's selection implies.
    ///
    /// Only specific-value, superset and subset templates carry slots to
    /// match; asking for any other selection is a contract violation.
    pub fn from_selection<T>(selection: &Selection<T>) -> Result<Self, TemplateError> {
        match selection {
            Selection::Specific => Ok(MatchMode::Exact),
            Selection::Superset => Ok(MatchMode::Superset),
            Selection::Subset => Ok(MatchMode::Subset),
            other => Err(TemplateError::UnsupportedSelection {
                operation: "set matching",
                selection: other.name(),
            }),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => f.write_str("exact"),
            MatchMode::Subset => f.write_str("subset"),
            MatchMode::Superset => f.write_str("superset"),
        }
    }
}

/// What a whole collection template stands for.
///
/// `T` is the nested template type used by value lists.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection<T> {
    /// The template's slots, matched element by element (or as a set).
    #[default]
    Specific,
    /// `superset(...)`: the value contains every slot.
    Superset,
    /// `subset(...)`: every value element is one of the slots.
    Subset,
    /// `?`: any present value.
    Any,
    /// `*`: any value, present or omitted.
    AnyOrOmit,
    /// `omit`: matches no present value.
    Omit,
    /// Matches if any listed template matches.
    ValueList(Vec<T>),
    /// Matches if no listed template matches.
    ComplementedList(Vec<T>),
}

impl<T> Selection<T> {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Specific => "specific value",
            Selection::Superset => "superset",
            Selection::Subset => "subset",
            Selection::Any => "?",
            Selection::AnyOrOmit => "*",
            Selection::Omit => "omit",
            Selection::ValueList(_) => "value list",
            Selection::ComplementedList(_) => "complemented list",
        }
    }
}
