//! Owned collection templates.
//!
//! [`Template`] bundles slots, permutation intervals, a length restriction
//! and a selection, and plays the caller's part around the index-based
//! engine: it checks the length first, resolves the selection, and only then
//! hands an oracle over its own storage to the matcher that fits.
//!
//! Element-level checks go through [`Pattern`]. Templates are patterns over
//! slices themselves, so nested collections compose.

use std::cell::Cell;
use std::fmt;

use tpl_ir::{LengthRestriction, MatchMode, Permutations, Selection, Slot, TemplateError};

use crate::explain::{explain_mismatch, DescribeMismatch, MismatchReport};
use crate::options::MatchOptions;
use crate::oracle::{MatchOracle, Probe};
use crate::permutation::match_permuted_sequence;
use crate::set::match_set;

/// Element-level pattern over values of type `V`.
pub trait Pattern<V: ?Sized> {
    /// Whether `value` satisfies the pattern. `options` arrive exactly as
    /// the top-level caller passed them.
    fn matches(&self, value: &V, options: &MatchOptions) -> bool;

    /// Like [`matches`](Pattern::matches), but surfaces contract violations
    /// of nested templates.
    fn try_matches(&self, value: &V, options: &MatchOptions) -> Result<bool, TemplateError> {
        Ok(self.matches(value, options))
    }

    /// Why `value` does not satisfy the pattern, if the pattern can tell.
    fn explain(&self, value: &V, options: &MatchOptions) -> Option<String> {
        let _ = (value, options);
        None
    }
}

/// Pattern accepting exactly one value, by equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Exactly<T>(pub T);

impl<T: PartialEq> Pattern<T> for Exactly<T> {
    #[inline]
    fn matches(&self, value: &T, _options: &MatchOptions) -> bool {
        self.0 == *value
    }
}

impl<T: fmt::Display> fmt::Display for Exactly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether slot order matters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Collection {
    /// Ordered (`record of`): slots match values position by position,
    /// except inside permutation intervals.
    #[default]
    Sequence,
    /// Unordered (`set of`).
    Set,
}

/// A template over a collection of values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template<P> {
    slots: Vec<Slot<P>>,
    permutations: Permutations,
    length: LengthRestriction,
    selection: Selection<Template<P>>,
    collection: Collection,
}

impl<P> Template<P> {
    fn with_selection(
        slots: Vec<Slot<P>>,
        selection: Selection<Template<P>>,
        collection: Collection,
    ) -> Self {
        Template {
            slots,
            permutations: Permutations::new(),
            length: LengthRestriction::None,
            selection,
            collection,
        }
    }

    /// Ordered slots.
    pub fn sequence(slots: impl IntoIterator<Item = Slot<P>>) -> Self {
        Self::with_selection(slots.into_iter().collect(), Selection::Specific, Collection::Sequence)
    }

    /// Unordered slots; the value must pair up with them exactly.
    pub fn set(slots: impl IntoIterator<Item = Slot<P>>) -> Self {
        Self::with_selection(slots.into_iter().collect(), Selection::Specific, Collection::Set)
    }

    /// `superset(...)`: the value contains every member.
    pub fn superset(members: impl IntoIterator<Item = Slot<P>>) -> Self {
        Self::with_selection(members.into_iter().collect(), Selection::Superset, Collection::Set)
    }

    /// `subset(...)`: every value element is one of the members.
    pub fn subset(members: impl IntoIterator<Item = Slot<P>>) -> Self {
        Self::with_selection(members.into_iter().collect(), Selection::Subset, Collection::Set)
    }

    /// `?`
    pub fn any() -> Self {
        Self::with_selection(Vec::new(), Selection::Any, Collection::Sequence)
    }

    /// `*`
    pub fn any_or_omit() -> Self {
        Self::with_selection(Vec::new(), Selection::AnyOrOmit, Collection::Sequence)
    }

    /// `omit`
    pub fn omit() -> Self {
        Self::with_selection(Vec::new(), Selection::Omit, Collection::Sequence)
    }

    /// Matches if any of the alternatives does.
    pub fn value_list(alternatives: impl IntoIterator<Item = Template<P>>) -> Self {
        Self::with_selection(
            Vec::new(),
            Selection::ValueList(alternatives.into_iter().collect()),
            Collection::Sequence,
        )
    }

    /// Matches if none of the alternatives does.
    pub fn complemented_list(alternatives: impl IntoIterator<Item = Template<P>>) -> Self {
        Self::with_selection(
            Vec::new(),
            Selection::ComplementedList(alternatives.into_iter().collect()),
            Collection::Sequence,
        )
    }

    #[must_use]
    pub fn with_length(mut self, length: LengthRestriction) -> Self {
        self.length = length;
        self
    }

    /// Declare slots `start..=end` a permutation.
    ///
    /// Only ordered specific-value templates take permutations, and
    /// intervals must be added in template order.
    pub fn with_permutation(mut self, start: usize, end: usize) -> Result<Self, TemplateError> {
        if self.collection == Collection::Set || !matches!(self.selection, Selection::Specific) {
            return Err(TemplateError::UnsupportedSelection {
                operation: "permutation",
                selection: self.selection_name(),
            });
        }
        self.permutations.push(start, end)?;
        self.permutations.validate_for(self.slots.len())?;
        Ok(self)
    }

    pub fn slots(&self) -> &[Slot<P>] {
        &self.slots
    }

    pub fn permutations(&self) -> &Permutations {
        &self.permutations
    }

    pub fn length(&self) -> LengthRestriction {
        self.length
    }

    pub fn selection(&self) -> &Selection<Template<P>> {
        &self.selection
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    fn selection_name(&self) -> &'static str {
        match (self.collection, &self.selection) {
            (Collection::Set, Selection::Specific) => "set",
            (_, selection) => selection.name(),
        }
    }

    fn has_slots(&self) -> bool {
        matches!(
            self.selection,
            Selection::Specific | Selection::Superset | Selection::Subset
        )
    }

    /// Match `values` against the template.
    ///
    /// The length restriction is checked before anything else, so a value
    /// of the wrong size costs no element-level check.
    pub fn matches<V>(&self, values: &[V], options: &MatchOptions) -> Result<bool, TemplateError>
    where
        P: Pattern<V>,
    {
        if !self.length.matches(values.len()) {
            tracing::debug!(len = values.len(), length = %self.length, "length restriction rejects value");
            return Ok(false);
        }

        match &self.selection {
            Selection::Any | Selection::AnyOrOmit => Ok(true),
            Selection::Omit => Ok(false),
            Selection::ValueList(alternatives) => {
                for alternative in alternatives {
                    if alternative.matches(values, options)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Selection::ComplementedList(alternatives) => {
                for alternative in alternatives {
                    if alternative.matches(values, options)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Selection::Specific | Selection::Superset | Selection::Subset => {
                self.match_slots(values, options)
            }
        }
    }

    /// Whether the template accepts an omitted value.
    ///
    /// `omit` and `*` always do. With `legacy` set, a value list accepts
    /// omission when one of its alternatives does, and a complemented list
    /// when none of them does; otherwise lists never accept it.
    pub fn match_omit(&self, legacy: bool) -> bool {
        match &self.selection {
            Selection::Omit | Selection::AnyOrOmit => true,
            Selection::ValueList(alternatives) if legacy => {
                alternatives.iter().any(|alternative| alternative.match_omit(false))
            }
            Selection::ComplementedList(alternatives) if legacy => {
                !alternatives.iter().any(|alternative| alternative.match_omit(false))
            }
            _ => false,
        }
    }

    fn match_slots<V>(&self, values: &[V], options: &MatchOptions) -> Result<bool, TemplateError>
    where
        P: Pattern<V>,
    {
        let oracle = SliceOracle::new(values, &self.slots, options);
        let verdict = match self.collection {
            Collection::Set => {
                let mode = MatchMode::from_selection(&self.selection)?;
                match_set(&oracle, values.len(), self.slots.len(), mode)
            }
            Collection::Sequence => match_permuted_sequence(
                &oracle,
                values.len(),
                self.slots.len(),
                &self.permutations,
                MatchMode::Exact,
            )?,
        };
        oracle.finish(verdict)
    }

    /// Hints on why `values` does not match. Only templates with slots give
    /// element-level hints.
    pub fn explain<V>(&self, values: &[V], options: &MatchOptions) -> MismatchReport
    where
        P: Pattern<V> + fmt::Display,
        V: fmt::Debug,
    {
        if !self.has_slots() {
            return if self.length.matches(values.len()) {
                MismatchReport::Nothing
            } else {
                MismatchReport::LengthUnsatisfiable
            };
        }
        let oracle = SliceOracle::new(values, &self.slots, options);
        explain_mismatch(
            &oracle,
            &oracle,
            values.len(),
            self.slots.len(),
            self.length,
            options.verbosity,
        )
    }

    /// The number of values every matching value has.
    ///
    /// Errors when the template admits more than one size, or when its
    /// content contradicts its length restriction.
    pub fn size_of(&self) -> Result<usize, TemplateError> {
        match &self.selection {
            Selection::Specific => {
                let min_size = self.slots.iter().filter(|s| !s.is_any_or_none()).count();
                let open = min_size < self.slots.len();
                self.length.resolve_size(min_size, open)
            }
            Selection::Superset => {
                let members = self.slots.iter().filter(|s| !s.is_any_or_none()).count();
                self.length.resolve_size(members, true)
            }
            Selection::Subset => {
                let size = self.length.resolve_size(0, true)?;
                if size > self.slots.len() && !self.slots.iter().any(Slot::is_any_or_none) {
                    return Err(TemplateError::LengthContradiction {
                        size: self.slots.len(),
                        restriction: self.length,
                    });
                }
                Ok(size)
            }
            Selection::Any | Selection::AnyOrOmit => self.length.resolve_size(0, true),
            Selection::ValueList(alternatives) => {
                let mut sizes = alternatives.iter().map(Template::size_of);
                let first = sizes.next().ok_or(TemplateError::NoExactSize)??;
                for size in sizes {
                    if size? != first {
                        return Err(TemplateError::NoExactSize);
                    }
                }
                if !self.length.matches(first) {
                    return Err(TemplateError::LengthContradiction {
                        size: first,
                        restriction: self.length,
                    });
                }
                Ok(first)
            }
            Selection::Omit | Selection::ComplementedList(_) => {
                Err(TemplateError::UnsupportedSelection {
                    operation: "size_of",
                    selection: self.selection.name(),
                })
            }
        }
    }
}

impl<V, P: Pattern<V>> Pattern<[V]> for Template<P> {
    /// Contract violations count as a mismatch here; use
    /// [`try_matches`](Pattern::try_matches) to see them.
    fn matches(&self, value: &[V], options: &MatchOptions) -> bool {
        Template::matches(self, value, options).unwrap_or(false)
    }

    fn try_matches(&self, value: &[V], options: &MatchOptions) -> Result<bool, TemplateError> {
        Template::matches(self, value, options)
    }
}

impl<V, P: Pattern<V>> Pattern<Vec<V>> for Template<P> {
    fn matches(&self, value: &Vec<V>, options: &MatchOptions) -> bool {
        Template::matches(self, value, options).unwrap_or(false)
    }

    fn try_matches(&self, value: &Vec<V>, options: &MatchOptions) -> Result<bool, TemplateError> {
        Template::matches(self, value, options)
    }
}

/// Optional collections: `None` is an omitted value and is judged by
/// [`Template::match_omit`] under [`MatchOptions::legacy`].
impl<V, P: Pattern<V>> Pattern<Option<Vec<V>>> for Template<P> {
    fn matches(&self, value: &Option<Vec<V>>, options: &MatchOptions) -> bool {
        Pattern::<Option<Vec<V>>>::try_matches(self, value, options).unwrap_or(false)
    }

    fn try_matches(&self, value: &Option<Vec<V>>, options: &MatchOptions) -> Result<bool, TemplateError> {
        match value {
            Some(values) => Template::matches(self, values, options),
            None => Ok(self.match_omit(options.legacy)),
        }
    }
}

impl<P: fmt::Display> fmt::Display for Template<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selection {
            Selection::Specific => {
                f.write_str("{ ")?;
                for (i, slot) in self.slots.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if self.permutations.starts_at(i) {
                        f.write_str("permutation(")?;
                    }
                    slot.fmt(f)?;
                    if self.permutations.ends_at(i) {
                        f.write_str(")")?;
                    }
                }
                f.write_str(if self.slots.is_empty() { "}" } else { " }" })?;
            }
            Selection::Superset => write_list(f, "superset", &self.slots)?,
            Selection::Subset => write_list(f, "subset", &self.slots)?,
            Selection::Any => f.write_str("?")?,
            Selection::AnyOrOmit => f.write_str("*")?,
            Selection::Omit => f.write_str("omit")?,
            Selection::ValueList(alternatives) => write_list(f, "", alternatives)?,
            Selection::ComplementedList(alternatives) => write_list(f, "complement", alternatives)?,
        }
        if self.length.is_restricted() {
            write!(f, " {}", self.length)?;
        }
        Ok(())
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, keyword: &str, items: &[T]) -> fmt::Result {
    write!(f, "{keyword}(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt(f)?;
    }
    f.write_str(")")
}

/// Oracle over a value slice and the template's own slots.
///
/// The first contract violation reported by a nested pattern is kept and
/// turned into the overall result once the engine returns.
struct SliceOracle<'a, V, P> {
    values: &'a [V],
    slots: &'a [Slot<P>],
    options: &'a MatchOptions,
    error: Cell<Option<TemplateError>>,
}

impl<'a, V, P> SliceOracle<'a, V, P> {
    fn new(values: &'a [V], slots: &'a [Slot<P>], options: &'a MatchOptions) -> Self {
        SliceOracle {
            values,
            slots,
            options,
            error: Cell::new(None),
        }
    }

    fn record(&self, error: TemplateError) {
        let first = self.error.take().unwrap_or(error);
        self.error.set(Some(first));
    }

    fn finish(self, verdict: bool) -> Result<bool, TemplateError> {
        match self.error.into_inner() {
            Some(error) => Err(error),
            None => Ok(verdict),
        }
    }
}

impl<V, P: Pattern<V>> MatchOracle for SliceOracle<'_, V, P> {
    fn check(&self, probe: Probe, slot: usize) -> bool {
        let slot = &self.slots[slot];
        match probe {
            Probe::Wildcard => slot.is_any_or_none(),
            Probe::Value(value) => match slot {
                Slot::Literal(pattern) => match pattern.try_matches(&self.values[value], self.options) {
                    Ok(found) => found,
                    Err(error) => {
                        self.record(error);
                        false
                    }
                },
                Slot::Any | Slot::AnyOrNone => true,
            },
        }
    }
}

impl<V, P> DescribeMismatch for SliceOracle<'_, V, P>
where
    V: fmt::Debug,
    P: Pattern<V> + fmt::Display,
{
    fn describe_value(&self, value: usize) -> String {
        format!("{:?}", self.values[value])
    }

    fn describe_slot(&self, slot: usize) -> String {
        self.slots[slot].to_string()
    }

    fn explain_pair(&self, value: usize, slot: usize) -> String {
        let element = &self.values[value];
        let nested = match &self.slots[slot] {
            Slot::Literal(pattern) => pattern.explain(element, self.options),
            Slot::Any | Slot::AnyOrNone => None,
        };
        nested.unwrap_or_else(|| format!("{element:?} does not match {}", self.slots[slot]))
    }
}
