//! Data model for structural template matching.
//!
//! A *template* describes the acceptable shapes of an ordered collection of
//! values. This crate holds the pieces a template is built from; the
//! algorithms that decide whether a value satisfies a template live in
//! `tpl_match`.
//!
//! # Contents
//!
//! - [`Slot`]: one template position, a literal sub-pattern or a wildcard
//!   (`?` matches exactly one value, `*` matches zero or more).
//! - [`Permutations`]: ordered, disjoint [`PermutationInterval`]s marking
//!   template ranges whose members may match the values in any order.
//! - [`LengthRestriction`]: declared exact or ranged length of the value,
//!   checked before any element-level work.
//! - [`Selection`] and [`MatchMode`]: what kind of template a collection
//!   template is, and the set semantics it implies.
//! - [`TemplateError`]: contract violations. An ordinary non-match is never
//!   an error.
//!
//! # Crate Dependencies
//!
//! No matching logic and no dependency on `tpl_match`. Template construction
//! code can build and validate templates without pulling in the engine.

mod error;
mod length;
mod mode;
mod permutation;
mod slot;

pub use error::TemplateError;
pub use length::LengthRestriction;
pub use mode::{MatchMode, Selection};
pub use permutation::{PermutationInterval, Permutations};
pub use slot::Slot;
