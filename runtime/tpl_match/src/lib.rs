//! Structural matching of value collections against templates.
//!
//! The engine decides whether an ordered collection of values satisfies a
//! template built from literal sub-patterns, `?` and `*` wildcards, and
//! permutation intervals. It never sees values or slots: callers describe
//! both through a [`MatchOracle`] answering "is slot `j` a `*`?" and "does
//! value `i` match slot `j`?".
//!
//! # Matchers
//!
//! - [`match_sequence`]: ordered matching with wildcards, backtracking only
//!   to the most recent `*`.
//! - [`match_set`]: unordered matching in exact, subset or superset mode via
//!   augmenting paths over a memoized bipartite graph.
//! - [`match_permuted_sequence`]: ordered matching with permutation islands.
//!   Dispatches to the two above when the template allows it, otherwise
//!   backtracks over island sizes, using set matching for each island.
//! - [`values_equal`]: multiset equality of two concrete collections under
//!   an [`Equivalence`].
//!
//! [`explain_mismatch`] produces advisory hints after a failed match.
//!
//! # Front End
//!
//! [`Template`] owns its slots and runs the whole caller protocol: length
//! restriction first, then selection handling, then the matcher that fits.
//!
//! # Tracing
//!
//! Dispatch decisions are logged at `debug`, set-matcher growth at `trace`.
//! Call [`init_tracing`] to print them when `RUST_LOG` is set.

mod explain;
mod linear;
mod multiset;
mod options;
mod oracle;
mod permutation;
mod set;
mod stack;
mod template;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use explain::{
    explain_mismatch, DescribeMismatch, Described, Hints, MismatchReport, PairExplanation,
};
pub use linear::match_sequence;
pub use multiset::{multiset_eq, multiset_eq_hashed, values_equal};
pub use options::{MatchOptions, Verbosity, LEGACY_ENV, VERBOSITY_ENV};
pub use oracle::{Equiv, Equivalence, MatchOracle, Probe, SliceEq};
pub use permutation::match_permuted_sequence;
pub use set::match_set;
pub use template::{Collection, Exactly, Pattern, Template};

pub use tpl_ir::{
    LengthRestriction, MatchMode, PermutationInterval, Permutations, Selection, Slot,
    TemplateError,
};

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber for the engine's events.
///
/// Does nothing unless `RUST_LOG` is set; its directives become the filter,
/// e.g. `RUST_LOG=tpl_match=trace`. Returns `true` only for the call that
/// installed the subscriber. A host that already set a global subscriber
/// keeps it.
pub fn init_tracing() -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("RUST_LOG") else {
            return;
        };
        installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::new(directives))
            .try_init()
            .is_ok();
    });
    installed
}
