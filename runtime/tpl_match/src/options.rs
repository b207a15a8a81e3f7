//! Matching configuration.

use std::fmt;

/// Environment variable selecting the explainer verbosity.
pub const VERBOSITY_ENV: &str = "TPL_MATCH_VERBOSITY";

/// Environment variable enabling legacy omit-matching semantics.
pub const LEGACY_ENV: &str = "TPL_MATCH_LEGACY";

/// How much the mismatch explainer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only the nested explanations for unmatched value/slot pairs.
    Compact,
    /// Unmatched elements, unmatched slots, every candidate pair, and the
    /// nested explanations.
    #[default]
    Detailed,
}

impl Verbosity {
    /// Parse a verbosity name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "detailed" | "full" => Some(Self::Detailed),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_compact(self) -> bool {
        matches!(self, Self::Compact)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Detailed => write!(f, "detailed"),
        }
    }
}

/// Options threaded through one top-level match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Legacy omit-matching semantics: lets `omit` inside value and
    /// complemented lists decide whether an omitted value matches. Read by
    /// [`Template`](crate::Template) for `Option` values and handed
    /// unchanged to every element-level pattern check.
    pub legacy: bool,
    /// Shape of mismatch explanations.
    pub verbosity: Verbosity,
}

impl MatchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from `TPL_MATCH_VERBOSITY` and `TPL_MATCH_LEGACY`.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(verbosity) = lookup(VERBOSITY_ENV).as_deref().and_then(Verbosity::parse) {
            options.verbosity = verbosity;
        }
        if let Some(legacy) = lookup(LEGACY_ENV) {
            options.legacy = matches!(legacy.trim(), "1" | "true" | "yes" | "on");
        }
        options
    }

    #[must_use]
    pub fn with_legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}
