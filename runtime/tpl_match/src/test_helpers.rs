//! Shared fixtures for unit tests: a tiny pattern language over integers and
//! an oracle that counts how often it is consulted.

use std::cell::Cell;

use crate::oracle::{MatchOracle, Probe};

/// Test-side slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum P {
    /// Equal to the integer.
    Lit(i32),
    /// Greater than or equal to the integer.
    AtLeast(i32),
    /// Any even integer.
    Even,
    /// `?`
    Any,
    /// `*`
    Star,
}

impl P {
    fn accepts(self, value: i32) -> bool {
        match self {
            P::Lit(n) => value == n,
            P::AtLeast(n) => value >= n,
            P::Even => value % 2 == 0,
            P::Any => true,
            P::Star => false,
        }
    }
}

/// Oracle over a value slice and a slot slice.
pub(crate) struct Fixture<'a> {
    pub values: &'a [i32],
    pub slots: &'a [P],
    pub calls: Cell<usize>,
    pub value_calls: Cell<usize>,
}

impl<'a> Fixture<'a> {
    pub(crate) fn new(values: &'a [i32], slots: &'a [P]) -> Self {
        Fixture {
            values,
            slots,
            calls: Cell::new(0),
            value_calls: Cell::new(0),
        }
    }
}

impl MatchOracle for Fixture<'_> {
    fn check(&self, probe: Probe, slot: usize) -> bool {
        self.calls.set(self.calls.get() + 1);
        let pattern = self.slots[slot];
        match probe {
            Probe::Wildcard => pattern == P::Star,
            Probe::Value(value) => {
                self.value_calls.set(self.value_calls.get() + 1);
                pattern.accepts(self.values[value])
            }
        }
    }
}

/// Literal slots for each integer.
pub(crate) fn lits(values: &[i32]) -> Vec<P> {
    values.iter().copied().map(P::Lit).collect()
}
