//! Alternating tree for augmenting-path search.

/// One slot reached by the search.
#[derive(Copy, Clone, Debug)]
struct Node {
    slot: usize,
    /// Position of the node that reached this one.
    parent: Option<usize>,
}

/// Slots in breadth-first order, each with a pointer to the slot whose
/// candidate value it currently holds.
///
/// Walking parents from any node back to the root spells out the alternating
/// path to flip when that node finds a free value.
pub(super) struct AlternatingTree {
    nodes: Vec<Node>,
    /// Membership by slot index, so each slot enters at most once.
    seen: Vec<bool>,
}

impl AlternatingTree {
    pub(super) fn new(root: usize, slot_count: usize) -> Self {
        let mut seen = vec![false; slot_count];
        seen[root] = true;
        AlternatingTree {
            nodes: vec![Node { slot: root, parent: None }],
            seen,
        }
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(super) fn slot(&self, at: usize) -> usize {
        self.nodes[at].slot
    }

    #[inline]
    pub(super) fn parent(&self, at: usize) -> Option<usize> {
        self.nodes[at].parent
    }

    #[inline]
    pub(super) fn contains(&self, slot: usize) -> bool {
        self.seen[slot]
    }

    /// Add `slot` as a child of the node at `parent`.
    pub(super) fn push(&mut self, slot: usize, parent: usize) {
        debug_assert!(!self.seen[slot], "slot {slot} already in the tree");
        self.seen[slot] = true;
        self.nodes.push(Node {
            slot,
            parent: Some(parent),
        });
    }
}
