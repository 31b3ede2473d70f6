//! Nearest regular number to the left or right of a pair.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::{Side, SnailfishNumber, Slot};

impl SnailfishNumber {
    /// Lowest ancestor of `idx` that holds it (transitively) in its `side` slot.
    pub fn lowest_ancestor_from(&self, idx: Index, side: Side) -> Option<Index> {
        let mut current = idx;
        while let Some((parent, entered)) = self.side_of(current) {
            if entered == side {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Follows `side` slots down from `idx` until the slot holds a regular number.
    pub fn lowest_child_towards(&self, idx: Index, side: Side) -> Option<Index> {
        let mut current = idx;
        loop {
            match self.node(current).ok()?.slot(side) {
                Slot::Regular(_) => return Some(current),
                Slot::Pair(child) => current = child,
            }
        }
    }

    /// Pair and slot holding the regular number immediately before
    /// (`Side::Left`) or after (`Side::Right`) the subtree rooted at `idx`.
    ///
    /// Walks up to the pivot, the lowest ancestor entered from the opposite
    /// slot, then down the pivot's `direction` child hugging the opposite side.
    #[instrument(level = "trace", skip(self))]
    pub fn adjacent_regular(&self, idx: Index, direction: Side) -> Option<(Index, Side)> {
        let pivot = self.lowest_ancestor_from(idx, direction.opposite())?;
        match self.node(pivot).ok()?.slot(direction) {
            Slot::Regular(_) => Some((pivot, direction)),
            Slot::Pair(child) => {
                let inward = direction.opposite();
                self.lowest_child_towards(child, inward)
                    .map(|holder| (holder, inward))
            }
        }
    }
}
