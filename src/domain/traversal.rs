//! Leftmost-first search over the pairs of a snailfish number.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::{PairNode, Side, SnailfishNumber, Slot};
use crate::domain::literal::Regular;

/// Nesting depth (root = 0) at which a pair of regular numbers explodes.
pub const EXPLODE_DEPTH: usize = 4;

/// Regular numbers at or above this value split.
pub const SPLIT_THRESHOLD: Regular = 10;

impl SnailfishNumber {
    /// Finds the leftmost pair satisfying `predicate`.
    ///
    /// The walk is depth-first and left-before-right. The predicate is
    /// consulted on every pair with at least one regular slot, right before
    /// that slot's position in the in-order sequence, and receives the state
    /// threaded down to the pair. `next_state` derives a child's state from
    /// its parent's. Returns the pair together with the predicate's result.
    pub fn leftmost_pair_satisfying<S, R, P, F>(
        &self,
        predicate: P,
        state: S,
        next_state: F,
    ) -> Option<(Index, R)>
    where
        S: Copy,
        P: Fn(&PairNode, S) -> Option<R>,
        F: Fn(S) -> S,
    {
        self.search(self.root(), &predicate, state, &next_state)
    }

    fn search<S, R, P, F>(&self, idx: Index, predicate: &P, state: S, next_state: &F) -> Option<(Index, R)>
    where
        S: Copy,
        P: Fn(&PairNode, S) -> Option<R>,
        F: Fn(S) -> S,
    {
        let node = self.node(idx).ok()?;
        for side in Side::BOTH {
            match node.slot(side) {
                Slot::Regular(_) => {
                    if let Some(result) = predicate(node, state) {
                        return Some((idx, result));
                    }
                }
                Slot::Pair(child) => {
                    if let Some(found) = self.search(child, predicate, next_state(state), next_state) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Leftmost pair of two regular numbers nested inside four pairs.
    #[instrument(level = "trace", skip(self))]
    pub fn leftmost_exploding_pair(&self) -> Option<Index> {
        self.leftmost_pair_satisfying(
            |node, depth| (depth >= EXPLODE_DEPTH && node.is_regular_pair()).then_some(()),
            0usize,
            |depth| depth + 1,
        )
        .map(|(idx, ())| idx)
    }

    /// Pair and slot holding the leftmost regular number of 10 or more.
    #[instrument(level = "trace", skip(self))]
    pub fn leftmost_splitting_number(&self) -> Option<(Index, Side)> {
        self.leftmost_pair_satisfying(
            |node, ()| {
                Side::BOTH.into_iter().find(|&side| {
                    matches!(node.slot(side), Slot::Regular(value) if value >= SPLIT_THRESHOLD)
                })
            },
            (),
            |()| (),
        )
    }
}
