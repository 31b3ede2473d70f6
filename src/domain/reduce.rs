//! Explode and split rewrites, and the reduction loop that applies them.

use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{Side, SnailfishNumber, Slot};
use crate::domain::error::{DomainError, DomainResult};

/// Default cap on rewrites performed by a single reduction.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Phase of the reduction loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionState {
    Exploding,
    Splitting,
    Stable,
}

/// Guard rails for a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionLimits {
    /// Rewrites allowed before the reduction is abandoned
    pub max_steps: usize,
}

impl Default for ReductionLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Rewrites performed by a reduction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReductionReport {
    pub explosions: usize,
    pub splits: usize,
}

impl ReductionReport {
    pub fn rewrites(&self) -> usize {
        self.explosions + self.splits
    }

    /// Accumulates another report into this one.
    pub fn absorb(&mut self, other: ReductionReport) {
        self.explosions += other.explosions;
        self.splits += other.splits;
    }
}

impl fmt::Display for ReductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} explosions, {} splits", self.explosions, self.splits)
    }
}

impl SnailfishNumber {
    /// Explodes a pair of two regular numbers.
    ///
    /// The left value is added to the nearest regular number on the left, the
    /// right value to the nearest on the right, and the pair is replaced by 0
    /// in its parent's slot.
    #[instrument(level = "trace", skip(self))]
    pub fn explode(&mut self, pair: Index) -> DomainResult<()> {
        let node = self.node(pair)?;
        let (left, right) = match (node.left, node.right) {
            (Slot::Regular(left), Slot::Regular(right)) => (left, right),
            _ => {
                return Err(DomainError::NotExplodable(format!(
                    "{:?} does not hold two regular numbers",
                    pair
                )))
            }
        };
        let (parent, side) = self.side_of(pair).ok_or_else(|| {
            DomainError::NotExplodable(format!("{:?} is the root pair", pair))
        })?;

        // all sums are checked before the tree is touched
        let mut updates = Vec::with_capacity(2);
        for (direction, value) in [(Side::Left, left), (Side::Right, right)] {
            if let Some((holder, slot)) = self.adjacent_regular(pair, direction) {
                let current = self.slot(holder, slot)?.regular().ok_or_else(|| {
                    DomainError::UnknownNode(format!("{:?} {} slot is not regular", holder, slot))
                })?;
                let sum = current.checked_add(value).ok_or_else(|| {
                    DomainError::Overflow(format!("explode adds {} to {}", value, current))
                })?;
                updates.push((holder, slot, sum));
            }
        }
        for (holder, slot, sum) in updates {
            self.set_slot(holder, slot, Slot::Regular(sum))?;
        }

        self.set_slot(parent, side, Slot::Regular(0))?;
        self.remove_pair(pair);
        debug!("exploded [{},{}]", left, right);
        Ok(())
    }

    /// Splits the regular number in `side` of `pair` into a new pair of its
    /// halves, rounding down on the left and up on the right.
    ///
    /// Returns the index of the new pair.
    #[instrument(level = "trace", skip(self))]
    pub fn split(&mut self, pair: Index, side: Side) -> DomainResult<Index> {
        let value = self.slot(pair, side)?.regular().ok_or_else(|| {
            DomainError::NotSplittable(format!("{:?} {} slot holds a pair", pair, side))
        })?;
        let halves = self.insert_pair(value / 2, value - value / 2, Some(pair));
        self.set_slot(pair, side, Slot::Pair(halves))?;
        debug!("split {} into [{},{}]", value, value / 2, value - value / 2);
        Ok(halves)
    }

    /// Reduces the number in place.
    ///
    /// After every single rewrite the search restarts with explosions, so an
    /// explosion always wins over a split. Fails once more than
    /// `limits.max_steps` rewrites have been applied.
    #[instrument(level = "debug", skip(self))]
    pub fn reduce(&mut self, limits: &ReductionLimits) -> DomainResult<ReductionReport> {
        let mut report = ReductionReport::default();
        let mut state = ReductionState::Exploding;
        loop {
            state = match state {
                ReductionState::Exploding => match self.leftmost_exploding_pair() {
                    Some(pair) => {
                        self.explode(pair)?;
                        report.explosions += 1;
                        ReductionState::Exploding
                    }
                    None => ReductionState::Splitting,
                },
                ReductionState::Splitting => match self.leftmost_splitting_number() {
                    Some((pair, side)) => {
                        self.split(pair, side)?;
                        report.splits += 1;
                        ReductionState::Exploding
                    }
                    None => ReductionState::Stable,
                },
                ReductionState::Stable => {
                    trace!("stable after {}", report);
                    return Ok(report);
                }
            };
            if report.rewrites() > limits.max_steps {
                return Err(DomainError::ReductionLimitExceeded {
                    steps: report.rewrites(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn number(input: &str) -> SnailfishNumber {
        input.parse().unwrap()
    }

    #[rstest]
    #[case("[[[[[9,8],1],2],3],4]", "[[[[0,9],2],3],4]")]
    #[case("[7,[6,[5,[4,[3,2]]]]]", "[7,[6,[5,[7,0]]]]")]
    #[case("[[6,[5,[4,[3,2]]]],1]", "[[6,[5,[7,0]]],3]")]
    #[case("[[3,[2,[1,[7,3]]]],[6,[5,[4,[3,2]]]]]", "[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]")]
    #[case("[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]", "[[3,[2,[8,0]]],[9,[5,[7,0]]]]")]
    fn test_single_explode(#[case] input: &str, #[case] expected: &str) {
        let mut n = number(input);
        let pair = n.leftmost_exploding_pair().unwrap();
        n.explode(pair).unwrap();
        assert_eq!(n.to_string(), expected);
    }

    #[test]
    fn test_explode_frees_pair() {
        let mut n = number("[[[[[9,8],1],2],3],4]");
        let pair = n.leftmost_exploding_pair().unwrap();
        n.explode(pair).unwrap();
        assert_eq!(n.pair_count(), 4);
        assert!(matches!(n.explode(pair), Err(DomainError::UnknownNode(_))));
    }

    #[test]
    fn test_explode_root_is_rejected() {
        let mut n = number("[1,2]");
        let root = n.root();
        assert!(matches!(n.explode(root), Err(DomainError::NotExplodable(_))));
    }

    #[test]
    fn test_explode_nested_pair_is_rejected() {
        let mut n = number("[[1,2],3]");
        let root = n.root();
        assert!(matches!(n.explode(root), Err(DomainError::NotExplodable(_))));
    }

    #[test]
    fn test_single_split() {
        let mut n = number("[11,1]");
        let (pair, side) = n.leftmost_splitting_number().unwrap();
        let halves = n.split(pair, side).unwrap();
        assert_eq!(n.to_string(), "[[5,6],1]");
        assert_eq!(n.side_of(halves), Some((pair, Side::Left)));
    }

    #[test]
    fn test_split_even_value() {
        let mut n = number("[1,10]");
        let root = n.root();
        n.split(root, Side::Right).unwrap();
        assert_eq!(n.to_string(), "[1,[5,5]]");
    }

    #[test]
    fn test_split_pair_slot_is_rejected() {
        let mut n = number("[[1,2],3]");
        let root = n.root();
        assert!(matches!(
            n.split(root, Side::Left),
            Err(DomainError::NotSplittable(_))
        ));
    }

    #[test]
    fn test_reduce_explodes_before_splitting() {
        let mut n = number("[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]");
        let report = n.reduce(&ReductionLimits::default()).unwrap();
        assert_eq!(n.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
        assert_eq!(report, ReductionReport { explosions: 3, splits: 2 });
    }

    #[test]
    fn test_reduce_is_idempotent_once_stable() {
        let mut n = number("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
        let report = n.reduce(&ReductionLimits::default()).unwrap();
        assert_eq!(report.rewrites(), 0);
        assert_eq!(n.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
    }

    #[test]
    fn test_reduce_respects_step_cap() {
        let mut n = number("[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]");
        let result = n.reduce(&ReductionLimits { max_steps: 3 });
        assert_eq!(
            result,
            Err(DomainError::ReductionLimitExceeded { steps: 4 })
        );
    }

    #[test]
    fn test_reduce_splits_large_values_repeatedly() {
        let mut n = number("[40,1]");
        n.reduce(&ReductionLimits::default()).unwrap();
        let values = n.regular_values();
        assert!(values.iter().all(|&v| v < 10), "{}", n);
        assert!(n.depth() <= 4, "{}", n);
        assert_eq!(n.leftmost_exploding_pair(), None);
    }

    #[test]
    fn test_explode_overflow_leaves_tree_untouched() {
        let input = "[[[[[1,18446744073709551615],18446744073709551615],2],3],4]";
        let mut n = number(input);
        let pair = n.leftmost_exploding_pair().unwrap();
        assert!(matches!(n.explode(pair), Err(DomainError::Overflow(_))));
        assert_eq!(n.to_string(), input);

        let result = n.reduce(&ReductionLimits::default());
        assert!(matches!(result, Err(DomainError::Overflow(_))));
    }
}
