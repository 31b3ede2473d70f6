//! Snailfish addition and magnitude.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{PairNode, Side, SnailfishNumber, Slot};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::literal::Regular;
use crate::domain::reduce::{ReductionLimits, ReductionReport};

impl SnailfishNumber {
    /// Pairs `self` and `other` under a new root without reducing.
    ///
    /// `other`'s pairs are copied into this number's arena; both operands
    /// are consumed.
    pub fn join(mut self, other: SnailfishNumber) -> DomainResult<SnailfishNumber> {
        let left = self.root();
        let right = self.graft(&other)?;
        let root = self.insert_node(PairNode {
            left: Slot::Regular(0),
            right: Slot::Regular(0),
            parent: None,
        });
        self.set_slot(root, Side::Left, Slot::Pair(left))?;
        self.set_slot(root, Side::Right, Slot::Pair(right))?;
        self.set_root(root);
        Ok(self)
    }

    /// Adds two numbers and reduces the result.
    #[instrument(level = "debug", skip_all)]
    pub fn add(self, other: SnailfishNumber, limits: &ReductionLimits) -> DomainResult<SnailfishNumber> {
        self.add_reporting(other, limits).map(|(sum, _)| sum)
    }

    /// Like [`add`](Self::add), also returning the rewrites the reduction performed.
    pub fn add_reporting(
        self,
        other: SnailfishNumber,
        limits: &ReductionLimits,
    ) -> DomainResult<(SnailfishNumber, ReductionReport)> {
        let mut sum = self.join(other)?;
        let report = sum.reduce(limits)?;
        debug!("sum {} ({})", sum, report);
        Ok((sum, report))
    }

    /// Weighted fold: three times the left magnitude plus twice the right.
    ///
    /// Fails with [`DomainError::Overflow`] when the fold does not fit a [`Regular`].
    pub fn magnitude(&self) -> DomainResult<Regular> {
        self.pair_magnitude(self.root())
    }

    fn pair_magnitude(&self, idx: Index) -> DomainResult<Regular> {
        let node = self.node(idx)?;
        let left = self.slot_magnitude(node.left)?;
        let right = self.slot_magnitude(node.right)?;
        left.checked_mul(3)
            .zip(right.checked_mul(2))
            .and_then(|(left, right)| left.checked_add(right))
            .ok_or_else(|| DomainError::Overflow(format!("magnitude 3*{} + 2*{}", left, right)))
    }

    fn slot_magnitude(&self, slot: Slot) -> DomainResult<Regular> {
        match slot {
            Slot::Regular(value) => Ok(value),
            Slot::Pair(child) => self.pair_magnitude(child),
        }
    }
}

/// Left fold of `numbers` with snailfish addition: `((a + b) + c) + ...`.
///
/// Returns `None` for an empty sequence, together with the accumulated rewrites.
#[instrument(level = "debug", skip_all)]
pub fn sum<I>(numbers: I, limits: &ReductionLimits) -> DomainResult<Option<(SnailfishNumber, ReductionReport)>>
where
    I: IntoIterator<Item = SnailfishNumber>,
{
    let mut numbers = numbers.into_iter();
    let Some(first) = numbers.next() else {
        return Ok(None);
    };
    let mut total = ReductionReport::default();
    let sum = numbers.try_fold(first, |acc, next| {
        let (sum, report) = acc.add_reporting(next, limits)?;
        total.absorb(report);
        Ok::<_, DomainError>(sum)
    })?;
    Ok(Some((sum, total)))
}
