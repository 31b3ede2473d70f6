use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::literal::{Literal, Regular, MAX_NESTING};

/// Which slot of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides in traversal order.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Content of a pair slot: a regular number or a nested pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Regular(Regular),
    Pair(Index),
}

impl Slot {
    pub fn regular(self) -> Option<Regular> {
        match self {
            Slot::Regular(value) => Some(value),
            Slot::Pair(_) => None,
        }
    }

    pub fn pair(self) -> Option<Index> {
        match self {
            Slot::Pair(idx) => Some(idx),
            Slot::Regular(_) => None,
        }
    }
}

/// Pair node in the arena-based tree.
#[derive(Debug, Clone)]
pub struct PairNode {
    pub left: Slot,
    pub right: Slot,
    /// Index of the enclosing pair in the arena, None for the root
    pub parent: Option<Index>,
}

impl PairNode {
    pub fn slot(&self, side: Side) -> Slot {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// True when both slots hold regular numbers.
    pub fn is_regular_pair(&self) -> bool {
        matches!((self.left, self.right), (Slot::Regular(_), Slot::Regular(_)))
    }
}

/// A snailfish number: a binary tree of pairs stored in a generational arena.
///
/// Pairs reference their children and their parent by arena index, so upward
/// walks never fight the borrow checker and a pair removed by an explosion
/// leaves behind an index that can no longer be resolved.
#[derive(Debug, Clone)]
pub struct SnailfishNumber {
    arena: Arena<PairNode>,
    root: Index,
}

impl SnailfishNumber {
    /// Builds a tree top-down from a literal.
    ///
    /// Every list in the literal must have exactly two elements, the top
    /// level must be a list and nesting may not exceed [`MAX_NESTING`].
    #[instrument(level = "trace", skip_all, fields(literal = %literal))]
    pub fn make(literal: &Literal) -> DomainResult<Self> {
        if literal.is_regular() {
            return Err(DomainError::malformed(
                literal,
                "a snailfish number must be a pair",
            ));
        }
        let mut arena = Arena::new();
        let root = Self::build_pair(&mut arena, literal, None, 1)?;
        Ok(Self { arena, root })
    }

    fn build_pair(
        arena: &mut Arena<PairNode>,
        literal: &Literal,
        parent: Option<Index>,
        depth: usize,
    ) -> DomainResult<Index> {
        if depth > MAX_NESTING {
            return Err(DomainError::too_deep("<nested list>", depth));
        }
        let (left, right) = match literal {
            Literal::List(items) if items.len() == 2 => (&items[0], &items[1]),
            Literal::List(items) => {
                return Err(DomainError::malformed(
                    literal,
                    format!("expected a pair of two elements, found {}", items.len()),
                ))
            }
            Literal::Regular(_) => {
                return Err(DomainError::malformed(literal, "expected a pair"));
            }
        };

        let idx = arena.insert(PairNode {
            left: Slot::Regular(0),
            right: Slot::Regular(0),
            parent,
        });
        for (side, child) in [(Side::Left, left), (Side::Right, right)] {
            let slot = match child {
                Literal::Regular(value) => Slot::Regular(*value),
                Literal::List(_) => {
                    Slot::Pair(Self::build_pair(arena, child, Some(idx), depth + 1)?)
                }
            };
            if let Some(node) = arena.get_mut(idx) {
                *node.slot_mut(side) = slot;
            }
        }
        Ok(idx)
    }

    /// Structural inverse of [`make`](Self::make).
    pub fn unmake(&self) -> Literal {
        self.unmake_pair(self.root)
    }

    /// Literal of the subtree rooted at `idx`.
    pub fn subtree_literal(&self, idx: Index) -> Literal {
        self.unmake_pair(idx)
    }

    fn unmake_pair(&self, idx: Index) -> Literal {
        match self.arena.get(idx) {
            Some(node) => Literal::List(
                Side::BOTH
                    .iter()
                    .map(|&side| match node.slot(side) {
                        Slot::Regular(value) => Literal::Regular(value),
                        Slot::Pair(child) => self.unmake_pair(child),
                    })
                    .collect(),
            ),
            None => Literal::List(Vec::new()),
        }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn node(&self, idx: Index) -> DomainResult<&PairNode> {
        self.arena
            .get(idx)
            .ok_or_else(|| DomainError::UnknownNode(format!("{:?}", idx)))
    }

    fn node_mut(&mut self, idx: Index) -> DomainResult<&mut PairNode> {
        self.arena
            .get_mut(idx)
            .ok_or_else(|| DomainError::UnknownNode(format!("{:?}", idx)))
    }

    pub fn slot(&self, idx: Index, side: Side) -> DomainResult<Slot> {
        Ok(self.node(idx)?.slot(side))
    }

    /// Overwrites a slot; a nested pair placed into the slot is reparented to `idx`.
    pub fn set_slot(&mut self, idx: Index, side: Side, slot: Slot) -> DomainResult<()> {
        if let Slot::Pair(child) = slot {
            self.node_mut(child)?.parent = Some(idx);
        }
        *self.node_mut(idx)?.slot_mut(side) = slot;
        Ok(())
    }

    /// Parent of `child` and the slot of the parent that holds it.
    pub fn side_of(&self, child: Index) -> Option<(Index, Side)> {
        let parent = self.arena.get(child)?.parent?;
        let node = self.arena.get(parent)?;
        Side::BOTH
            .into_iter()
            .find(|&side| node.slot(side) == Slot::Pair(child))
            .map(|side| (parent, side))
    }

    /// Inserts a detached pair of two regular numbers.
    pub(crate) fn insert_pair(&mut self, left: Regular, right: Regular, parent: Option<Index>) -> Index {
        self.arena.insert(PairNode {
            left: Slot::Regular(left),
            right: Slot::Regular(right),
            parent,
        })
    }

    pub(crate) fn insert_node(&mut self, node: PairNode) -> Index {
        self.arena.insert(node)
    }

    pub(crate) fn remove_pair(&mut self, idx: Index) -> Option<PairNode> {
        self.arena.remove(idx)
    }

    pub(crate) fn set_root(&mut self, idx: Index) {
        self.root = idx;
    }

    /// Copies every pair of `other` into this arena, returning the index of
    /// the copied root. The copy is detached (no parent).
    pub(crate) fn graft(&mut self, other: &SnailfishNumber) -> DomainResult<Index> {
        self.graft_pair(other, other.root, None)
    }

    fn graft_pair(
        &mut self,
        other: &SnailfishNumber,
        idx: Index,
        parent: Option<Index>,
    ) -> DomainResult<Index> {
        let source = other.node(idx)?.clone();
        let copied = self.insert_node(PairNode {
            left: Slot::Regular(0),
            right: Slot::Regular(0),
            parent,
        });
        for side in Side::BOTH {
            let slot = match source.slot(side) {
                Slot::Regular(value) => Slot::Regular(value),
                Slot::Pair(child) => Slot::Pair(self.graft_pair(other, child, Some(copied))?),
            };
            *self.node_mut(copied)?.slot_mut(side) = slot;
        }
        Ok(copied)
    }

    /// Number of pairs in the tree.
    pub fn pair_count(&self) -> usize {
        self.arena.len()
    }

    /// Maximum pair nesting; a single pair of regular numbers has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|(_, _, depth)| depth + 1).max().unwrap_or(0)
    }

    /// Regular numbers in left-to-right order.
    #[instrument(level = "debug", skip(self))]
    pub fn regular_values(&self) -> Vec<Regular> {
        let mut values = Vec::new();
        self.collect_regulars(self.root, &mut values);
        values
    }

    fn collect_regulars(&self, idx: Index, values: &mut Vec<Regular>) {
        if let Some(node) = self.arena.get(idx) {
            for side in Side::BOTH {
                match node.slot(side) {
                    Slot::Regular(value) => values.push(value),
                    Slot::Pair(child) => self.collect_regulars(child, values),
                }
            }
        }
    }

    /// Pre-order walk over pairs, yielding each pair with its depth (root = 0).
    pub fn iter(&self) -> PairIterator<'_> {
        PairIterator::new(self)
    }
}

impl PartialEq for SnailfishNumber {
    fn eq(&self, other: &Self) -> bool {
        self.unmake() == other.unmake()
    }
}

impl Eq for SnailfishNumber {}

impl fmt::Display for SnailfishNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unmake())
    }
}

impl TryFrom<&Literal> for SnailfishNumber {
    type Error = DomainError;

    fn try_from(literal: &Literal) -> Result<Self, Self::Error> {
        Self::make(literal)
    }
}

impl std::str::FromStr for SnailfishNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::make(&s.parse()?)
    }
}

pub struct PairIterator<'a> {
    number: &'a SnailfishNumber,
    stack: Vec<(Index, usize)>,
}

impl<'a> PairIterator<'a> {
    fn new(number: &'a SnailfishNumber) -> Self {
        Self {
            number,
            stack: vec![(number.root, 0)],
        }
    }
}

impl<'a> Iterator for PairIterator<'a> {
    type Item = (Index, &'a PairNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.number.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for side in [Side::Right, Side::Left] {
                    if let Slot::Pair(child) = node.slot(side) {
                        self.stack.push((child, depth + 1));
                    }
                }
                return Some((current_idx, node, depth));
            }
        }
        None
    }
}
