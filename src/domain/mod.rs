//! Domain layer: snailfish numbers and their arithmetic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod arithmetic;
pub mod error;
pub mod literal;
pub mod neighbor;
pub mod reduce;
pub mod render;
pub mod traversal;

pub use arena::{PairIterator, PairNode, Side, Slot, SnailfishNumber};
pub use arithmetic::sum;
pub use error::{DomainError, DomainResult};
pub use literal::{Literal, Regular, MAX_NESTING};
pub use reduce::{ReductionLimits, ReductionReport, ReductionState, DEFAULT_MAX_STEPS};
pub use render::TreeConvert;
pub use traversal::{EXPLODE_DEPTH, SPLIT_THRESHOLD};
