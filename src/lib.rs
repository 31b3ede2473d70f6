//! Snailfish number arithmetic.
//!
//! A snailfish number is a binary tree of pairs whose leaves are regular
//! numbers. Adding two numbers pairs them under a new root and reduces the
//! result by repeatedly exploding deeply nested pairs and splitting large
//! regular numbers. The magnitude folds a tree into a single integer.
//!
//! ```
//! use snailfish::domain::{ReductionLimits, SnailfishNumber};
//!
//! let a: SnailfishNumber = "[[[[4,3],4],4],[7,[[8,4],9]]]".parse().unwrap();
//! let b: SnailfishNumber = "[1,1]".parse().unwrap();
//! let sum = a.add(b, &ReductionLimits::default()).unwrap();
//! assert_eq!(sum.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
//! assert_eq!(sum.magnitude().unwrap(), 1384);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
