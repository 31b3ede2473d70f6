//! Homework service
//!
//! Reads a list of snailfish numbers and answers the two homework questions:
//! the magnitude of their left-fold sum, and the largest magnitude of any sum
//! of two different numbers.

use std::path::Path;
use std::sync::Arc;

use itertools::iproduct;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{self, Literal, ReductionLimits, ReductionReport, Regular, SnailfishNumber};
use crate::infrastructure::traits::FileSystem;

/// Reduced sum of the whole list.
#[derive(Debug, Clone)]
pub struct SumReport {
    /// Final reduced sum
    pub number: SnailfishNumber,
    pub magnitude: Regular,
    /// Rewrites accumulated over all additions
    pub reductions: ReductionReport,
    /// Numbers that were added
    pub count: usize,
}

/// Best ordered pair of two different numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairReport {
    pub magnitude: Regular,
    /// Index of the left operand in the input
    pub left: usize,
    /// Index of the right operand in the input
    pub right: usize,
}

/// Both homework answers.
#[derive(Debug, Clone)]
pub struct Homework {
    pub sum: SumReport,
    pub largest: PairReport,
}

/// Parses one literal per line, skipping blank lines.
///
/// Every line is also checked to form a valid snailfish number so that
/// errors point at the offending line (1-based).
pub fn parse_numbers(content: &str) -> ApplicationResult<Vec<Literal>> {
    let mut literals = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let literal: Literal = trimmed
            .parse()
            .map_err(|source| ApplicationError::Input { line: i + 1, source })?;
        SnailfishNumber::make(&literal)
            .map_err(|source| ApplicationError::Input { line: i + 1, source })?;
        literals.push(literal);
    }
    debug!("parse_numbers: {} numbers", literals.len());
    Ok(literals)
}

/// Service for snailfish homework.
pub struct HomeworkService {
    fs: Arc<dyn FileSystem>,
    limits: ReductionLimits,
    parallel: bool,
}

impl HomeworkService {
    /// Create a new homework service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: &Settings) -> Self {
        Self {
            fs,
            limits: settings.reduction_limits(),
            parallel: settings.search.parallel,
        }
    }

    pub fn limits(&self) -> &ReductionLimits {
        &self.limits
    }

    /// Load and parse a homework file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<Literal>> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read homework", path)?;
        parse_numbers(&content)
    }

    /// Adds all numbers in input order and reports the magnitude of the result.
    #[instrument(level = "debug", skip_all, fields(count = literals.len()))]
    pub fn final_sum(&self, literals: &[Literal]) -> ApplicationResult<SumReport> {
        let numbers = literals
            .iter()
            .map(SnailfishNumber::make)
            .collect::<Result<Vec<_>, _>>()?;
        let (number, reductions) =
            domain::sum(numbers, &self.limits)?.ok_or(ApplicationError::NoNumbers)?;
        let magnitude = number.magnitude()?;
        info!("final sum {} has magnitude {} ({})", number, magnitude, reductions);
        Ok(SumReport {
            number,
            magnitude,
            reductions,
            count: literals.len(),
        })
    }

    /// Largest magnitude of `a + b` over all ordered pairs of different inputs.
    ///
    /// Both `a + b` and `b + a` are evaluated. Ties keep the first pair in
    /// input order.
    #[instrument(level = "debug", skip_all, fields(count = literals.len(), parallel = self.parallel))]
    pub fn largest_pair(&self, literals: &[Literal]) -> ApplicationResult<PairReport> {
        if literals.len() < 2 {
            return Err(ApplicationError::NotEnoughNumbers {
                found: literals.len(),
            });
        }

        let n = literals.len();
        let pairs: Vec<(usize, usize)> = iproduct!(0..n, 0..n).filter(|(i, j)| i != j).collect();
        let limits = self.limits;
        let evaluate = |&(left, right): &(usize, usize)| -> ApplicationResult<PairReport> {
            let a = SnailfishNumber::make(&literals[left])?;
            let b = SnailfishNumber::make(&literals[right])?;
            let magnitude = a.add(b, &limits)?.magnitude()?;
            Ok(PairReport {
                magnitude,
                left,
                right,
            })
        };

        let reports: Vec<PairReport> = if self.parallel {
            pairs.par_iter().map(&evaluate).collect::<ApplicationResult<_>>()?
        } else {
            pairs.iter().map(&evaluate).collect::<ApplicationResult<_>>()?
        };

        let best = reports
            .into_iter()
            .reduce(|best, report| {
                if report.magnitude > best.magnitude {
                    report
                } else {
                    best
                }
            })
            .ok_or(ApplicationError::NotEnoughNumbers {
                found: literals.len(),
            })?;
        info!(
            "largest magnitude {} from #{} + #{} over {} pairs",
            best.magnitude,
            best.left + 1,
            best.right + 1,
            pairs.len()
        );
        Ok(best)
    }

    /// Both answers for one list of numbers.
    pub fn solve(&self, literals: &[Literal]) -> ApplicationResult<Homework> {
        Ok(Homework {
            sum: self.final_sum(literals)?,
            largest: self.largest_pair(literals)?,
        })
    }
}
