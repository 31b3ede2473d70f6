//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::literal::MAX_NESTING;

/// Domain errors represent violations of the snailfish number rules.
/// These are independent of input sources and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed snailfish literal '{literal}': {reason}")]
    MalformedLiteral { literal: String, reason: String },

    #[error("unknown pair node: {0}")]
    UnknownNode(String),

    #[error("pair cannot explode: {0}")]
    NotExplodable(String),

    #[error("value cannot split: {0}")]
    NotSplittable(String),

    #[error("regular number overflow: {0}")]
    Overflow(String),

    #[error("reduction did not stabilise after {steps} rewrites")]
    ReductionLimitExceeded { steps: usize },
}

impl DomainError {
    pub(crate) fn malformed(literal: impl ToString, reason: impl Into<String>) -> Self {
        DomainError::MalformedLiteral {
            literal: literal.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn too_deep(excerpt: impl ToString, depth: usize) -> Self {
        Self::malformed(
            excerpt,
            format!("nesting of {} exceeds the limit of {}", depth, MAX_NESTING),
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
