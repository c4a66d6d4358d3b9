//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy and layout rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("document contains no records")]
    EmptyDocument,

    #[error("malformed hierarchy at record {record_index}: depth cannot be reconciled with the current position")]
    MalformedHierarchy { record_index: usize },

    #[error("layout invariant violated: {0}")]
    InvariantViolation(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
