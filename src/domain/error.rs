//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::EntryId;

/// Domain errors represent business rule violations.
///
/// The menu store reports `EntryNotFound` and `InvalidOperation` to its
/// callers; the service layer treats both as no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("menu entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("invalid menu operation: {0}")]
    InvalidOperation(String),

    #[error("duplicate menu entry id: {0}")]
    DuplicateId(EntryId),

    #[error("{0}")]
    InvalidContent(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
