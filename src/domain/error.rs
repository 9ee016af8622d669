//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::CategoryId;

/// Domain errors represent violations of the catalog's structural rules.
/// These are independent of storage and presentation concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cycle detected in category hierarchy at: {0}")]
    CycleDetected(String),

    #[error("category node not found in arena: {0}")]
    NodeNotFound(String),

    #[error("duplicate category id: {0}")]
    DuplicateCategoryId(CategoryId),

    #[error("duplicate category alias: {0}")]
    DuplicateCategoryAlias(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
