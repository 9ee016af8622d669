//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("catalog store error: {message}")]
    Store { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
