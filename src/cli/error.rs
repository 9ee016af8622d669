//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        Self::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Catalog { .. } => crate::exitcode::DATAERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::CategoryNotFound(_) | ApplicationError::ProductNotFound(_) => {
                        crate::exitcode::NOINPUT
                    }
                    ApplicationError::Domain(DomainError::CycleDetected(_))
                    | ApplicationError::Domain(DomainError::DuplicateCategoryId(_))
                    | ApplicationError::Domain(DomainError::DuplicateCategoryAlias(_)) => {
                        crate::exitcode::DATAERR
                    }
                    _ => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_missing_category_when_mapping_exit_code_then_noinput() {
        let err = CliError::from(ApplicationError::CategoryNotFound("x".into()));
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_cycle_when_mapping_exit_code_then_dataerr() {
        let err = CliError::from(ApplicationError::Domain(DomainError::CycleDetected("x".into())));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }
}
