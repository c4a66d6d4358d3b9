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

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Internal(_) => crate::exitcode::SOFTWARE,
            CliError::Infra(InfraError::Io { .. }) => crate::exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(DomainError::EmptyDocument)
                | ApplicationError::Domain(DomainError::MalformedHierarchy { .. }) => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Domain(DomainError::NodeNotFound(_)) => crate::exitcode::USAGE,
                ApplicationError::Domain(DomainError::InvariantViolation(_)) => {
                    crate::exitcode::SOFTWARE
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::NOINPUT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_malformed_document_when_mapping_exit_code_then_dataerr() {
        let err: CliError = DomainError::MalformedHierarchy { record_index: 3 }.into();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert!(err.to_string().contains("record 3"));
    }

    #[test]
    fn given_unknown_node_when_mapping_exit_code_then_usage() {
        let err: CliError = DomainError::NodeNotFound("a/b".into()).into();
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn given_config_error_when_mapping_exit_code_then_config() {
        let err: CliError = ApplicationError::Config {
            message: "bad".into(),
        }
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::CONFIG);
    }

    #[test]
    fn given_internal_error_when_mapping_exit_code_then_software() {
        let err = CliError::Internal("broken".into());
        assert_eq!(err.exit_code(), crate::exitcode::SOFTWARE);
        assert_eq!(err.to_string(), "internal error: broken");
    }
}
