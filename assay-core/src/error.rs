// assay-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum AssayError {
    // --- DOMAIN ERRORS (templates, inputs, verdicts) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, database) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for AssayError {
    fn from(err: std::io::Error) -> Self {
        AssayError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for AssayError {
    fn from(err: duckdb::Error) -> Self {
        AssayError::Infrastructure(InfrastructureError::from(err))
    }
}

impl AssayError {
    /// True when the failure is a data-quality verdict rather than a broken setup.
    pub fn is_violation(&self) -> bool {
        matches!(
            self,
            AssayError::Domain(DomainError::AssertionViolation { .. })
        )
    }
}
