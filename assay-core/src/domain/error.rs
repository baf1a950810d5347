// assay-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unknown requirement '{0}': no query template with that name")]
    #[diagnostic(
        code(assay::domain::template_key),
        help("Add a '{0}' entry to your templates file or fix the requirement name.")
    )]
    TemplateKey(String),

    #[error("No input of task '{task}' has a path containing '{marker}'")]
    #[diagnostic(
        code(assay::domain::input_resolution),
        help("Declare a file input whose path contains '{marker}', or set 'primary_input' in the assertion.")
    )]
    InputResolution { task: String, marker: String },

    #[error("Task {0} failed")]
    #[diagnostic(code(assay::domain::task_failed))]
    TaskExecutionFailure(String),

    #[error("Task '{0}' is not registered")]
    #[diagnostic(
        code(assay::domain::task_not_found),
        help("Declare the task in tasks.yaml or set 'source' in the assertion.")
    )]
    TaskNotFound(String),

    #[error("Column `{column}` violated assertion {requirement} [query: {query}]")]
    #[diagnostic(
        code(assay::domain::assertion),
        help("Replay the query against the database to inspect the offending rows.")
    )]
    AssertionViolation {
        column: String,
        requirement: String,
        query: String,
    },
}
