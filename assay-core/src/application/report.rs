// assay-core/src/application/report.rs

use std::path::Path;
use tracing::info;

use crate::application::suite::SuiteResult;
use crate::error::AssayError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

/// Writes the run report as pretty JSON, atomically.
pub fn save_report(path: &Path, result: &SuiteResult) -> Result<(), AssayError> {
    let json = serde_json::to_string_pretty(result).map_err(InfrastructureError::JsonError)?;
    atomic_write(path, json)?;
    info!(path = %path.display(), "Run report written");
    Ok(())
}
