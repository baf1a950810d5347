// assay-core/src/infrastructure/config/tasks.rs

// tasks.yaml declares the SQL tasks the harness can run:
//
//   load_orders:
//     inputs:
//       - data/orders.csv
//       - other: crm_api
//     sql: CREATE OR REPLACE TABLE ${destination} AS SELECT * FROM read_csv_auto('${input}')

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::task::{InputDescriptor, TaskRegistry};
use crate::infrastructure::adapters::SqlTask;
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
enum RawInput {
    Path(String),
    Other { other: String },
}

impl From<RawInput> for InputDescriptor {
    fn from(raw: RawInput) -> Self {
        match raw {
            RawInput::Path(p) => InputDescriptor::HasPath(PathBuf::from(p)),
            RawInput::Other { other } => InputDescriptor::Other(other),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
struct RawTask {
    #[serde(default)]
    inputs: Vec<RawInput>,
    sql: String,
    destination: Option<String>,
}

/// Builds the task registry from a tasks file. A missing file yields an empty
/// registry: tasks may also be registered from code.
#[instrument(skip(base_dir))]
pub fn load_tasks(path: &Path, base_dir: &Path) -> Result<TaskRegistry, InfrastructureError> {
    let mut registry = TaskRegistry::new();

    if !path.exists() {
        warn!("No tasks file found, starting with an empty registry");
        return Ok(registry);
    }

    let content = fs::read_to_string(path).map_err(InfrastructureError::Io)?;
    if super::is_blank_document(&content) {
        return Ok(registry);
    }

    let raw: BTreeMap<String, RawTask> = serde_yaml::from_str(&content).map_err(|e| {
        InfrastructureError::ConfigError(format!("invalid tasks file {}: {}", path.display(), e))
    })?;

    for (name, task) in raw {
        let destination = task.destination.unwrap_or_else(|| name.clone());
        let inputs: Vec<InputDescriptor> = task.inputs.into_iter().map(Into::into).collect();
        let base_dir = base_dir.to_path_buf();
        let task_name = name.clone();
        let sql = task.sql;

        registry.register(name, move || {
            Box::new(SqlTask::new(
                task_name.clone(),
                destination.clone(),
                inputs.clone(),
                &sql,
                base_dir.clone(),
            ))
        });
    }

    info!(count = registry.len(), "Tasks registered");
    Ok(registry)
}
