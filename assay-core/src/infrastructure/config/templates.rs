// assay-core/src/infrastructure/config/templates.rs

use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use super::is_blank_document;
use crate::domain::template::TemplateStore;
use crate::infrastructure::error::InfrastructureError;

/// Loads the query templates file (name -> SQL fragment).
#[instrument]
pub fn load_templates(path: &Path) -> Result<TemplateStore, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigError(format!(
            "templates file {} not found",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(InfrastructureError::Io)?;
    let store = parse_templates(&content, &path.to_string_lossy())?;

    info!(count = store.len(), "Query templates loaded");
    Ok(store)
}

/// Parses a templates document. Anything other than a non-empty mapping of
/// string -> string is rejected.
pub fn parse_templates(content: &str, origin: &str) -> Result<TemplateStore, InfrastructureError> {
    if is_blank_document(content) {
        return Err(InfrastructureError::ConfigError(format!(
            "templates file {} is empty",
            origin
        )));
    }

    let document: Value = serde_yaml::from_str(content).map_err(InfrastructureError::YamlError)?;

    let mapping = match document {
        Value::Mapping(m) => m,
        Value::Null => {
            return Err(InfrastructureError::ConfigError(format!(
                "templates file {} is empty",
                origin
            )));
        }
        _ => {
            return Err(InfrastructureError::ConfigError(format!(
                "templates file {} must map template names to SQL strings",
                origin
            )));
        }
    };

    let mut raw = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = match key {
            Value::String(s) => s,
            other => {
                return Err(InfrastructureError::ConfigError(format!(
                    "template name {:?} in {} is not a string",
                    other, origin
                )));
            }
        };
        let body = match value {
            Value::String(s) => s,
            _ => {
                return Err(InfrastructureError::ConfigError(format!(
                    "template '{}' in {} is not a string",
                    name, origin
                )));
            }
        };
        raw.push((name, body));
    }

    Ok(TemplateStore::from_raw(raw))
}
