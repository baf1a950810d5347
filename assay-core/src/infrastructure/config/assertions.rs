// assay-core/src/infrastructure/config/assertions.rs

// Assertion files map a task id to the checks to run on its destination:
//
//   orders:
//     destination: analytics.orders   # optional, defaults to the task id
//     columns:
//       - id: [not_null, unique]
//       - amount: [not_null]

use regex::Regex;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use super::is_blank_document;
use crate::domain::assertion::{AssertionSpec, ColumnChecks};
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAssertion {
    source: Option<String>,
    destination: Option<String>,
    primary_input: Option<String>,
    columns: Vec<Mapping>,
}

/// Loads every assertion file matching `pattern` into one flat list.
///
/// Files are read in path order, entries in document order. A task id may
/// only be declared once across all files.
#[instrument(skip_all, fields(pattern = %pattern.display()))]
pub fn load_all(pattern: &Path) -> Result<Vec<(String, AssertionSpec)>, InfrastructureError> {
    let files = match_files(pattern)?;
    if files.is_empty() {
        warn!("No assertion file matches the pattern");
    }

    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut all = Vec::new();

    for file in files {
        let content = fs::read_to_string(&file).map_err(InfrastructureError::Io)?;
        let entries = parse_assertions(&content, &file.to_string_lossy())?;

        for (task_id, spec) in entries {
            if let Some(first) = seen.get(&task_id) {
                return Err(InfrastructureError::ConfigError(format!(
                    "duplicate task id '{}' in {} (already declared in {})",
                    task_id,
                    file.display(),
                    first.display()
                )));
            }
            seen.insert(task_id.clone(), file.clone());
            all.push((task_id, spec));
        }
    }

    info!(count = all.len(), "Assertion specs loaded");
    Ok(all)
}

/// Parses one assertion document, filling `source` and `destination` defaults.
pub fn parse_assertions(
    content: &str,
    origin: &str,
) -> Result<Vec<(String, AssertionSpec)>, InfrastructureError> {
    if is_blank_document(content) {
        warn!(file = origin, "Empty assertion file");
        return Ok(Vec::new());
    }

    let document: Value = serde_yaml::from_str(content).map_err(|e| {
        // serde_yaml refuses repeated keys while building the mapping
        if e.to_string().contains("duplicate entry") {
            InfrastructureError::ConfigError(format!("duplicate task id in {}: {}", origin, e))
        } else {
            InfrastructureError::YamlError(e)
        }
    })?;
    let mapping = match document {
        Value::Mapping(m) => m,
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(InfrastructureError::ConfigError(format!(
                "assertion file {} must map task ids to assertion specs",
                origin
            )));
        }
    };

    let mut specs = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let task_id = key.as_str().map(str::to_string).ok_or_else(|| {
            InfrastructureError::ConfigError(format!(
                "task id {:?} in {} is not a string",
                key, origin
            ))
        })?;

        let raw: RawAssertion = serde_yaml::from_value(value).map_err(|e| {
            InfrastructureError::ConfigError(format!(
                "invalid assertion spec for '{}' in {}: {}",
                task_id, origin, e
            ))
        })?;

        let columns = parse_columns(&task_id, origin, raw.columns)?;
        if columns.is_empty() {
            warn!(task = %task_id, file = origin, "Assertion spec declares no columns");
        }

        let spec = AssertionSpec::new(
            &task_id,
            raw.source,
            raw.destination,
            raw.primary_input,
            columns,
        );
        specs.push((task_id, spec));
    }

    Ok(specs)
}

// Each list item maps column names to requirement lists. Several columns in
// one item are allowed and keep their order.
fn parse_columns(
    task_id: &str,
    origin: &str,
    entries: Vec<Mapping>,
) -> Result<Vec<ColumnChecks>, InfrastructureError> {
    let mut columns = Vec::new();
    for entry in entries {
        for (key, value) in entry {
            let column = key.as_str().map(str::to_string).ok_or_else(|| {
                InfrastructureError::ConfigError(format!(
                    "column name {:?} of '{}' in {} is not a string",
                    key, task_id, origin
                ))
            })?;

            let requirements: Vec<String> = match value {
                Value::Null => Vec::new(),
                other => serde_yaml::from_value(other).map_err(|_| {
                    InfrastructureError::ConfigError(format!(
                        "requirements of column '{}' ('{}' in {}) must be a list of names",
                        column, task_id, origin
                    ))
                })?,
            };

            columns.push(ColumnChecks {
                column,
                requirements,
            });
        }
    }
    Ok(columns)
}

/// Files matching `pattern`, sorted by path. Wildcards (`*`, `?`) are only
/// supported in the file name.
pub fn match_files(pattern: &Path) -> Result<Vec<PathBuf>, InfrastructureError> {
    let file_pattern = pattern
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .ok_or_else(|| {
            InfrastructureError::ConfigError(format!(
                "assertion pattern {} has no file name",
                pattern.display()
            ))
        })?;

    let dir = match pattern.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if dir.to_string_lossy().contains(['*', '?']) {
        return Err(InfrastructureError::ConfigError(format!(
            "wildcards are only supported in the file name: {}",
            pattern.display()
        )));
    }

    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let matcher = wildcard_regex(&file_pattern)?;
    let mut files: Vec<PathBuf> = WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| matcher.is_match(&e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    Ok(files)
}

fn wildcard_regex(file_pattern: &str) -> Result<Regex, InfrastructureError> {
    let mut re = String::from("^");
    for ch in file_pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).map_err(|e| InfrastructureError::ConfigError(e.to_string()))
}
