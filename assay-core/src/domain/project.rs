// assay-core/src/domain/project.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::batch::BatchMode;
use crate::domain::task::DEFAULT_DATA_MARKER;

pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,

    /// Templates file, relative to the project directory.
    #[serde(default = "default_templates")]
    pub templates: String,

    /// Assertion files pattern (wildcards allowed in the file name).
    #[serde(default = "default_assertions")]
    pub assertions: String,

    #[serde(default = "default_tasks")]
    pub tasks: String,

    #[serde(default = "default_data_marker")]
    pub data_marker: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default)]
    pub batch_mode: BatchMode,

    /// JSON run report. Not written when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl ProjectConfig {
    pub fn templates_path(&self, root: &Path) -> PathBuf {
        root.join(&self.templates)
    }

    pub fn assertions_pattern(&self, root: &Path) -> PathBuf {
        root.join(&self.assertions)
    }

    pub fn tasks_path(&self, root: &Path) -> PathBuf {
        root.join(&self.tasks)
    }

    pub fn report_path(&self, root: &Path) -> Option<PathBuf> {
        self.report.as_ref().map(|r| root.join(r))
    }

    /// Database location; the in-memory marker is passed through untouched.
    pub fn database_location(&self, root: &Path) -> String {
        if self.database == IN_MEMORY_DATABASE {
            self.database.clone()
        } else {
            root.join(&self.database).to_string_lossy().to_string()
        }
    }
}

fn default_templates() -> String {
    "templates/queries.yaml".to_string()
}
fn default_assertions() -> String {
    "assertions/*.yaml".to_string()
}
fn default_tasks() -> String {
    "tasks.yaml".to_string()
}
fn default_data_marker() -> String {
    DEFAULT_DATA_MARKER.to_string()
}
fn default_database() -> String {
    IN_MEMORY_DATABASE.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_yaml() {
        let config: ProjectConfig = serde_yaml::from_str("name: shop").unwrap();
        assert_eq!(config.templates, "templates/queries.yaml");
        assert_eq!(config.assertions, "assertions/*.yaml");
        assert_eq!(config.tasks, "tasks.yaml");
        assert_eq!(config.data_marker, "data");
        assert_eq!(config.database, ":memory:");
        assert_eq!(config.batch_mode, BatchMode::Combined);
        assert_eq!(config.report, None);
    }

    #[test]
    fn test_paths_are_project_relative() {
        let config: ProjectConfig = serde_yaml::from_str(
            "name: shop\ndatabase: target/shop.duckdb\nbatch_mode: individual\nreport: target/out.json",
        )
        .unwrap();
        let root = Path::new("/projects/shop");
        assert_eq!(
            config.templates_path(root),
            PathBuf::from("/projects/shop/templates/queries.yaml")
        );
        assert_eq!(
            config.database_location(root),
            "/projects/shop/target/shop.duckdb"
        );
        assert_eq!(config.batch_mode, BatchMode::Individual);
        assert_eq!(
            config.report_path(root),
            Some(PathBuf::from("/projects/shop/target/out.json"))
        );
    }

    #[test]
    fn test_in_memory_database_is_not_joined() {
        let config: ProjectConfig = serde_yaml::from_str("name: shop").unwrap();
        assert_eq!(config.database_location(Path::new("/x")), ":memory:");
    }
}
