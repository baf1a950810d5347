// assay-core/src/application/project.rs

// Collection time: config -> templates -> assertion specs -> test suite + tasks.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::project::ProjectConfig;
use crate::domain::suite::TestSuite;
use crate::domain::task::TaskRegistry;
use crate::error::AssayError;
use crate::infrastructure::config::{load_all, load_project_config, load_tasks, load_templates};

pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub suite: TestSuite,
    pub registry: TaskRegistry,
}

#[instrument(skip(project_dir))]
pub fn load_project(project_dir: &Path) -> Result<Project, AssayError> {
    let config = load_project_config(project_dir)?;

    let templates = Arc::new(load_templates(&config.templates_path(project_dir))?);
    let specs = load_all(&config.assertions_pattern(project_dir))?;
    let suite = TestSuite::generate(templates, &specs);
    let registry = load_tasks(&config.tasks_path(project_dir), project_dir)?;

    info!(
        project = %config.name,
        cases = suite.len(),
        tasks = registry.len(),
        "Project collected"
    );

    Ok(Project {
        root: project_dir.to_path_buf(),
        config,
        suite,
        registry,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::harness::HarnessContext;
    use crate::application::suite::{TestStatus, run_suite};
    use crate::infrastructure::adapters::{DuckDBConnector, LocalTaskRunner};
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    fn write_project(assertions: &str) -> Result<TempDir> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("data"))?;
        fs::create_dir_all(root.join("templates"))?;
        fs::create_dir_all(root.join("assertions"))?;

        fs::write(root.join("assay.yaml"), "name: shop\n")?;
        fs::write(
            root.join("data/orders.csv"),
            "id,customer,amount\n1,alice,10\n2,bob,\n3,alice,7\n",
        )?;
        fs::write(
            root.join("templates/queries.yaml"),
            r#"
not_null: |
  SELECT COUNT(*) = 0
    FROM ${table}
   WHERE ${column} IS NULL
unique: SELECT COUNT(DISTINCT ${column}) = COUNT(*) FROM ${table}
complete: SELECT COUNT(*) = ${source_row_count} FROM ${table}
"#,
        )?;
        fs::write(
            root.join("tasks.yaml"),
            r#"
load_orders:
  inputs:
    - other: crm_api
    - data/orders.csv
  sql: CREATE OR REPLACE TABLE ${destination} AS SELECT * FROM read_csv_auto('${input}')
  destination: orders
"#,
        )?;
        fs::write(root.join("assertions/orders.yaml"), assertions)?;
        Ok(dir)
    }

    #[test]
    fn test_load_project_collects_suite() -> Result<()> {
        let dir = write_project(
            "orders:\n  source: load_orders\n  columns:\n    - id: [not_null, unique]\n",
        )?;
        let project = load_project(dir.path())?;

        assert_eq!(project.config.name, "shop");
        assert_eq!(project.suite.ids(), vec!["orders"]);
        assert_eq!(project.suite.cases()[0].task, "load_orders");
        assert_eq!(project.suite.cases()[0].checks.len(), 2);
        assert!(project.registry.contains("load_orders"));
        Ok(())
    }

    #[tokio::test]
    async fn test_end_to_end_on_duckdb() -> Result<()> {
        let dir = write_project(
            r#"
orders:
  source: load_orders
  columns:
    - id: [not_null, unique, complete]
    - customer: [not_null]
orders_amount:
  source: load_orders
  destination: orders
  columns:
    - amount: [not_null]
"#,
        )?;
        let project = load_project(dir.path())?;

        let connector = DuckDBConnector::new(":memory:")?;
        let runner = LocalTaskRunner::new(&connector);
        let ctx = HarnessContext {
            connector: &connector,
            runner: &runner,
            registry: &project.registry,
            base_dir: &project.root,
            data_marker: &project.config.data_marker,
            batch_mode: project.config.batch_mode,
        };

        let result = run_suite(&project.suite, &ctx).await;

        assert_eq!(result.cases[0].status, TestStatus::Passed);
        assert_eq!(result.cases[0].checks.len(), 4);

        let amount = &result.cases[1];
        assert_eq!(amount.status, TestStatus::Failed);
        assert_eq!(
            amount.message.as_deref(),
            Some("Column `amount` violated assertion not_null [query: SELECT COUNT(*) = 0 FROM orders WHERE amount IS NULL]")
        );
        assert!(!result.success);
        Ok(())
    }
}
