// assay-core/src/application/suite.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::application::harness::{HarnessContext, run_test_case};
use crate::domain::error::DomainError;
use crate::domain::suite::{TestCase, TestSuite};
use crate::domain::verdict::{CheckOutcome, Verdict};
use crate::error::AssayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    /// A check was violated or the task reported a failure.
    Failed,
    /// The test case could not be evaluated (config, input, database...).
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestCaseReport {
    pub id: String,
    pub task: String,
    pub destination: String,
    pub status: TestStatus,
    pub duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub checks: Vec<CheckOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteResult {
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u128,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub cases: Vec<TestCaseReport>,
}

/// Runs every test case of the suite, one after the other.
///
/// Test cases are independent: a failing or broken one is recorded and the
/// next one still runs.
pub async fn run_suite(suite: &TestSuite, ctx: &HarnessContext<'_>) -> SuiteResult {
    let started_at = Utc::now();
    let start = Instant::now();

    if suite.is_empty() {
        warn!("Empty test suite, nothing to run");
    }
    info!(cases = suite.len(), mode = %ctx.batch_mode, "Running test suite");

    let mut cases = Vec::with_capacity(suite.len());
    for case in suite.cases() {
        let case_start = Instant::now();
        let outcome = run_test_case(case, suite.templates(), ctx).await;
        let report = report_case(case, outcome, case_start.elapsed().as_millis());

        match report.status {
            TestStatus::Passed => info!(test = %case.id, "✅ PASS"),
            TestStatus::Failed | TestStatus::Error => error!(
                test = %case.id,
                status = ?report.status,
                "❌ {}",
                report.message.as_deref().unwrap_or_default()
            ),
        }
        cases.push(report);
    }

    let count = |status: TestStatus| cases.iter().filter(|c| c.status == status).count();
    let (passed, failed, errors) = (
        count(TestStatus::Passed),
        count(TestStatus::Failed),
        count(TestStatus::Error),
    );

    SuiteResult {
        success: failed == 0 && errors == 0,
        started_at,
        duration_ms: start.elapsed().as_millis(),
        passed,
        failed,
        errors,
        cases,
    }
}

fn report_case(
    case: &TestCase,
    outcome: Result<Verdict, AssayError>,
    duration_ms: u128,
) -> TestCaseReport {
    let (status, message, checks) = match outcome {
        Ok(verdict) => {
            let message = verdict.failures().next().map(|f| f.violation().to_string());
            let status = if verdict.passed() {
                TestStatus::Passed
            } else {
                TestStatus::Failed
            };
            (status, message, verdict.outcomes)
        }
        Err(AssayError::Domain(e @ DomainError::TaskExecutionFailure(_))) => {
            (TestStatus::Failed, Some(e.to_string()), Vec::new())
        }
        Err(e) => (TestStatus::Error, Some(e.to_string()), Vec::new()),
    };

    TestCaseReport {
        id: case.id.clone(),
        task: case.task.clone(),
        destination: case.destination.clone(),
        status,
        duration_ms,
        message,
        checks,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::assertion::{AssertionSpec, ColumnChecks};
    use crate::domain::batch::BatchMode;
    use crate::domain::task::{InputDescriptor, TaskRegistry};
    use crate::domain::template::TemplateStore;
    use crate::domain::verdict::ScalarValue;
    use crate::ports::connector::Connector;
    use crate::ports::task::{Task, TaskRunner, TaskStatus};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::{Arc, Mutex};

    /// Answers each combined query according to the destination table it targets.
    struct TableConnector {
        by_table: HashMap<&'static str, Vec<ScalarValue>>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Connector for TableConnector {
        async fn execute(&self, _query: &str) -> Result<(), AssayError> {
            Ok(())
        }
        async fn query_row(&self, query: &str) -> Result<Vec<ScalarValue>, AssayError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.by_table
                .iter()
                .find(|(table, _)| query.contains(&format!("FROM {} ", table)))
                .map(|(_, row)| row.clone())
                .ok_or_else(|| AssayError::InternalError("unknown table".into()))
        }
        fn engine_name(&self) -> &str {
            "mock"
        }
    }

    struct CsvTask(&'static str);

    #[async_trait]
    impl Task for CsvTask {
        fn name(&self) -> &str {
            self.0
        }
        fn inputs(&self) -> Vec<InputDescriptor> {
            vec![InputDescriptor::HasPath("data/in.csv".into())]
        }
        async fn run(&self, _connector: &dyn Connector) -> Result<(), AssayError> {
            Ok(())
        }
    }

    /// Fails every task whose name is listed.
    struct SelectiveRunner(Vec<&'static str>);

    #[async_trait]
    impl TaskRunner for SelectiveRunner {
        async fn build(&self, task: &dyn Task) -> TaskStatus {
            if self.0.iter().any(|n| *n == task.name()) {
                TaskStatus::Failed("nope".into())
            } else {
                TaskStatus::Success
            }
        }
    }

    fn spec(id: &str, reqs: &[&str]) -> (String, AssertionSpec) {
        (
            id.to_string(),
            AssertionSpec::new(
                id,
                None,
                None,
                None,
                vec![ColumnChecks {
                    column: "id".into(),
                    requirements: reqs.iter().map(|r| r.to_string()).collect(),
                }],
            ),
        )
    }

    #[tokio::test]
    async fn test_suite_records_every_case() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("data"))?;
        fs::write(dir.path().join("data/in.csv"), "id\n1\n2\n")?;

        let mut registry = TaskRegistry::new();
        for name in ["good", "bad", "broken_task", "typo"] {
            registry.register(name, move || Box::new(CsvTask(name)));
        }

        let templates = Arc::new(TemplateStore::from_raw([(
            "not_null".to_string(),
            "SELECT COUNT(*) = 0 FROM ${table} WHERE ${column} IS NULL".to_string(),
        )]));
        let suite = TestSuite::generate(
            templates,
            &[
                spec("good", &["not_null"]),
                spec("bad", &["not_null"]),
                spec("broken_task", &["not_null"]),
                spec("typo", &["not_nul"]),
            ],
        );

        let connector = TableConnector {
            by_table: HashMap::from([
                ("good", vec![ScalarValue::Bool(true)]),
                ("bad", vec![ScalarValue::Bool(false)]),
            ]),
            queries: Mutex::new(Vec::new()),
        };
        let runner = SelectiveRunner(vec!["broken_task"]);
        let ctx = HarnessContext {
            connector: &connector,
            runner: &runner,
            registry: &registry,
            base_dir: dir.path(),
            data_marker: "data",
            batch_mode: BatchMode::Combined,
        };

        let result = run_suite(&suite, &ctx).await;

        assert!(!result.success);
        assert_eq!((result.passed, result.failed, result.errors), (1, 2, 1));

        let statuses: Vec<_> = result.cases.iter().map(|c| (c.id.as_str(), c.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("good", TestStatus::Passed),
                ("bad", TestStatus::Failed),
                ("broken_task", TestStatus::Failed),
                ("typo", TestStatus::Error),
            ]
        );

        let bad = &result.cases[1];
        assert_eq!(
            bad.message.as_deref(),
            Some("Column `id` violated assertion not_null [query: SELECT COUNT(*) = 0 FROM bad WHERE id IS NULL]")
        );
        assert_eq!(bad.checks.len(), 1);
        assert_eq!(
            result.cases[2].message.as_deref(),
            Some("Task broken_task failed")
        );
        assert_eq!(connector.queries.lock().unwrap().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_suite_succeeds() {
        let registry = TaskRegistry::new();
        let connector = TableConnector {
            by_table: HashMap::new(),
            queries: Mutex::new(Vec::new()),
        };
        let runner = SelectiveRunner(vec![]);
        let ctx = HarnessContext {
            connector: &connector,
            runner: &runner,
            registry: &registry,
            base_dir: std::path::Path::new("."),
            data_marker: "data",
            batch_mode: BatchMode::Combined,
        };
        let suite = TestSuite::generate(Arc::new(TemplateStore::default()), &[]);

        let result = run_suite(&suite, &ctx).await;
        assert!(result.success);
        assert!(result.cases.is_empty());
    }
}
