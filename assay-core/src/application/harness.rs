// assay-core/src/application/harness.rs

// Run time for one test case: Task -> Primary input -> Batch -> Query -> Verdict

use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::batch::{BatchMode, QueryBatch};
use crate::domain::error::DomainError;
use crate::domain::suite::TestCase;
use crate::domain::task::{TaskRegistry, resolve_primary_input};
use crate::domain::template::TemplateStore;
use crate::domain::verdict::{ScalarValue, Verdict};
use crate::error::AssayError;
use crate::infrastructure::fs::count_data_rows;
use crate::ports::connector::Connector;
use crate::ports::task::TaskRunner;

/// Collaborators shared by every test case of a session.
pub struct HarnessContext<'a> {
    pub connector: &'a dyn Connector,
    pub runner: &'a dyn TaskRunner,
    pub registry: &'a TaskRegistry,
    /// Relative input paths are resolved against this directory.
    pub base_dir: &'a Path,
    pub data_marker: &'a str,
    pub batch_mode: BatchMode,
}

/// Runs the task of `case`, then evaluates all its checks.
///
/// Structural problems (unknown task or requirement, no primary input, task
/// failure, database error) abort with an error before any verdict. The
/// returned verdict may still contain failing checks.
#[instrument(skip_all, fields(test = %case.id))]
pub async fn run_test_case(
    case: &TestCase,
    templates: &TemplateStore,
    ctx: &HarnessContext<'_>,
) -> Result<Verdict, AssayError> {
    // 0. Cheap structural checks first, so a typo never waits on a long task
    for check in &case.checks {
        templates.get(&check.requirement)?;
    }
    let task = ctx.registry.create(&case.task)?;

    // 1. Task execution
    let status = ctx.runner.build(task.as_ref()).await;
    if !status.is_success() {
        return Err(DomainError::TaskExecutionFailure(case.task.clone()).into());
    }

    // 2. Size of the primary input (upper bound used by some templates)
    let inputs = task.inputs();
    let marker = case.input_marker(ctx.data_marker);
    let input = resolve_primary_input(&case.task, &inputs, marker)?;
    let source_row_count = count_data_rows(ctx.base_dir.join(input))?;
    debug!(input = %input.display(), source_row_count, "Primary input resolved");

    // 3. Render all checks
    let batch = QueryBatch::build(case, templates, source_row_count)?;
    if batch.is_empty() {
        warn!("No checks declared, nothing to evaluate");
        return Ok(Verdict::default());
    }

    // 4. Evaluate
    let row = fetch_results(&batch, ctx).await?;
    Ok(Verdict::evaluate(&batch, &row))
}

/// `run_test_case`, with the first failing check turned into an
/// `AssertionViolation`.
pub async fn assert_test_case(
    case: &TestCase,
    templates: &TemplateStore,
    ctx: &HarnessContext<'_>,
) -> Result<Verdict, AssayError> {
    let verdict = run_test_case(case, templates, ctx).await?;
    Ok(verdict.into_result()?)
}

/// Statements a test case would send, without running its task.
pub fn render_test_case(
    case: &TestCase,
    templates: &TemplateStore,
    source_row_count: u64,
    mode: BatchMode,
) -> Result<Vec<String>, AssayError> {
    let batch = QueryBatch::build(case, templates, source_row_count)?;
    Ok(batch.statements(mode))
}

async fn fetch_results(
    batch: &QueryBatch,
    ctx: &HarnessContext<'_>,
) -> Result<Vec<ScalarValue>, AssayError> {
    let start = Instant::now();

    let row = match ctx.batch_mode {
        BatchMode::Combined => match batch.combined_sql() {
            Some(sql) => {
                debug!("⚡ Executing batch: {}", sql);
                ctx.connector.query_row(&sql).await?
            }
            None => Vec::new(),
        },
        BatchMode::Individual => {
            let mut row = Vec::with_capacity(batch.len());
            for (sql, fragment) in batch
                .statements(BatchMode::Individual)
                .iter()
                .zip(batch.fragments())
            {
                debug!("⚡ Executing check: {}", sql);
                match ctx.connector.query_row(sql).await {
                    Ok(values) => row.push(values.into_iter().next().unwrap_or(ScalarValue::Null)),
                    Err(e) => {
                        error!(query = %fragment, "Check query failed: {}", e);
                        return Err(e);
                    }
                }
            }
            row
        }
    };

    if row.len() != batch.len() {
        warn!(
            expected = batch.len(),
            got = row.len(),
            "Result width does not match the number of checks"
        );
    }
    info!(
        checks = batch.len(),
        mode = %ctx.batch_mode,
        "Checks evaluated in {:.2?}",
        start.elapsed()
    );

    Ok(row)
}
