// assay/src/commands/run.rs
//
// USE CASE: Run the test suite.

use anyhow::Context;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::path::PathBuf;

use assay_core::application::{HarnessContext, SuiteResult, TestStatus, run_suite, save_report};
use assay_core::domain::batch::BatchMode;
use assay_core::infrastructure::adapters::{DuckDBConnector, LocalTaskRunner};

use super::open_project;

pub async fn execute(
    project_dir: PathBuf,
    select: Option<String>,
    individual: bool,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Collect (config, templates, assertions, tasks)
    println!("⚙️  Collecting test cases...");
    let project = open_project(&project_dir)?;
    println!("   Project: {}", project.config.name);

    let suite = project.suite.select(select.as_deref());
    if let Some(id) = &select
        && suite.is_empty()
    {
        anyhow::bail!("No test case named '{}'", id);
    }

    // B. Database
    let db_path = project.config.database_location(&project.root);
    let connector = DuckDBConnector::new(&db_path)
        .with_context(|| format!("Failed to initialize DuckDB at {}", db_path))?;
    println!("   Engine: DuckDB 🦆 ({})", db_path);

    // C. Run
    let runner = LocalTaskRunner::new(&connector);
    let batch_mode = if individual {
        BatchMode::Individual
    } else {
        project.config.batch_mode
    };
    let ctx = HarnessContext {
        connector: &connector,
        runner: &runner,
        registry: &project.registry,
        base_dir: &project.root,
        data_marker: &project.config.data_marker,
        batch_mode,
    };

    let result = run_suite(&suite, &ctx).await;
    println!("\n{}", summary_table(&result));

    if let Some(report_path) = project.config.report_path(&project.root) {
        save_report(&report_path, &result)
            .with_context(|| format!("Failed to write report to {:?}", report_path))?;
        println!("📝 Report written to {}", report_path.display());
    }

    if result.success {
        println!(
            "\n✨ SUCCESS! {} test cases passed in {:.2?}",
            result.passed,
            start.elapsed()
        );
    } else {
        eprintln!(
            "\n❌ FAILURE. {} failed, {} errors.",
            result.failed, result.errors
        );
        // Exit with error code for CI/CD
        std::process::exit(1);
    }

    Ok(())
}

fn summary_table(result: &SuiteResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Test", "Status", "Checks", "Time", "Details"]);

    for case in &result.cases {
        let status = match case.status {
            TestStatus::Passed => "✅ PASS",
            TestStatus::Failed => "❌ FAIL",
            TestStatus::Error => "💥 ERROR",
        };
        table.add_row(vec![
            case.id.clone(),
            status.to_string(),
            case.checks.len().to_string(),
            format!("{}ms", case.duration_ms),
            case.message.clone().unwrap_or_default(),
        ]);
    }
    table
}
