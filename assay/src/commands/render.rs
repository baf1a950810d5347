// assay/src/commands/render.rs
//
// USE CASE: Dry run. Prints the statements of one test case.

use anyhow::Context;
use std::path::PathBuf;

use assay_core::application::render_test_case;
use assay_core::domain::batch::BatchMode;

use super::open_project;

pub fn execute(project_dir: PathBuf, select: String, rows: u64, individual: bool) -> anyhow::Result<()> {
    let project = open_project(&project_dir)?;

    let case = project
        .suite
        .cases()
        .iter()
        .find(|c| c.id == select)
        .with_context(|| format!("No test case named '{}'", select))?;

    let mode = if individual {
        BatchMode::Individual
    } else {
        project.config.batch_mode
    };

    let statements = render_test_case(case, project.suite.templates(), rows, mode)
        .map_err(|e| anyhow::anyhow!("Cannot render '{}': {}", select, e))?;

    for sql in statements {
        println!("{};", sql);
    }
    Ok(())
}
